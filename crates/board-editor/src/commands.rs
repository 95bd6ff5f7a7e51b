//! Undo/Redo command stack.
//!
//! Every store mutation is wrapped in a reversible `Command`. A committed
//! placement pass is one `AddNodes` mutation, so undoing it removes every
//! node the pass placed in a single step.
//!
//! Batches (settling in-flight layout, or anything the host groups) use
//! **node snapshots**: the full node list is captured at the start and end
//! of the batch and undo/redo swaps the whole list.

use crate::store::{BoardMutation, BoardStore};
use board_core::model::{CanvasNode, PendingNode};
use board_core::plan::PlacementPlan;

#[derive(Debug, Clone)]
pub enum Command {
    /// Single mutation with its inverse.
    Single {
        forward: Box<BoardMutation>,
        inverse: Box<BoardMutation>,
        description: String,
    },
    /// Node lists before and after a batch (or a non-invertible mutation).
    Snapshot {
        before: Vec<CanvasNode>,
        after: Vec<CanvasNode>,
        description: String,
    },
}

/// Manages undo/redo stacks with batch grouping.
pub struct CommandStack {
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
    /// Maximum undo depth.
    max_depth: usize,
    /// Batch nesting depth (0 = not batching).
    batch_depth: usize,
    batch_snapshot: Option<Vec<CanvasNode>>,
    batch_dirty: bool,
}

impl CommandStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::with_capacity(max_depth),
            redo_stack: Vec::new(),
            max_depth,
            batch_depth: 0,
            batch_snapshot: None,
            batch_dirty: false,
        }
    }

    pub fn begin_batch(&mut self, store: &BoardStore) {
        if self.batch_depth == 0 {
            self.batch_snapshot = Some(store.nodes.clone());
            self.batch_dirty = false;
        }
        self.batch_depth += 1;
    }

    /// Close a batch. The outermost close pushes one snapshot command if
    /// the nodes changed.
    pub fn end_batch(&mut self, store: &BoardStore, description: &str) {
        if self.batch_depth == 0 {
            return;
        }
        self.batch_depth -= 1;
        if self.batch_depth > 0 {
            return;
        }
        let before = self.batch_snapshot.take().unwrap_or_default();
        if self.batch_dirty && before != store.nodes {
            self.push(Command::Snapshot {
                before,
                after: store.nodes.clone(),
                description: description.to_string(),
            });
        }
        self.batch_dirty = false;
    }

    /// Apply a mutation and record it for undo.
    pub fn execute(&mut self, store: &mut BoardStore, mutation: BoardMutation, description: &str) {
        if self.batch_depth > 0 {
            store.apply_mutation(mutation);
            self.batch_dirty = true;
            return;
        }

        let cmd = match compute_inverse(store, &mutation) {
            Some(inverse) => {
                store.apply_mutation(mutation.clone());
                Command::Single {
                    forward: Box::new(mutation),
                    inverse: Box::new(inverse),
                    description: description.to_string(),
                }
            }
            None => {
                let before = store.nodes.clone();
                store.apply_mutation(mutation);
                Command::Snapshot {
                    before,
                    after: store.nodes.clone(),
                    description: description.to_string(),
                }
            }
        };
        self.push(cmd);
    }

    /// Plan `pending` against the store and commit the result as one step.
    pub fn execute_placement(
        &mut self,
        store: &mut BoardStore,
        pending: Vec<PendingNode>,
        description: &str,
    ) -> PlacementPlan {
        let plan = store.plan(&pending);
        let nodes = plan.into_nodes(pending);
        if !nodes.is_empty() {
            self.execute(store, BoardMutation::AddNodes { nodes }, description);
        }
        plan
    }

    /// Commit in-flight resizes and shifts as one undo step.
    /// Returns the number of mutations applied.
    pub fn settle_pending_layout(&mut self, store: &mut BoardStore) -> usize {
        let mutations = store.take_pending_layout();
        let count = mutations.len();
        if count == 0 {
            return 0;
        }
        self.begin_batch(store);
        for mutation in mutations {
            self.execute(store, mutation, "settle layout");
        }
        self.end_batch(store, "settle layout");
        count
    }

    fn push(&mut self, cmd: Command) {
        self.undo_stack.push(cmd);
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    /// Undo the last command. Returns its description.
    pub fn undo(&mut self, store: &mut BoardStore) -> Option<String> {
        let cmd = self.undo_stack.pop()?;
        let desc = match &cmd {
            Command::Single {
                inverse,
                description,
                ..
            } => {
                store.apply_mutation(*inverse.clone());
                description.clone()
            }
            Command::Snapshot {
                before,
                description,
                ..
            } => {
                store.replace_nodes(before.clone());
                description.clone()
            }
        };
        log::debug!("undo: {desc}");
        self.redo_stack.push(cmd);
        Some(desc)
    }

    /// Redo the last undone command. Returns its description.
    pub fn redo(&mut self, store: &mut BoardStore) -> Option<String> {
        let cmd = self.redo_stack.pop()?;
        let desc = match &cmd {
            Command::Single {
                forward,
                description,
                ..
            } => {
                store.apply_mutation(*forward.clone());
                description.clone()
            }
            Command::Snapshot {
                after, description, ..
            } => {
                store.replace_nodes(after.clone());
                description.clone()
            }
        };
        log::debug!("redo: {desc}");
        self.undo_stack.push(cmd);
        Some(desc)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

/// Inverse of `mutation` against the current store, or `None` when it
/// needs a snapshot instead: adds that overwrite existing nodes, and
/// removals, whose nodes must come back at their original paint depth.
fn compute_inverse(store: &BoardStore, mutation: &BoardMutation) -> Option<BoardMutation> {
    match mutation {
        BoardMutation::AddNodes { nodes } => {
            if nodes.iter().any(|n| store.node(n.id).is_some()) {
                return None;
            }
            Some(BoardMutation::RemoveNodes {
                ids: nodes.iter().map(|n| n.id).collect(),
            })
        }
        BoardMutation::RemoveNodes { .. } => None,
        BoardMutation::MoveNode { id, dx, dy } => Some(BoardMutation::MoveNode {
            id: *id,
            dx: -dx,
            dy: -dy,
        }),
        BoardMutation::ResizeNode { id, .. } => Some(BoardMutation::ResizeNode {
            id: *id,
            size: store.node(*id).and_then(|n| n.size),
        }),
    }
}
