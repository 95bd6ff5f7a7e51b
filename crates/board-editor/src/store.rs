//! Canvas store: the authoritative list of placed nodes.
//!
//! The store owns everything a placement pass reads: the nodes, layout
//! changes that are in flight (pending resizes and horizontal shifts), and
//! the user's focus (hovered node, last pointer position). Passes run
//! against a snapshot of this state; their result is committed back as a
//! single `BoardMutation`.

use board_core::id::NodeId;
use board_core::model::{CanvasNode, PendingNode, Point, Size};
use board_core::plan::{PlacementContext, PlacementPlan, place_pending};
use board_core::{LayoutConfig, lint_canvas};
use std::collections::HashMap;

/// A reversible change to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardMutation {
    /// Append nodes (a committed placement pass, or restored nodes).
    AddNodes { nodes: Vec<CanvasNode> },
    RemoveNodes { ids: Vec<NodeId> },
    MoveNode { id: NodeId, dx: f32, dy: f32 },
    /// Set (or clear) a node's measured size.
    ResizeNode { id: NodeId, size: Option<Size> },
}

pub struct BoardStore {
    /// Placed nodes in paint order (last = topmost).
    pub nodes: Vec<CanvasNode>,
    pub config: LayoutConfig,
    pub viewport_center: Point,
    width_updates: HashMap<NodeId, f32>,
    displacements: HashMap<NodeId, f32>,
    last_hovered: Option<NodeId>,
    last_pointer: Option<Point>,
}

impl BoardStore {
    pub fn new(config: LayoutConfig, viewport_center: Point) -> Self {
        Self {
            nodes: Vec::new(),
            config,
            viewport_center,
            width_updates: HashMap::new(),
            displacements: HashMap::new(),
            last_hovered: None,
            last_pointer: None,
        }
    }

    pub fn with_nodes(mut self, nodes: Vec<CanvasNode>) -> Self {
        self.nodes = nodes;
        self
    }

    pub fn node(&self, id: NodeId) -> Option<&CanvasNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut CanvasNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    // ─── Focus ───────────────────────────────────────────────────────────

    /// Topmost node under `p`.
    pub fn hit_test(&self, p: Point) -> Option<NodeId> {
        self.nodes
            .iter()
            .rev()
            .find(|n| n.rect(&self.config).contains(p))
            .map(|n| n.id)
    }

    /// Record a pointer move. Hovering empty canvas keeps the last hovered
    /// node so a note can still be dropped next to it.
    pub fn pointer_moved(&mut self, p: Point) {
        self.last_pointer = Some(p);
        if let Some(id) = self.hit_test(p) {
            self.last_hovered = Some(id);
        }
    }

    pub fn hover(&mut self, id: Option<NodeId>) {
        self.last_hovered = id.filter(|id| self.node(*id).is_some());
    }

    pub fn last_hovered(&self) -> Option<NodeId> {
        self.last_hovered
    }

    pub fn last_pointer(&self) -> Option<Point> {
        self.last_pointer
    }

    // ─── In-flight layout ────────────────────────────────────────────────

    /// A resize has started but not been committed yet.
    pub fn set_pending_width(&mut self, id: NodeId, width: f32) {
        self.width_updates.insert(id, width);
    }

    /// A horizontal shift has started but not been committed yet.
    pub fn set_pending_displacement(&mut self, id: NodeId, dx: f32) {
        self.displacements.insert(id, dx);
    }

    pub fn has_pending_layout(&self) -> bool {
        !self.width_updates.is_empty() || !self.displacements.is_empty()
    }

    /// Drain in-flight layout changes into mutations, in node order.
    pub fn take_pending_layout(&mut self) -> Vec<BoardMutation> {
        let mut mutations = Vec::new();
        for node in &self.nodes {
            if let Some(dx) = self.displacements.get(&node.id) {
                mutations.push(BoardMutation::MoveNode {
                    id: node.id,
                    dx: *dx,
                    dy: 0.0,
                });
            }
            if let Some(w) = self.width_updates.get(&node.id) {
                let h = node.size.map(|s| s.h).unwrap_or(0.0);
                mutations.push(BoardMutation::ResizeNode {
                    id: node.id,
                    size: Some(Size::new(*w, h)),
                });
            }
        }
        self.width_updates.clear();
        self.displacements.clear();
        mutations
    }

    // ─── Placement ───────────────────────────────────────────────────────

    /// Snapshot of everything a pass reads besides the nodes.
    pub fn context(&self) -> PlacementContext {
        PlacementContext {
            viewport_center: self.viewport_center,
            width_updates: self.width_updates.clone(),
            displacements: self.displacements.clone(),
            last_hovered: self.last_hovered,
            last_pointer: self.last_pointer,
        }
    }

    /// Run a placement pass against the current state. Does not mutate.
    pub fn plan(&self, pending: &[PendingNode]) -> PlacementPlan {
        place_pending(&self.nodes, pending, &self.context(), &self.config)
    }

    /// Number of overlapping node pairs on the board.
    pub fn overlap_count(&self) -> usize {
        lint_canvas(&self.nodes, &self.config)
            .iter()
            .filter(|d| d.rule == "overlap")
            .count()
    }

    // ─── Mutations ───────────────────────────────────────────────────────

    pub fn apply_mutation(&mut self, mutation: BoardMutation) {
        match mutation {
            BoardMutation::AddNodes { nodes } => {
                for node in nodes {
                    match self.nodes.iter().position(|n| n.id == node.id) {
                        Some(i) => self.nodes[i] = node,
                        None => self.nodes.push(node),
                    }
                }
            }
            BoardMutation::RemoveNodes { ids } => {
                self.nodes.retain(|n| !ids.contains(&n.id));
                for id in &ids {
                    self.width_updates.remove(id);
                    self.displacements.remove(id);
                }
                if self.last_hovered.is_some_and(|h| ids.contains(&h)) {
                    self.last_hovered = None;
                }
            }
            BoardMutation::MoveNode { id, dx, dy } => {
                if let Some(node) = self.node_mut(id) {
                    node.position = node.position.offset(dx, dy);
                }
            }
            BoardMutation::ResizeNode { id, size } => {
                if let Some(node) = self.node_mut(id) {
                    node.size = size;
                }
            }
        }
    }

    /// Replace every node at once (undo/redo of a batch). Focus on a node
    /// that no longer exists is dropped.
    pub fn replace_nodes(&mut self, nodes: Vec<CanvasNode>) {
        self.nodes = nodes;
        if self.last_hovered.is_some_and(|h| self.node(h).is_none()) {
            self.last_hovered = None;
        }
    }

    /// The measurement layer reports a node's rendered size.
    pub fn measure_node(&mut self, id: NodeId, width: f32, height: f32) -> Option<BoardMutation> {
        let node = self.node(id)?;
        let size = Some(Size::new(width, height));
        if node.size == size {
            return None;
        }
        let mutation = BoardMutation::ResizeNode { id, size };
        self.apply_mutation(mutation.clone());
        Some(mutation)
    }
}
