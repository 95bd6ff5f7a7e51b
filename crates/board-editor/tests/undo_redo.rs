//! Integration tests: placement commits through the command stack.
//!
//! A placement pass must land as one undo step, and in-flight layout
//! changes must feed the baselines before they are settled.

use board_core::id::{NodeId, VideoId};
use board_core::model::{CanvasNode, NodeData, Ownership, PendingNode, Point, Size};
use board_core::plan::PlacementStrategy;
use board_core::LayoutConfig;
use board_editor::commands::CommandStack;
use board_editor::store::{BoardMutation, BoardStore};
use pretty_assertions::assert_eq;

fn video(id: &str, ownership: Ownership) -> NodeData {
    NodeData::VideoCard {
        video_id: VideoId::intern(&format!("yt-{id}")),
        ownership,
        source_video_id: None,
    }
}

fn make_store() -> BoardStore {
    BoardStore::new(LayoutConfig::default(), Point::new(600.0, 400.0)).with_nodes(vec![
        CanvasNode::new(NodeId::intern("intro"), Point::new(0.0, 0.0), video("intro", Ownership::Own))
            .with_size(340.0, 200.0),
    ])
}

fn batch() -> Vec<PendingNode> {
    vec![
        PendingNode::new(NodeId::intern("own-a"), video("own-a", Ownership::Own)),
        PendingNode::new(NodeId::intern("own-b"), video("own-b", Ownership::Own)),
        PendingNode::new(
            NodeId::intern("traffic-intro"),
            NodeData::TrafficSource {
                source_video_id: VideoId::intern("yt-intro"),
            },
        ),
    ]
}

// ─── Placement commits ──────────────────────────────────────────────────

#[test]
fn placement_pass_commits_all_nodes() {
    let mut store = make_store();
    let mut stack = CommandStack::new(100);

    let plan = stack.execute_placement(&mut store, batch(), "add videos");
    assert_eq!(store.nodes.len(), 4);
    assert_eq!(plan.placements[0].strategy, PlacementStrategy::RightLane);
    assert_eq!(plan.placements[2].strategy, PlacementStrategy::Child);

    let own_a = store.node(NodeId::intern("own-a")).unwrap();
    assert_eq!(own_a.position, Point::new(360.0, 0.0));
    let child = store.node(NodeId::intern("traffic-intro")).unwrap();
    assert_eq!(child.position, Point::new(0.0, 220.0));
}

#[test]
fn undo_removes_whole_pass() {
    let mut store = make_store();
    let mut stack = CommandStack::new(100);
    stack.execute_placement(&mut store, batch(), "add videos");

    assert_eq!(stack.undo(&mut store).as_deref(), Some("add videos"));
    assert_eq!(store.nodes.len(), 1);
    assert!(!stack.can_undo());

    assert_eq!(stack.redo(&mut store).as_deref(), Some("add videos"));
    assert_eq!(store.nodes.len(), 4);
}

#[test]
fn empty_pass_records_nothing() {
    let mut store = make_store();
    let mut stack = CommandStack::new(100);
    let plan = stack.execute_placement(&mut store, Vec::new(), "nothing");
    assert!(plan.placements.is_empty());
    assert!(!stack.can_undo());
}

// ─── Single mutations ───────────────────────────────────────────────────

#[test]
fn move_and_resize_undo() {
    let mut store = make_store();
    let mut stack = CommandStack::new(100);
    let id = NodeId::intern("intro");

    stack.execute(&mut store, BoardMutation::MoveNode { id, dx: 15.0, dy: -5.0 }, "move");
    stack.execute(
        &mut store,
        BoardMutation::ResizeNode {
            id,
            size: Some(Size::new(400.0, 260.0)),
        },
        "resize",
    );

    stack.undo(&mut store);
    assert_eq!(store.node(id).unwrap().size, Some(Size::new(340.0, 200.0)));
    stack.undo(&mut store);
    assert_eq!(store.node(id).unwrap().position, Point::new(0.0, 0.0));
}

#[test]
fn remove_undo_restores_node() {
    let mut store = make_store();
    let mut stack = CommandStack::new(100);
    let id = NodeId::intern("intro");
    let original = store.node(id).cloned().unwrap();

    stack.execute(&mut store, BoardMutation::RemoveNodes { ids: vec![id] }, "delete");
    assert!(store.node(id).is_none());
    stack.undo(&mut store);
    assert_eq!(store.node(id), Some(&original));
}

#[test]
fn remove_undo_keeps_paint_order() {
    let config = LayoutConfig::default();
    let mut store = BoardStore::new(config, Point::new(0.0, 0.0)).with_nodes(vec![
        CanvasNode::new(NodeId::intern("back"), Point::new(0.0, 0.0), NodeData::Generic)
            .with_size(100.0, 100.0),
        CanvasNode::new(NodeId::intern("front"), Point::new(50.0, 50.0), NodeData::Generic)
            .with_size(100.0, 100.0),
    ]);
    let mut stack = CommandStack::new(100);
    let before = store.nodes.clone();
    let shared = Point::new(75.0, 75.0);
    assert_eq!(store.hit_test(shared), Some(NodeId::intern("front")));

    stack.execute(
        &mut store,
        BoardMutation::RemoveNodes {
            ids: vec![NodeId::intern("back")],
        },
        "delete",
    );
    assert_eq!(store.nodes.len(), 1);

    stack.undo(&mut store);
    assert_eq!(store.nodes, before);
    assert_eq!(store.hit_test(shared), Some(NodeId::intern("front")));

    stack.redo(&mut store);
    assert!(store.node(NodeId::intern("back")).is_none());
}

#[test]
fn new_action_clears_redo() {
    let mut store = make_store();
    let mut stack = CommandStack::new(100);
    let id = NodeId::intern("intro");
    stack.execute(&mut store, BoardMutation::MoveNode { id, dx: 1.0, dy: 0.0 }, "nudge");
    stack.undo(&mut store);
    assert!(stack.can_redo());
    stack.execute(&mut store, BoardMutation::MoveNode { id, dx: 2.0, dy: 0.0 }, "nudge");
    assert!(!stack.can_redo());
}

#[test]
fn max_depth_drops_oldest() {
    let mut store = make_store();
    let mut stack = CommandStack::new(2);
    let id = NodeId::intern("intro");
    for _ in 0..3 {
        stack.execute(&mut store, BoardMutation::MoveNode { id, dx: 10.0, dy: 0.0 }, "nudge");
    }
    assert!(stack.undo(&mut store).is_some());
    assert!(stack.undo(&mut store).is_some());
    assert!(stack.undo(&mut store).is_none());
    assert_eq!(store.node(id).unwrap().position, Point::new(10.0, 0.0));
}

// ─── In-flight layout ───────────────────────────────────────────────────

#[test]
fn pending_layout_shapes_baselines_then_settles() {
    let mut store = make_store();
    let mut stack = CommandStack::new(100);
    let id = NodeId::intern("intro");
    store.set_pending_width(id, 500.0);
    store.set_pending_displacement(id, 100.0);

    let plan = store.plan(&batch()[..1]);
    assert_eq!(plan.baselines.right_lane_x, 100.0 + 500.0 + 20.0);

    assert_eq!(stack.settle_pending_layout(&mut store), 2);
    let node = store.node(id).unwrap();
    assert_eq!(node.position, Point::new(100.0, 0.0));
    assert_eq!(node.size, Some(Size::new(500.0, 200.0)));

    // Settled state gives the same baseline without pending entries.
    assert_eq!(store.plan(&batch()[..1]).baselines, plan.baselines);

    // One undo step reverts both changes.
    assert_eq!(stack.undo(&mut store).as_deref(), Some("settle layout"));
    let node = store.node(id).unwrap();
    assert_eq!(node.position, Point::new(0.0, 0.0));
    assert_eq!(node.size, Some(Size::new(340.0, 200.0)));
}

// ─── Sticky notes follow focus ──────────────────────────────────────────

#[test]
fn sticky_note_lands_beside_hovered_card() {
    let mut store = make_store();
    let mut stack = CommandStack::new(100);
    store.pointer_moved(Point::new(20.0, 20.0));

    let note = PendingNode::new(
        NodeId::intern("note"),
        NodeData::StickyNote {
            text: "hook idea".into(),
        },
    );
    let plan = stack.execute_placement(&mut store, vec![note], "add note");
    assert_eq!(plan.placements[0].position, Point::new(360.0, 0.0));
    assert_eq!(store.overlap_count(), 0);
}

#[test]
fn sticky_notes_on_empty_board_commit_without_overlap() {
    let mut store = BoardStore::new(LayoutConfig::default(), Point::new(500.0, 500.0));
    let mut stack = CommandStack::new(100);
    let notes = ["note-1", "note-2"]
        .iter()
        .map(|id| {
            PendingNode::new(
                NodeId::intern(id),
                NodeData::StickyNote {
                    text: String::new(),
                },
            )
        })
        .collect();

    let plan = stack.execute_placement(&mut store, notes, "add notes");
    assert_eq!(plan.placements[0].position, Point::new(330.0, 406.0));
    assert_eq!(plan.placements[1].position, Point::new(590.0, 406.0));

    for node in &store.nodes {
        assert_eq!(node.size, Some(Size::new(240.0, 200.0)));
    }
    assert_eq!(store.overlap_count(), 0);
}
