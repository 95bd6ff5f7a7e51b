//! Position calculators for nodes added to the board.
//!
//! Two anchor zones are derived from the current board once per pass:
//! the **shelf** above the existing cluster and the **right lane** beside it.
//! Batches fan out left-to-right along either zone; children stack below
//! their parent video; sticky notes follow the user's focus and go through
//! the free-spot search.

use crate::collision::find_free_spot_with_radius;
use crate::config::LayoutConfig;
use crate::id::{NodeId, VideoId};
use crate::model::{CanvasNode, NodeData, NodeDataType, Ownership, PendingNode, Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Anchor coordinates shared by every shelf / right-lane placement in a pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementBaselines {
    pub shelf_base_x: f32,
    pub shelf_base_y: f32,
    pub right_lane_x: f32,
    pub right_lane_y: f32,
}

/// Result of stacking one child under its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildPlacement {
    pub position: Point,
    /// Offset for the next sibling under the same parent.
    pub next_offset: f32,
}

// ─── Baselines ────────────────────────────────────────────────────────────

/// Compute the shelf and right-lane anchors for one placement pass.
///
/// `displacements` are horizontal shifts not yet committed to a node's own
/// position; `width_updates` are pending resizes. An empty board anchors
/// both zones so a default-sized node is centred on `viewport_center`.
pub fn compute_baselines(
    placed: &[CanvasNode],
    viewport_center: Point,
    width_updates: &HashMap<NodeId, f32>,
    displacements: &HashMap<NodeId, f32>,
    config: &LayoutConfig,
) -> PlacementBaselines {
    if placed.is_empty() {
        let x = viewport_center.x - config.node_width / 2.0;
        let y = viewport_center.y - config.node_height_fallback / 2.0;
        return PlacementBaselines {
            shelf_base_x: x,
            shelf_base_y: y,
            right_lane_x: x,
            right_lane_y: y,
        };
    }

    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_right = f32::NEG_INFINITY;

    for node in placed {
        let x = node.position.x + displacements.get(&node.id).copied().unwrap_or(0.0);
        let w = width_updates
            .get(&node.id)
            .copied()
            .unwrap_or_else(|| node.width(config));
        min_x = min_x.min(x);
        min_y = min_y.min(node.position.y);
        max_right = max_right.max(x + w);
    }

    PlacementBaselines {
        shelf_base_x: min_x,
        shelf_base_y: min_y - config.shelf_lift - config.node_height_fallback,
        right_lane_x: max_right + config.placement_gap,
        right_lane_y: min_y,
    }
}

// ─── Children ─────────────────────────────────────────────────────────────

/// Height assumed for a freshly placed node before it has been measured.
pub fn estimated_height(data: &NodeData, config: &LayoutConfig) -> f32 {
    match data.data_type() {
        NodeDataType::TrafficSource => config.traffic_node_height_estimate,
        NodeDataType::StickyNote => config.sticky_note_height_estimate,
        _ => config.node_height_fallback,
    }
}

/// Stack `node` below its parent, `current_offset` below any earlier siblings.
pub fn place_non_framed_child(
    node: &PendingNode,
    parent: Point,
    parent_height: f32,
    current_offset: f32,
    config: &LayoutConfig,
) -> ChildPlacement {
    let gap = config.placement_gap;
    let height = match node.size {
        Some(size) if size.h > 0.0 => size.h,
        _ => estimated_height(&node.data, config),
    };
    ChildPlacement {
        position: Point::new(parent.x, parent.y + parent_height + gap + current_offset),
        next_offset: current_offset + height + gap,
    }
}

// ─── Sticky notes ─────────────────────────────────────────────────────────

/// Occupied rectangles of every placed node.
pub fn occupied_rects(placed: &[CanvasNode], config: &LayoutConfig) -> Vec<Rect> {
    placed.iter().map(|n| n.rect(config)).collect()
}

/// Place a sticky note near the user's focus, avoiding every placed node.
///
/// Preference: right of the last hovered node, then centred on the last
/// pointer position, then fanned out along the shelf by `sticky_index`.
#[allow(clippy::too_many_arguments)]
pub fn place_sticky_note(
    note_w: f32,
    last_hovered: Option<&Rect>,
    last_canvas_world_pos: Option<Point>,
    placed: &[CanvasNode],
    shelf_base_x: f32,
    shelf_base_y: f32,
    sticky_index: usize,
    config: &LayoutConfig,
) -> Point {
    let occupied = occupied_rects(placed, config);
    place_sticky_note_among(
        note_w,
        last_hovered,
        last_canvas_world_pos,
        &occupied,
        Point::new(shelf_base_x, shelf_base_y),
        sticky_index,
        config,
    )
}

/// [`place_sticky_note`] against a prepared list of occupied rectangles.
pub fn place_sticky_note_among(
    note_w: f32,
    last_hovered: Option<&Rect>,
    last_canvas_world_pos: Option<Point>,
    occupied: &[Rect],
    shelf_base: Point,
    sticky_index: usize,
    config: &LayoutConfig,
) -> Point {
    let gap = config.placement_gap;
    let note_h = config.sticky_note_height_estimate;

    let preferred = if let Some(hovered) = last_hovered {
        Point::new(hovered.right() + gap, hovered.y)
    } else if let Some(pointer) = last_canvas_world_pos {
        Point::new(pointer.x - note_w / 2.0, pointer.y - note_h / 2.0)
    } else {
        shelf_base.offset(sticky_index as f32 * (note_w + gap), 0.0)
    };

    find_free_spot_with_radius(preferred, occupied, note_w, note_h, gap, config.max_ring)
}

// ─── Lanes ────────────────────────────────────────────────────────────────

/// `pending_index`-th slot of the right lane.
pub fn place_in_right_lane(
    node_w: f32,
    pending_index: usize,
    baselines: &PlacementBaselines,
    config: &LayoutConfig,
) -> Point {
    Point::new(
        baselines.right_lane_x + pending_index as f32 * (node_w + config.placement_gap),
        baselines.right_lane_y,
    )
}

/// `pending_index`-th slot of the shelf.
pub fn place_on_shelf(
    node_w: f32,
    pending_index: usize,
    baselines: &PlacementBaselines,
    config: &LayoutConfig,
) -> Point {
    Point::new(
        baselines.shelf_base_x + pending_index as f32 * (node_w + config.placement_gap),
        baselines.shelf_base_y,
    )
}

// ─── Predicates ───────────────────────────────────────────────────────────

pub fn is_own_channel(data: &NodeData) -> bool {
    data.ownership() == Ownership::Own
}

/// Index placed nodes by the video they show.
pub fn video_index(placed: &[CanvasNode]) -> HashMap<VideoId, &CanvasNode> {
    placed
        .iter()
        .filter_map(|n| n.data.video_id().map(|vid| (vid, n)))
        .collect()
}

/// The on-canvas node showing the video `data` was derived from.
pub fn parent_of<'a>(
    data: &NodeData,
    video_id_to_node: &HashMap<VideoId, &'a CanvasNode>,
) -> Option<&'a CanvasNode> {
    data.source_video_id()
        .and_then(|vid| video_id_to_node.get(&vid).copied())
}

pub fn has_parent(data: &NodeData, video_id_to_node: &HashMap<VideoId, &CanvasNode>) -> bool {
    parent_of(data, video_id_to_node).is_some()
}
