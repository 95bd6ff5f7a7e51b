//! One placement pass: pick a strategy per pending node and position it.
//!
//! The pass is pure. It reads a snapshot of the board and returns a
//! `PlacementPlan`; the caller commits the plan to its store in one update.

use crate::config::LayoutConfig;
use crate::id::NodeId;
use crate::model::{CanvasNode, NodeDataType, PendingNode, Point, Rect, Size};
use crate::placement::{
    PlacementBaselines, compute_baselines, estimated_height, is_own_channel, occupied_rects,
    parent_of, place_in_right_lane, place_non_framed_child, place_on_shelf,
    place_sticky_note_among, video_index,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Board state that shapes a pass beyond the placed nodes themselves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlacementContext {
    pub viewport_center: Point,
    /// Pending resizes, by node id.
    pub width_updates: HashMap<NodeId, f32>,
    /// Pending horizontal shifts, by node id.
    pub displacements: HashMap<NodeId, f32>,
    /// Node the pointer last rested on.
    pub last_hovered: Option<NodeId>,
    /// Last pointer position in canvas-world coordinates.
    pub last_pointer: Option<Point>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlacementStrategy {
    StickyNote,
    Child,
    RightLane,
    Shelf,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub id: NodeId,
    pub position: Point,
    /// Box reserved for the node: its own size, else the width and height
    /// estimate for its type.
    pub size: Size,
    pub strategy: PlacementStrategy,
}

/// Positions computed by one pass, in pending order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementPlan {
    pub baselines: PlacementBaselines,
    pub placements: Vec<Placement>,
}

impl PlacementPlan {
    pub fn get(&self, id: NodeId) -> Option<&Placement> {
        self.placements.iter().find(|p| p.id == id)
    }

    pub fn position_of(&self, id: NodeId) -> Option<Point> {
        self.get(id).map(|p| p.position)
    }

    /// Materialize the pending nodes at their planned positions and sizes.
    /// Pending nodes missing from the plan are dropped.
    pub fn into_nodes(&self, pending: Vec<PendingNode>) -> Vec<CanvasNode> {
        pending
            .into_iter()
            .filter_map(|node| {
                let placement = self.get(node.id)?;
                Some(node.into_canvas_node(placement.position, placement.size))
            })
            .collect()
    }
}

/// Place every pending node against the `placed` snapshot.
///
/// Strategy, first match wins: sticky notes follow the user's focus,
/// nodes whose source video is on the board stack under it, own-channel
/// videos go to the right lane, everything else goes to the shelf.
///
/// On an empty board both zones start at the same origin, so lane and
/// shelf nodes share one row and one index instead of landing on top of
/// each other.
pub fn place_pending(
    placed: &[CanvasNode],
    pending: &[PendingNode],
    ctx: &PlacementContext,
    config: &LayoutConfig,
) -> PlacementPlan {
    let baselines = compute_baselines(
        placed,
        ctx.viewport_center,
        &ctx.width_updates,
        &ctx.displacements,
        config,
    );
    log::debug!(
        "placement pass: {} placed, {} pending, baselines {:?}",
        placed.len(),
        pending.len(),
        baselines
    );

    let by_video = video_index(placed);
    let hovered: Option<Rect> = ctx
        .last_hovered
        .and_then(|id| placed.iter().find(|n| n.id == id))
        .map(|n| n.rect(config));
    let shelf_base = Point::new(baselines.shelf_base_x, baselines.shelf_base_y);

    let mut occupied = occupied_rects(placed, config);
    let mut child_offsets: HashMap<NodeId, f32> = HashMap::new();
    let mut sticky_index = 0usize;
    let mut lane_index = 0usize;
    let mut shelf_index = 0usize;
    let shared_row = placed.is_empty();
    let mut placements = Vec::with_capacity(pending.len());

    for node in pending {
        let node_w = node.width(config);

        let (position, strategy) = if node.data.data_type() == NodeDataType::StickyNote {
            let p = place_sticky_note_among(
                node_w,
                hovered.as_ref(),
                ctx.last_pointer,
                &occupied,
                shelf_base,
                sticky_index,
                config,
            );
            sticky_index += 1;
            (p, PlacementStrategy::StickyNote)
        } else if let Some(parent) = parent_of(&node.data, &by_video) {
            let offset = child_offsets.entry(parent.id).or_insert(0.0);
            let child = place_non_framed_child(
                node,
                parent.position,
                parent.height(config),
                *offset,
                config,
            );
            *offset = child.next_offset;
            (child.position, PlacementStrategy::Child)
        } else if is_own_channel(&node.data) {
            let index = if shared_row { lane_index + shelf_index } else { lane_index };
            let p = place_in_right_lane(node_w, index, &baselines, config);
            lane_index += 1;
            (p, PlacementStrategy::RightLane)
        } else {
            let index = if shared_row { lane_index + shelf_index } else { shelf_index };
            let p = place_on_shelf(node_w, index, &baselines, config);
            shelf_index += 1;
            (p, PlacementStrategy::Shelf)
        };

        log::trace!(
            "placed {} ({}) via {:?} at ({}, {})",
            node.id,
            node.data.data_type().as_str(),
            strategy,
            position.x,
            position.y
        );

        let node_h = match node.size {
            Some(size) if size.h > 0.0 => size.h,
            _ => estimated_height(&node.data, config),
        };
        occupied.push(Rect::from_origin_size(position, node_w, node_h));
        placements.push(Placement {
            id: node.id,
            position,
            size: Size::new(node_w, node_h),
            strategy,
        });
    }

    PlacementPlan {
        baselines,
        placements,
    }
}
