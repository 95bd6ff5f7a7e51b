//! Rectangle overlap tests and the ring-based free-spot search.
//!
//! The search walks square rings of grid cells around a preferred origin.
//! Cell size is the node size plus the gap, so two neighbouring candidates
//! never overlap each other. Scan order is fixed (ring by ring, `dx` outer,
//! `dy` inner) so identical inputs always produce identical placements.

use crate::config::{MAX_RING, MAX_RING_LIMIT};
use crate::model::{Point, Rect};
use smallvec::SmallVec;

/// AABB overlap test with `gap` of padding between the two rectangles.
///
/// Symmetric in `a` and `b`. Rectangles that only touch at the padded edge
/// do not overlap.
pub fn rects_overlap(a: &Rect, b: &Rect, gap: f32) -> bool {
    a.x < b.x + b.w + gap
        && a.x + a.w + gap > b.x
        && a.y < b.y + b.h + gap
        && a.y + a.h + gap > b.y
}

/// `true` if `candidate` overlaps any rectangle in `occupied`.
pub fn overlaps_any(candidate: &Rect, occupied: &[Rect], gap: f32) -> bool {
    occupied.iter().any(|r| rects_overlap(candidate, r, gap))
}

/// Cells on the perimeter of ring `k`, in scan order.
fn ring_cells(k: i32) -> SmallVec<[(i32, i32); 32]> {
    let mut cells = SmallVec::new();
    for dx in -k..=k {
        for dy in -k..=k {
            if dx.abs() == k || dy.abs() == k {
                cells.push((dx, dy));
            }
        }
    }
    cells
}

/// Find the nearest free position for a `node_w × node_h` node around
/// `preferred`, searching up to `MAX_RING` rings.
pub fn find_free_spot(
    preferred: Point,
    occupied: &[Rect],
    node_w: f32,
    node_h: f32,
    gap: f32,
) -> Point {
    find_free_spot_with_radius(preferred, occupied, node_w, node_h, gap, MAX_RING)
}

/// Same as [`find_free_spot`] with an explicit ring radius.
///
/// `max_ring` is clamped to [`MAX_RING_LIMIT`]. Never fails: when every
/// cell up to that ring is taken the result is `preferred` shifted right by
/// one step past the last ring, even if that spot overlaps something.
pub fn find_free_spot_with_radius(
    preferred: Point,
    occupied: &[Rect],
    node_w: f32,
    node_h: f32,
    gap: f32,
    max_ring: u32,
) -> Point {
    let step_x = node_w + gap;
    let step_y = node_h + gap;
    let rings = i32::try_from(max_ring.min(MAX_RING_LIMIT)).unwrap_or_default();

    for k in 0..=rings {
        for (dx, dy) in ring_cells(k) {
            let candidate = preferred.offset(dx as f32 * step_x, dy as f32 * step_y);
            let rect = Rect::from_origin_size(candidate, node_w, node_h);
            if !overlaps_any(&rect, occupied, gap) {
                if k > 0 {
                    log::trace!(
                        "free spot at ring {k} ({dx}, {dy}) -> ({}, {})",
                        candidate.x,
                        candidate.y
                    );
                }
                return candidate;
            }
        }
    }

    let fallback = preferred.offset((rings + 1) as f32 * step_x, 0.0);
    log::debug!(
        "free-spot search exhausted around ({}, {}); falling back to ({}, {})",
        preferred.x,
        preferred.y,
        fallback.x,
        fallback.y
    );
    fallback
}
