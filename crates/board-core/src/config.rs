//! Layout constants for node placement.
//!
//! The constants are exposed both as plain `pub const` values and as a
//! `LayoutConfig` object, so hosts can override a subset from JSON.

use serde::{Deserialize, Serialize};

// ─── Defaults ─────────────────────────────────────────────────────────────

/// Default rendered width of a canvas node, in px.
pub const NODE_WIDTH: f32 = 340.0;
/// Height assumed for a node whose size has not been measured yet.
pub const NODE_HEIGHT_FALLBACK: f32 = 188.0;
/// Minimum gap kept between neighbouring nodes.
pub const PLACEMENT_GAP: f32 = 20.0;
/// Traffic-source cards render taller than the generic card.
pub const TRAFFIC_NODE_HEIGHT_ESTIMATE: f32 = 260.0;
/// Default sticky-note width.
pub const STICKY_NOTE_WIDTH: f32 = 240.0;
/// Height assumed for a freshly created sticky note.
pub const STICKY_NOTE_HEIGHT_ESTIMATE: f32 = 200.0;
/// Vertical distance between the shelf and the topmost placed node.
pub const SHELF_LIFT: f32 = 120.0;
/// Outermost ring visited by the free-spot search.
pub const MAX_RING: u32 = 4;
/// Largest `maxRing` a config may ask for. Ring 16 alone is 128 cells.
pub const MAX_RING_LIMIT: u32 = 16;

// ─── Config ───────────────────────────────────────────────────────────────

/// Layout configuration consumed by every placement calculator.
///
/// Missing JSON fields fall back to the defaults above.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub node_width: f32,
    pub node_height_fallback: f32,
    pub placement_gap: f32,
    pub traffic_node_height_estimate: f32,
    pub sticky_note_width: f32,
    pub sticky_note_height_estimate: f32,
    pub shelf_lift: f32,
    pub max_ring: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: NODE_WIDTH,
            node_height_fallback: NODE_HEIGHT_FALLBACK,
            placement_gap: PLACEMENT_GAP,
            traffic_node_height_estimate: TRAFFIC_NODE_HEIGHT_ESTIMATE,
            sticky_note_width: STICKY_NOTE_WIDTH,
            sticky_note_height_estimate: STICKY_NOTE_HEIGHT_ESTIMATE,
            shelf_lift: SHELF_LIFT,
            max_ring: MAX_RING,
        }
    }
}

impl LayoutConfig {
    /// Parse a (possibly partial) JSON override.
    ///
    /// # Errors
    /// Returns a message if the JSON is malformed, a size is negative or
    /// `maxRing` exceeds [`MAX_RING_LIMIT`].
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: LayoutConfig =
            serde_json::from_str(json).map_err(|e| format!("invalid layout config: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the calculators cannot work with.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("nodeWidth", self.node_width),
            ("nodeHeightFallback", self.node_height_fallback),
            ("placementGap", self.placement_gap),
            ("trafficNodeHeightEstimate", self.traffic_node_height_estimate),
            ("stickyNoteWidth", self.sticky_note_width),
            ("stickyNoteHeightEstimate", self.sticky_note_height_estimate),
            ("shelfLift", self.shelf_lift),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("invalid layout config: `{name}` must be >= 0, got {value}"));
            }
        }
        if self.max_ring > MAX_RING_LIMIT {
            return Err(format!(
                "invalid layout config: `maxRing` must be <= {MAX_RING_LIMIT}, got {}",
                self.max_ring
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = LayoutConfig::from_json(r#"{ "placementGap": 32 }"#).unwrap();
        assert_eq!(config.placement_gap, 32.0);
        assert_eq!(config.node_width, NODE_WIDTH);
        assert_eq!(config.max_ring, MAX_RING);
    }

    #[test]
    fn negative_values_are_rejected() {
        let err = LayoutConfig::from_json(r#"{ "nodeWidth": -1 }"#).unwrap_err();
        assert!(err.contains("nodeWidth"), "unexpected error: {err}");
    }

    #[test]
    fn ring_radius_is_capped() {
        let err = LayoutConfig::from_json(r#"{ "maxRing": 4294967295 }"#).unwrap_err();
        assert!(err.contains("maxRing"), "unexpected error: {err}");
        assert!(LayoutConfig::from_json(r#"{ "maxRing": 17 }"#).is_err());

        let widest = LayoutConfig::from_json(r#"{ "maxRing": 16 }"#).unwrap();
        assert_eq!(widest.max_ring, MAX_RING_LIMIT);
    }

    #[test]
    fn negative_ring_radius_is_a_parse_error() {
        assert!(LayoutConfig::from_json(r#"{ "maxRing": -1 }"#).is_err());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(LayoutConfig::from_json("{ nodeWidth: ").is_err());
    }
}
