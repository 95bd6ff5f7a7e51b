//! Serialized placement requests.
//!
//! A `CanvasSnapshot` is everything one pass needs: the placed nodes, the
//! nodes waiting for a position, and the pointer/pending-layout context.
//! JSON is used by the CLI and the web bridge; MessagePack by hosts that
//! ship snapshots between workers.

use crate::config::LayoutConfig;
use crate::model::{CanvasNode, PendingNode};
use crate::plan::{PlacementContext, PlacementPlan, place_pending};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSnapshot {
    pub nodes: Vec<CanvasNode>,
    pub pending: Vec<PendingNode>,
    pub context: PlacementContext,
}

impl CanvasSnapshot {
    /// # Errors
    /// Returns a message describing the first JSON error.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("invalid canvas snapshot: {e}"))
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| format!("snapshot serialization error: {e}"))
    }

    /// # Errors
    /// Returns a message if the bytes are not a MessagePack snapshot.
    pub fn from_msgpack(bytes: &[u8]) -> Result<Self, String> {
        rmp_serde::from_slice(bytes).map_err(|e| format!("invalid canvas snapshot: {e}"))
    }

    /// Encode with field names, so optional fields can be omitted.
    pub fn to_msgpack(&self) -> Result<Vec<u8>, String> {
        rmp_serde::to_vec_named(self).map_err(|e| format!("snapshot serialization error: {e}"))
    }

    /// Run one placement pass over this snapshot.
    pub fn plan(&self, config: &LayoutConfig) -> PlacementPlan {
        place_pending(&self.nodes, &self.pending, &self.context, config)
    }
}
