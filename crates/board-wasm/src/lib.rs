//! WASM bridge for the idea board — exposes the placement engine and the
//! canvas store to the web canvas.
//!
//! Compiled via `wasm-pack build --target web`. All structured data crosses
//! the boundary as JSON strings.

use board_core::id::NodeId;
use board_core::model::{CanvasNode, PendingNode, Point};
use board_core::{CanvasSnapshot, LayoutConfig, lint_canvas};
use board_editor::commands::CommandStack;
use board_editor::store::BoardStore;
use wasm_bindgen::prelude::*;

/// The JS-facing board controller.
///
/// Holds the store and the undo stack. The host pushes document-store
/// updates in with `set_nodes_json` and reads committed nodes back out.
#[wasm_bindgen]
pub struct BoardCanvas {
    store: BoardStore,
    commands: CommandStack,
}

#[wasm_bindgen]
impl BoardCanvas {
    #[wasm_bindgen(constructor)]
    pub fn new(center_x: f32, center_y: f32) -> Self {
        console_error_panic_hook_setup();
        Self {
            store: BoardStore::new(LayoutConfig::default(), Point::new(center_x, center_y)),
            commands: CommandStack::new(200),
        }
    }

    /// Override layout constants from (partial) JSON. Returns `false` on error.
    pub fn set_config_json(&mut self, json: &str) -> bool {
        match LayoutConfig::from_json(json) {
            Ok(config) => {
                self.store.config = config;
                true
            }
            Err(e) => {
                log::warn!("{e}");
                false
            }
        }
    }

    pub fn set_viewport_center(&mut self, x: f32, y: f32) {
        self.store.viewport_center = Point::new(x, y);
    }

    /// Replace the placed nodes with the document store's current list.
    /// Returns `false` if the JSON does not parse.
    pub fn set_nodes_json(&mut self, json: &str) -> bool {
        match serde_json::from_str::<Vec<CanvasNode>>(json) {
            Ok(nodes) => {
                self.store.replace_nodes(nodes);
                true
            }
            Err(e) => {
                log::warn!("invalid node list: {e}");
                false
            }
        }
    }

    pub fn nodes_json(&self) -> String {
        serde_json::to_string(&self.store.nodes).unwrap_or_else(|_| "[]".to_string())
    }

    /// Pointer moved over the canvas (world coordinates).
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.store.pointer_moved(Point::new(x, y));
    }

    /// Explicit hover from the node component; empty id clears it.
    pub fn hover(&mut self, id: &str) {
        let id = (!id.is_empty()).then(|| NodeId::intern(id));
        self.store.hover(id);
    }

    pub fn set_pending_width(&mut self, id: &str, width: f32) {
        self.store.set_pending_width(NodeId::intern(id), width);
    }

    pub fn set_pending_displacement(&mut self, id: &str, dx: f32) {
        self.store.set_pending_displacement(NodeId::intern(id), dx);
    }

    /// Commit in-flight resizes/shifts. Returns how many were applied.
    pub fn settle_pending_layout(&mut self) -> usize {
        self.commands.settle_pending_layout(&mut self.store)
    }

    /// Report a rendered node size from the measurement layer.
    pub fn measure_node(&mut self, id: &str, width: f32, height: f32) -> bool {
        self.store
            .measure_node(NodeId::intern(id), width, height)
            .is_some()
    }

    /// Place pending nodes (JSON array) and commit them as one undo step.
    /// Returns `{"ok":true,"plan":...}` or `{"ok":false,"error":"..."}`.
    pub fn place_pending_json(&mut self, json: &str) -> String {
        let pending: Vec<PendingNode> = match serde_json::from_str(json) {
            Ok(p) => p,
            Err(e) => return error_json(&format!("invalid pending nodes: {e}")),
        };
        let plan = self
            .commands
            .execute_placement(&mut self.store, pending, "place nodes");
        match serde_json::to_value(&plan) {
            Ok(plan) => serde_json::json!({ "ok": true, "plan": plan }).to_string(),
            Err(e) => error_json(&format!("Serialization error: {e}")),
        }
    }

    /// Undo the last command. Returns its description, or empty string.
    pub fn undo(&mut self) -> String {
        self.commands.undo(&mut self.store).unwrap_or_default()
    }

    pub fn redo(&mut self) -> String {
        self.commands.redo(&mut self.store).unwrap_or_default()
    }

    pub fn can_undo(&self) -> bool {
        self.commands.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.commands.can_redo()
    }

    /// Crowding diagnostics for the current board as a JSON array.
    pub fn lint_json(&self) -> String {
        let diags = lint_canvas(&self.store.nodes, &self.store.config);
        serde_json::to_string(&diags).unwrap_or_else(|_| "[]".to_string())
    }
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Board WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

fn error_json(message: &str) -> String {
    serde_json::json!({ "ok": false, "error": message }).to_string()
}

// ─── Standalone functions (no board state needed) ────────────────────────

/// Run one placement pass over a snapshot without committing anything.
/// Returns `{"ok":true,"plan":...}` or `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn plan_snapshot(json: &str) -> String {
    let snapshot = match CanvasSnapshot::from_json(json) {
        Ok(s) => s,
        Err(e) => return error_json(&e),
    };
    let plan = snapshot.plan(&LayoutConfig::default());
    match serde_json::to_value(&plan) {
        Ok(plan) => serde_json::json!({ "ok": true, "plan": plan }).to_string(),
        Err(e) => error_json(&format!("Serialization error: {e}")),
    }
}
