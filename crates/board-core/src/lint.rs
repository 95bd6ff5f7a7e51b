//! Crowding diagnostics for a board.
//!
//! The free-spot search is allowed to give up and return an overlapping
//! position. These checks surface that outcome (and near misses) without
//! touching the board.

use crate::collision::rects_overlap;
use crate::config::LayoutConfig;
use crate::id::NodeId;
use crate::model::CanvasNode;
use serde::Serialize;

// ─── Diagnostic types ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CrowdingSeverity {
    /// Two nodes cover each other.
    Warning,
    /// Nodes closer than the placement gap.
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrowdingDiagnostic {
    pub node_id: NodeId,
    pub other_id: NodeId,
    pub message: String,
    pub severity: CrowdingSeverity,
    /// Short rule identifier ("overlap", "tight-gap").
    pub rule: &'static str,
}

// ─── Public API ───────────────────────────────────────────────────────────

/// Check every pair of placed nodes. Each pair is reported at most once,
/// in board order.
#[must_use]
pub fn lint_canvas(nodes: &[CanvasNode], config: &LayoutConfig) -> Vec<CrowdingDiagnostic> {
    let rects: Vec<_> = nodes.iter().map(|n| n.rect(config)).collect();
    let mut diags = Vec::new();

    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            let (a, b) = (&nodes[i], &nodes[j]);
            if rects_overlap(&rects[i], &rects[j], 0.0) {
                diags.push(CrowdingDiagnostic {
                    node_id: a.id,
                    other_id: b.id,
                    message: format!("`{}` overlaps `{}`.", a.id, b.id),
                    severity: CrowdingSeverity::Warning,
                    rule: "overlap",
                });
            } else if rects_overlap(&rects[i], &rects[j], config.placement_gap) {
                diags.push(CrowdingDiagnostic {
                    node_id: a.id,
                    other_id: b.id,
                    message: format!(
                        "`{}` is closer than {}px to `{}`.",
                        a.id, config.placement_gap, b.id
                    ),
                    severity: CrowdingSeverity::Info,
                    rule: "tight-gap",
                });
            }
        }
    }

    if !diags.is_empty() {
        log::debug!("crowding lint: {} finding(s)", diags.len());
    }
    diags
}
