pub mod collision;
pub mod config;
pub mod id;
pub mod lint;
pub mod model;
pub mod placement;
pub mod plan;
pub mod snapshot;

pub use collision::{find_free_spot, rects_overlap};
pub use config::LayoutConfig;
pub use id::{NodeId, VideoId};
pub use lint::{CrowdingDiagnostic, CrowdingSeverity, lint_canvas};
pub use model::*;
pub use placement::PlacementBaselines;
pub use plan::{Placement, PlacementContext, PlacementPlan, PlacementStrategy, place_pending};
pub use snapshot::CanvasSnapshot;
