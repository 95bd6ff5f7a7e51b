//! Canvas data model consumed by the placement engine.
//!
//! Nodes are owned by the canvas store; the engine only reads them. Geometry
//! is in canvas-world pixels, `y` growing downwards.

use crate::config::LayoutConfig;
use crate::id::{NodeId, VideoId};
use serde::{Deserialize, Serialize};

// ─── Geometry ─────────────────────────────────────────────────────────────

/// A position in canvas-world coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Translate by `(dx, dy)`.
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Width and height of a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub w: f32,
    pub h: f32,
}

impl Size {
    pub const fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }
}

/// Axis-aligned bounding box. Zero-area rects are valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_origin_size(origin: Point, w: f32, h: f32) -> Self {
        Self::new(origin.x, origin.y, w, h)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

// ─── Node payloads ────────────────────────────────────────────────────────

/// Which channel a video card belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ownership {
    Own,
    Competitor,
    #[default]
    Unknown,
}

/// Variant payload of a canvas node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum NodeData {
    /// A video on the board. Suggested videos point back at the video
    /// that surfaced them via `source_video_id`.
    VideoCard {
        video_id: VideoId,
        #[serde(default)]
        ownership: Ownership,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source_video_id: Option<VideoId>,
    },
    /// Traffic-source breakdown attached to one of the channel's videos.
    TrafficSource { source_video_id: VideoId },
    /// Free-floating annotation.
    StickyNote {
        #[serde(default)]
        text: String,
    },
    Generic,
}

/// Stable tag of a `NodeData` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeDataType {
    VideoCard,
    TrafficSource,
    StickyNote,
    Generic,
}

impl NodeDataType {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeDataType::VideoCard => "video-card",
            NodeDataType::TrafficSource => "traffic-source",
            NodeDataType::StickyNote => "sticky-note",
            NodeDataType::Generic => "generic",
        }
    }
}

impl NodeData {
    pub fn data_type(&self) -> NodeDataType {
        match self {
            NodeData::VideoCard { .. } => NodeDataType::VideoCard,
            NodeData::TrafficSource { .. } => NodeDataType::TrafficSource,
            NodeData::StickyNote { .. } => NodeDataType::StickyNote,
            NodeData::Generic => NodeDataType::Generic,
        }
    }

    /// The video this node was derived from, if any.
    pub fn source_video_id(&self) -> Option<VideoId> {
        match self {
            NodeData::VideoCard {
                source_video_id, ..
            } => *source_video_id,
            NodeData::TrafficSource { source_video_id } => Some(*source_video_id),
            _ => None,
        }
    }

    /// The video this node itself shows.
    pub fn video_id(&self) -> Option<VideoId> {
        match self {
            NodeData::VideoCard { video_id, .. } => Some(*video_id),
            _ => None,
        }
    }

    pub fn ownership(&self) -> Ownership {
        match self {
            NodeData::VideoCard { ownership, .. } => *ownership,
            _ => Ownership::Unknown,
        }
    }
}

// ─── Nodes ────────────────────────────────────────────────────────────────

/// A node already on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasNode {
    pub id: NodeId,
    pub position: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    pub data: NodeData,
}

impl CanvasNode {
    pub fn new(id: NodeId, position: Point, data: NodeData) -> Self {
        Self {
            id,
            position,
            size: None,
            data,
        }
    }

    pub fn with_size(mut self, w: f32, h: f32) -> Self {
        self.size = Some(Size::new(w, h));
        self
    }

    /// Width used for layout: own width, else the default node width.
    pub fn width(&self, config: &LayoutConfig) -> f32 {
        match self.size {
            Some(size) if size.w > 0.0 => size.w,
            _ => config.node_width,
        }
    }

    /// Height used for layout: own height, else the fallback height.
    pub fn height(&self, config: &LayoutConfig) -> f32 {
        match self.size {
            Some(size) if size.h > 0.0 => size.h,
            _ => config.node_height_fallback,
        }
    }

    /// The rectangle this node occupies on the canvas.
    pub fn rect(&self, config: &LayoutConfig) -> Rect {
        Rect::from_origin_size(self.position, self.width(config), self.height(config))
    }
}

/// A node waiting for the placement engine to give it a position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingNode {
    pub id: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    pub data: NodeData,
}

impl PendingNode {
    pub fn new(id: NodeId, data: NodeData) -> Self {
        Self {
            id,
            size: None,
            data,
        }
    }

    /// Width the node will be placed with. Sticky notes default narrower.
    pub fn width(&self, config: &LayoutConfig) -> f32 {
        match self.size {
            Some(size) if size.w > 0.0 => size.w,
            _ if self.data.data_type() == NodeDataType::StickyNote => config.sticky_note_width,
            _ => config.node_width,
        }
    }

    /// Turn into a placed node occupying `size` at `position`. The size is
    /// the box the engine reserved, so an unmeasured sticky note keeps its
    /// note dimensions instead of the generic card fallback.
    pub fn into_canvas_node(self, position: Point, size: Size) -> CanvasNode {
        CanvasNode {
            id: self.id,
            position,
            size: Some(size),
            data: self.data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn node_data_json_shape() {
        let json = r#"{ "type": "traffic-source", "sourceVideoId": "v1" }"#;
        let data: NodeData = serde_json::from_str(json).unwrap();
        assert_eq!(
            data,
            NodeData::TrafficSource {
                source_video_id: VideoId::intern("v1")
            }
        );
        assert_eq!(data.data_type().as_str(), "traffic-source");
        assert_eq!(data.source_video_id(), Some(VideoId::intern("v1")));
    }

    #[test]
    fn video_card_defaults_to_unknown_ownership() {
        let json = r#"{ "type": "video-card", "videoId": "abc" }"#;
        let data: NodeData = serde_json::from_str(json).unwrap();
        assert_eq!(data.ownership(), Ownership::Unknown);
        assert_eq!(data.video_id(), Some(VideoId::intern("abc")));
        assert_eq!(data.source_video_id(), None);
    }

    #[test]
    fn zero_height_falls_back() {
        let config = LayoutConfig::default();
        let node = CanvasNode::new(NodeId::intern("n"), Point::new(10.0, 20.0), NodeData::Generic)
            .with_size(100.0, 0.0);
        assert_eq!(
            node.rect(&config),
            Rect::new(10.0, 20.0, 100.0, config.node_height_fallback)
        );
    }

    #[test]
    fn pending_sticky_uses_sticky_width() {
        let config = LayoutConfig::default();
        let note = PendingNode::new(
            NodeId::intern("s"),
            NodeData::StickyNote {
                text: String::new(),
            },
        );
        assert_eq!(note.width(&config), config.sticky_note_width);
    }

    #[test]
    fn rect_contains_edges() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(!r.contains(Point::new(10.5, 5.0)));
    }
}
