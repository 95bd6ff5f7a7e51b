//! Interned identifiers for board documents.
//!
//! Canvas nodes and the videos they show are both keyed by document-store
//! strings, but they live in different keyspaces: a traffic-source node
//! points at a *video*, never at another node. `NodeId` and `VideoId` keep
//! the two apart while sharing one interner.

use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global interner for document-store keys.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Key of a node document on the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Spur);

/// YouTube video id a node shows or was derived from.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct VideoId(Spur);

impl NodeId {
    pub fn intern(key: &str) -> Self {
        NodeId(INTERNER.get_or_intern(key))
    }

    /// The document-store key, exactly as it was interned.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }
}

impl VideoId {
    pub fn intern(video_id: &str) -> Self {
        VideoId(INTERNER.get_or_intern(video_id))
    }

    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node:{}", self.as_str())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "video:{}", self.as_str())
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Both ids travel as the bare store key so node documents deserialize as-is.

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Ok(NodeId::intern(&key))
    }
}

impl Serialize for VideoId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for VideoId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Ok(VideoId::intern(&key))
    }
}
