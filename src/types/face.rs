//! Block face keys used by the per-face texture mapping.

use serde::{Deserialize, Serialize};

/// The six texture faces of a custom block, in editor order.
///
/// Project files key block textures by the face index as a string
/// (`"0"` = top through `"5"` = bottom).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockFace {
    Top,
    Left,
    Back,
    Right,
    Front,
    Bottom,
}

impl BlockFace {
    /// All six faces in index order.
    pub const ALL: [BlockFace; 6] = [
        BlockFace::Top,
        BlockFace::Left,
        BlockFace::Back,
        BlockFace::Right,
        BlockFace::Front,
        BlockFace::Bottom,
    ];

    /// Parse a face from its project-file key ("0" through "5").
    pub fn from_key(key: &str) -> Option<Self> {
        let index: usize = key.parse().ok()?;
        Self::ALL.get(index).copied()
    }

    /// The project-file key for this face.
    pub fn key(&self) -> &'static str {
        match self {
            BlockFace::Top => "0",
            BlockFace::Left => "1",
            BlockFace::Back => "2",
            BlockFace::Right => "3",
            BlockFace::Front => "4",
            BlockFace::Bottom => "5",
        }
    }

    /// The texture variable this face fills in a `block/cube` parent model.
    pub fn model_face(&self) -> &'static str {
        match self {
            BlockFace::Top => "up",
            BlockFace::Bottom => "down",
            BlockFace::Front => "north",
            BlockFace::Back => "south",
            BlockFace::Left => "west",
            BlockFace::Right => "east",
        }
    }
}
