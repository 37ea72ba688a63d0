//! World generation labels.

use serde::{Deserialize, Serialize};

/// Heightmap a jigsaw structure's start is projected onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Heightmap {
    MotionBlocking,
    MotionBlockingNoLeaves,
    OceanFloor,
    #[serde(rename = "OCEAN_FLOOR_WG")]
    OceanFloorWg,
    WorldSurface,
    #[serde(rename = "WORLD_SURFACE_WG")]
    WorldSurfaceWg,
}

impl Heightmap {
    /// Editor labels and their heightmaps.
    pub const LABELS: [(&'static str, Heightmap); 6] = [
        ("Motion blocking", Heightmap::MotionBlocking),
        ("Motion blocking no leaves", Heightmap::MotionBlockingNoLeaves),
        ("Ocean floor", Heightmap::OceanFloor),
        ("Ocean floor worldgen", Heightmap::OceanFloorWg),
        ("World surface", Heightmap::WorldSurface),
        ("World surface worldgen", Heightmap::WorldSurfaceWg),
    ];

    /// Look up a heightmap by its exact editor label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::LABELS
            .iter()
            .find(|(name, _)| *name == label)
            .map(|(_, heightmap)| *heightmap)
    }

    /// The engine constant written to `project_start_to_heightmap`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Heightmap::MotionBlocking => "MOTION_BLOCKING",
            Heightmap::MotionBlockingNoLeaves => "MOTION_BLOCKING_NO_LEAVES",
            Heightmap::OceanFloor => "OCEAN_FLOOR",
            Heightmap::OceanFloorWg => "OCEAN_FLOOR_WG",
            Heightmap::WorldSurface => "WORLD_SURFACE",
            Heightmap::WorldSurfaceWg => "WORLD_SURFACE_WG",
        }
    }
}

/// Normalize an editor label ("Surface Structures") to an engine id ("surface_structures").
pub fn label_to_id(label: &str) -> String {
    label.trim().replace(' ', "_").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heightmap_labels() {
        assert_eq!(
            Heightmap::from_label("Ocean floor worldgen").map(|h| h.as_str()),
            Some("OCEAN_FLOOR_WG")
        );
        assert_eq!(
            Heightmap::from_label("World surface").map(|h| h.as_str()),
            Some("WORLD_SURFACE")
        );
        assert_eq!(Heightmap::from_label("world surface"), None);
        assert_eq!(Heightmap::from_label("Sky"), None);
    }

    #[test]
    fn test_heightmap_serde_matches_constant() {
        for (_, heightmap) in Heightmap::LABELS {
            let json = serde_json::to_string(&heightmap).unwrap();
            assert_eq!(json, format!("\"{}\"", heightmap.as_str()));
        }
    }

    #[test]
    fn test_label_to_id() {
        assert_eq!(label_to_id("Surface Structures"), "surface_structures");
        assert_eq!(label_to_id("Beard Thin"), "beard_thin");
        assert_eq!(label_to_id("none"), "none");
    }
}
