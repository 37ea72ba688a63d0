//! Shared types used throughout the library.

mod armor;
mod face;
mod worldgen;

pub use armor::{ArmorSlot, ModelLayer};
pub use face::BlockFace;
pub use worldgen::{label_to_id, Heightmap};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Recipe kinds the recipe generator dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeKind {
    Crafting,
    Smelting,
    Blasting,
    Smoking,
    CampfireCooking,
    Stonecutting,
}

impl RecipeKind {
    /// The recipe type id without namespace.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecipeKind::Crafting => "crafting",
            RecipeKind::Smelting => "smelting",
            RecipeKind::Blasting => "blasting",
            RecipeKind::Smoking => "smoking",
            RecipeKind::CampfireCooking => "campfire_cooking",
            RecipeKind::Stonecutting => "stonecutting",
        }
    }

    /// Vanilla default cooking time in ticks.
    pub fn cooking_time(&self) -> u32 {
        match self {
            RecipeKind::Blasting | RecipeKind::Smoking => 100,
            RecipeKind::CampfireCooking => 600,
            _ => 200,
        }
    }
}

/// How a right-click item fires its function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RightClickMode {
    /// Fires once per use, then waits for the item to be released.
    Impulse,
    /// Fires every tick while the item is in use.
    Continuous,
}

impl RightClickMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RightClickMode::Impulse => "impulse",
            RightClickMode::Continuous => "continuous",
        }
    }
}

/// File name of a path without its extension ("textures/Ruby.png" -> "Ruby").
pub fn file_stem(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|s| s.to_str())
}

/// Qualify a bare name with a namespace; names that already carry one are kept.
pub fn qualify(namespace: &str, name: &str) -> String {
    if name.contains(':') {
        name.to_string()
    } else {
        format!("{}:{}", namespace, name)
    }
}
