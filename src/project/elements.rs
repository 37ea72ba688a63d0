//! Element records, one struct per content category.
//!
//! Field names follow the project files written by the editor, so records
//! deserialize directly from `blocks.json`, `items.json` and friends.

use crate::error::{PackError, Result};
use crate::types::{ArmorSlot, BlockFace, ModelLayer, RecipeKind, RightClickMode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Behaviour shared by all element records.
pub trait Element {
    /// The element's internal name, unique within its category.
    fn name(&self) -> &str;
}

/// Block-drop value meaning "drop the block itself".
pub const DROP_SELF: &str = "self";

/// A custom block placed through an item frame and rendered by an item display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub name: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    /// Vanilla block placed underneath the display entity.
    #[serde(rename = "baseBlock")]
    pub base_block: String,
    /// Texture path per face key ("0" = top .. "5" = bottom).
    #[serde(default)]
    pub textures: BTreeMap<String, PathBuf>,
    #[serde(rename = "placeSound", default)]
    pub place_sound: String,
    /// `self`, another element name, or a vanilla item.
    #[serde(rename = "blockDrop", default = "default_drop")]
    pub block_drop: String,
    #[serde(default)]
    pub directional: bool,
    /// A model selector ("vanilla", "custom") or a path to a custom model JSON.
    #[serde(default = "default_block_model")]
    pub model: String,
}

fn default_drop() -> String {
    DROP_SELF.to_string()
}

fn default_block_model() -> String {
    "vanilla".to_string()
}

impl Block {
    /// Path of the custom model JSON, if the block uses one.
    pub fn custom_model(&self) -> Option<&Path> {
        custom_model_path(&self.model)
    }

    /// Texture for a face, if one was supplied.
    pub fn texture(&self, face: BlockFace) -> Option<&Path> {
        self.textures.get(face.key()).map(|p| p.as_path())
    }

    /// Supplied face textures in face order.
    pub fn face_textures(&self) -> Vec<(BlockFace, &Path)> {
        BlockFace::ALL
            .iter()
            .filter_map(|face| self.texture(*face).map(|path| (*face, path)))
            .collect()
    }

    /// Whether the block drops itself when broken.
    pub fn drops_self(&self) -> bool {
        self.block_drop.is_empty() || self.block_drop == DROP_SELF
    }
}

impl Element for Block {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Right-click behaviour attached to an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RightClick {
    pub enabled: bool,
    /// Function body run on use.
    #[serde(default)]
    pub function: String,
    pub mode: RightClickMode,
}

impl Default for RightClick {
    fn default() -> Self {
        Self {
            enabled: false,
            function: String::new(),
            mode: RightClickMode::Impulse,
        }
    }
}

/// A custom item built on a vanilla base item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(rename = "baseItem")]
    pub base_item: String,
    pub texture: PathBuf,
    /// A vanilla parent model ("generated", "handheld") or a path to a custom model JSON.
    #[serde(default = "default_item_model")]
    pub model: String,
    #[serde(rename = "stackSize", default = "default_stack_size")]
    pub stack_size: u32,
    #[serde(rename = "rightClick", default)]
    pub right_click: RightClick,
}

fn default_item_model() -> String {
    "generated".to_string()
}

fn default_stack_size() -> u32 {
    64
}

impl Item {
    /// Path of the custom model JSON, if the item uses one.
    pub fn custom_model(&self) -> Option<&Path> {
        custom_model_path(&self.model)
    }

    /// Whether right-click handling uses a cooldown objective.
    pub fn uses_cooldown(&self) -> bool {
        self.right_click.enabled && self.right_click.mode == RightClickMode::Impulse
    }
}

impl Element for Item {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Recipe slot ids.
pub mod slot {
    /// Last slot of the 3x3 crafting grid (slots 0..=8).
    pub const GRID_LAST: u8 = 8;
    pub const CRAFTING_OUTPUT: u8 = 9;
    pub const COOKING_INPUT: u8 = 10;
    pub const COOKING_OUTPUT: u8 = 11;
    pub const STONECUTTING_INPUT: u8 = 12;
    pub const STONECUTTING_OUTPUT: u8 = 13;
}

/// A crafting, cooking or stonecutting recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    /// Sparse slot id -> ingredient name mapping.
    #[serde(default)]
    pub items: BTreeMap<String, String>,
    #[serde(rename = "outputCount", default = "default_count")]
    pub output_count: u32,
    /// Stonecutting output count.
    #[serde(rename = "outputCount2", default = "default_count")]
    pub output_count2: u32,
    /// Shaped when set; shapeless otherwise.
    #[serde(default)]
    pub exact: bool,
    #[serde(default)]
    pub shapeless: bool,
    #[serde(rename = "type")]
    pub kind: RecipeKind,
}

fn default_count() -> u32 {
    1
}

impl Recipe {
    /// The ingredient in a slot; empty slots read as absent.
    pub fn slot(&self, id: u8) -> Option<&str> {
        self.items
            .get(&id.to_string())
            .map(|s| s.as_str())
            .filter(|s| !s.is_empty())
    }

    /// The ingredient in a slot the recipe kind requires.
    pub fn required_slot(&self, id: u8) -> Result<&str> {
        self.slot(id)
            .ok_or_else(|| PackError::missing_field(&self.name, &format!("items.{}", id)))
    }

    /// Filled crafting-grid slots in slot order.
    pub fn grid(&self) -> Vec<(u8, &str)> {
        (0..=slot::GRID_LAST)
            .filter_map(|id| self.slot(id).map(|name| (id, name)))
            .collect()
    }
}

impl Element for Recipe {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A painting variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Painting {
    pub name: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    /// Width in blocks.
    pub width: u32,
    /// Height in blocks.
    pub height: u32,
    #[serde(default)]
    pub placeable: bool,
    pub texture: PathBuf,
}

impl Element for Painting {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A jigsaw structure generated from a single structure template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub name: String,
    /// Path to the `.nbt` structure template.
    pub structure: PathBuf,
    /// Generation step label ("Surface structures").
    pub step: String,
    pub terrain_adaptation: String,
    pub start_height: i32,
    /// Project-start-to-heightmap label.
    pub psth: String,
    pub spacing: u32,
    pub seperation: u32,
    #[serde(default)]
    pub biomes: Vec<String>,
}

impl Element for Structure {
    fn name(&self) -> &str {
        &self.name
    }
}

/// An armor set that fans out into up to five derived items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub name: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    /// Armor points per slot.
    #[serde(default)]
    pub armor: BTreeMap<ArmorSlot, f64>,
    #[serde(default)]
    pub toughness: f64,
    #[serde(default)]
    pub kb_resistance: f64,
    #[serde(default)]
    pub durability: BTreeMap<ArmorSlot, u32>,
    /// Item icon per slot ("helmet" .. "boots", optional "horseArmor").
    ///
    /// Unset textures may be stored as `null`.
    #[serde(rename = "itemTextures", default)]
    pub item_textures: BTreeMap<String, Option<PathBuf>>,
    /// Worn textures ("h", "h_l", optional "horseArmor").
    #[serde(rename = "modelTextures", default)]
    pub model_textures: BTreeMap<String, Option<PathBuf>>,
    #[serde(rename = "includeHorse", default)]
    pub include_horse: bool,
}

impl Equipment {
    /// Per-slot durability derived from the chestplate durability.
    pub fn derive_durability(base: u32) -> BTreeMap<ArmorSlot, u32> {
        ArmorSlot::ALL
            .iter()
            .map(|slot| (*slot, slot.durability(base)))
            .collect()
    }

    /// Derived item slots: the four humanoid pieces, plus horse armor when enabled.
    pub fn slots(&self) -> Vec<ArmorSlot> {
        if self.include_horse {
            ArmorSlot::ALL.to_vec()
        } else {
            ArmorSlot::HUMANOID.to_vec()
        }
    }

    /// Whether this set produces a piece for the slot.
    pub fn has_slot(&self, slot: ArmorSlot) -> bool {
        slot != ArmorSlot::HorseArmor || self.include_horse
    }

    /// Name of the derived item for a slot (`{name}_{slot}`).
    pub fn derived_name(&self, slot: ArmorSlot) -> String {
        format!("{}_{}", self.name, slot.suffix())
    }

    pub fn armor(&self, slot: ArmorSlot) -> f64 {
        self.armor.get(&slot).copied().unwrap_or(0.0)
    }

    /// Durability of a piece. Horse armor is always 1.
    pub fn durability(&self, slot: ArmorSlot) -> Result<u32> {
        match slot {
            ArmorSlot::HorseArmor => Ok(1),
            _ => self.durability.get(&slot).copied().ok_or_else(|| {
                PackError::missing_field(&self.name, &format!("durability.{}", slot.suffix()))
            }),
        }
    }

    /// Item icon texture of a produced slot.
    pub fn item_texture(&self, slot: ArmorSlot) -> Result<&Path> {
        self.item_textures
            .get(slot.texture_key())
            .and_then(|p| p.as_deref())
            .ok_or_else(|| {
                PackError::missing_field(&self.name, &format!("itemTextures.{}", slot.texture_key()))
            })
    }

    /// Worn texture layers this set produces.
    ///
    /// The horse body layer is only read when horse armor is enabled.
    pub fn model_layers(&self) -> Result<Vec<(ModelLayer, &Path)>> {
        let mut layers = vec![ModelLayer::Humanoid, ModelLayer::HumanoidLeggings];
        if self.include_horse {
            layers.push(ModelLayer::HorseBody);
        }
        layers
            .into_iter()
            .map(|layer| {
                self.model_textures
                    .get(layer.key())
                    .and_then(|path| path.as_deref())
                    .map(|path| (layer, path))
                    .ok_or_else(|| {
                        PackError::missing_field(&self.name, &format!("modelTextures.{}", layer.key()))
                    })
            })
            .collect()
    }
}

impl Element for Equipment {
    fn name(&self) -> &str {
        &self.name
    }
}

fn custom_model_path(model: &str) -> Option<&Path> {
    if model.ends_with(".json") {
        Some(Path::new(model))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_block_record() {
        let json = r#"{
            "name": "ruby_ore",
            "displayName": "Ruby Ore",
            "baseBlock": "stone",
            "textures": {"0": "assets/blocks/ruby_top.png", "5": "assets/blocks/ruby_bottom.png"},
            "placeSound": "block.stone.place",
            "blockDrop": "ruby",
            "directional": false,
            "model": "Vanilla"
        }"#;

        let block: Block = serde_json::from_str(json).unwrap();
        assert_eq!(block.display_name, "Ruby Ore");
        assert_eq!(block.face_textures().len(), 2);
        assert_eq!(block.face_textures()[0].0, BlockFace::Top);
        assert!(block.custom_model().is_none());
        assert!(!block.drops_self());
    }

    #[test]
    fn test_parse_item_record() {
        let json = r#"{
            "name": "wand",
            "displayName": "Wand",
            "baseItem": "stick",
            "texture": "assets/items/wand.png",
            "model": "handheld",
            "stackSize": 1,
            "rightClick": {"enabled": true, "function": "say hi", "mode": "impulse"}
        }"#;

        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.stack_size, 1);
        assert!(item.uses_cooldown());
    }

    #[test]
    fn test_recipe_slots() {
        let json = r#"{
            "name": "thing",
            "items": {"4": "diamond", "9": "ruby", "2": ""},
            "outputCount": 2,
            "outputCount2": 1,
            "exact": true,
            "shapeless": false,
            "type": "crafting"
        }"#;

        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.grid(), vec![(4, "diamond")]);
        assert_eq!(recipe.slot(slot::CRAFTING_OUTPUT), Some("ruby"));
        assert!(recipe.slot(2).is_none());
        assert!(matches!(
            recipe.required_slot(slot::COOKING_INPUT),
            Err(PackError::MissingField { .. })
        ));
    }

    #[test]
    fn test_equipment_slots_follow_horse_flag() {
        let mut equipment = Equipment {
            name: "emerald".to_string(),
            display_name: "Emerald".to_string(),
            armor: BTreeMap::new(),
            toughness: 0.0,
            kb_resistance: 0.0,
            durability: Equipment::derive_durability(100),
            item_textures: BTreeMap::new(),
            model_textures: BTreeMap::new(),
            include_horse: false,
        };

        assert_eq!(equipment.slots().len(), 4);
        assert!(!equipment.has_slot(ArmorSlot::HorseArmor));
        assert_eq!(equipment.derived_name(ArmorSlot::Boots), "emerald_boots");

        equipment.include_horse = true;
        assert_eq!(equipment.slots().len(), 5);
        assert_eq!(equipment.durability(ArmorSlot::HorseArmor).unwrap(), 1);
        assert_eq!(equipment.durability(ArmorSlot::Boots).unwrap(), 81);
    }

    #[test]
    fn test_missing_durability_is_an_error() {
        let mut durability = Equipment::derive_durability(100);
        durability.remove(&ArmorSlot::Leggings);
        durability.remove(&ArmorSlot::HorseArmor);
        let equipment = Equipment {
            name: "emerald".to_string(),
            display_name: "Emerald".to_string(),
            armor: BTreeMap::new(),
            toughness: 0.0,
            kb_resistance: 0.0,
            durability,
            item_textures: BTreeMap::new(),
            model_textures: BTreeMap::new(),
            include_horse: true,
        };

        match equipment.durability(ArmorSlot::Leggings) {
            Err(PackError::MissingField { field, .. }) => assert_eq!(field, "durability.leggings"),
            other => panic!("expected missing field, got {:?}", other),
        }
        assert_eq!(equipment.durability(ArmorSlot::HorseArmor).unwrap(), 1);
        assert_eq!(equipment.durability(ArmorSlot::Helmet).unwrap(), 68);
    }

    #[test]
    fn test_derive_durability() {
        let durability = Equipment::derive_durability(100);
        assert_eq!(durability[&ArmorSlot::Helmet], 68);
        assert_eq!(durability[&ArmorSlot::Chestplate], 100);
        assert_eq!(durability[&ArmorSlot::Leggings], 93);
        assert_eq!(durability[&ArmorSlot::Boots], 81);
        assert_eq!(durability[&ArmorSlot::HorseArmor], 1);
    }

    #[test]
    fn test_model_layers_skip_horse_when_disabled() {
        let equipment = Equipment {
            name: "emerald".to_string(),
            display_name: "Emerald".to_string(),
            armor: BTreeMap::new(),
            toughness: 0.0,
            kb_resistance: 0.0,
            durability: BTreeMap::new(),
            item_textures: BTreeMap::new(),
            model_textures: [
                ("h".to_string(), Some(PathBuf::from("h.png"))),
                ("h_l".to_string(), Some(PathBuf::from("h_l.png"))),
                ("horseArmor".to_string(), None),
            ]
            .into_iter()
            .collect(),
            include_horse: false,
        };

        let layers = equipment.model_layers().unwrap();
        assert_eq!(layers.len(), 2);
        assert!(matches!(
            equipment.item_texture(ArmorSlot::Helmet),
            Err(PackError::MissingField { .. })
        ));
    }
}
