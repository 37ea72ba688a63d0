//! Equipment slot and texture layer types.

use serde::{Deserialize, Serialize};

/// One derived item identity of an equipment set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmorSlot {
    Helmet,
    Chestplate,
    Leggings,
    Boots,
    HorseArmor,
}

impl ArmorSlot {
    /// The four humanoid slots every equipment set produces.
    pub const HUMANOID: [ArmorSlot; 4] = [
        ArmorSlot::Helmet,
        ArmorSlot::Chestplate,
        ArmorSlot::Leggings,
        ArmorSlot::Boots,
    ];

    /// All five slots, horse armor last.
    pub const ALL: [ArmorSlot; 5] = [
        ArmorSlot::Helmet,
        ArmorSlot::Chestplate,
        ArmorSlot::Leggings,
        ArmorSlot::Boots,
        ArmorSlot::HorseArmor,
    ];

    /// Suffix used in derived item names (`{equipment}_{suffix}`).
    pub fn suffix(&self) -> &'static str {
        match self {
            ArmorSlot::Helmet => "helmet",
            ArmorSlot::Chestplate => "chestplate",
            ArmorSlot::Leggings => "leggings",
            ArmorSlot::Boots => "boots",
            ArmorSlot::HorseArmor => "horse_armor",
        }
    }

    /// Key of this slot in the `itemTextures` mapping.
    pub fn texture_key(&self) -> &'static str {
        match self {
            ArmorSlot::HorseArmor => "horseArmor",
            other => other.suffix(),
        }
    }

    /// Human readable slot title appended to display names.
    pub fn title(&self) -> &'static str {
        match self {
            ArmorSlot::Helmet => "Helmet",
            ArmorSlot::Chestplate => "Chestplate",
            ArmorSlot::Leggings => "Leggings",
            ArmorSlot::Boots => "Boots",
            ArmorSlot::HorseArmor => "Horse Armor",
        }
    }

    /// Equipment slot name used by the `equippable` component.
    pub fn equip_slot(&self) -> &'static str {
        match self {
            ArmorSlot::Helmet => "head",
            ArmorSlot::Chestplate => "chest",
            ArmorSlot::Leggings => "legs",
            ArmorSlot::Boots => "feet",
            ArmorSlot::HorseArmor => "body",
        }
    }

    /// Vanilla item the derived piece is built on.
    pub fn base_item(&self) -> &'static str {
        match self {
            ArmorSlot::Helmet => "minecraft:iron_helmet",
            ArmorSlot::Chestplate => "minecraft:iron_chestplate",
            ArmorSlot::Leggings => "minecraft:iron_leggings",
            ArmorSlot::Boots => "minecraft:iron_boots",
            ArmorSlot::HorseArmor => "minecraft:iron_horse_armor",
        }
    }

    /// Durability of this piece for a given chestplate durability.
    ///
    /// Ratios follow vanilla armor; values truncate. Horse armor is always 1.
    pub fn durability(&self, base: u32) -> u32 {
        let base = f64::from(base);
        let value = match self {
            ArmorSlot::Helmet => base * 0.6875,
            ArmorSlot::Chestplate => base,
            ArmorSlot::Leggings => base * 0.9375,
            ArmorSlot::Boots => base * 0.8125,
            ArmorSlot::HorseArmor => return 1,
        };
        value as u32
    }
}

/// Entity texture layer of an equipment asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelLayer {
    Humanoid,
    HumanoidLeggings,
    HorseBody,
}

impl ModelLayer {
    /// The `modelTextures` key for this layer.
    pub fn key(&self) -> &'static str {
        match self {
            ModelLayer::Humanoid => "h",
            ModelLayer::HumanoidLeggings => "h_l",
            ModelLayer::HorseBody => "horseArmor",
        }
    }

    /// Directory under `textures/entity/equipment/`.
    pub fn directory(&self) -> &'static str {
        match self {
            ModelLayer::Humanoid => "humanoid",
            ModelLayer::HumanoidLeggings => "humanoid_leggings",
            ModelLayer::HorseBody => "horse_body",
        }
    }
}
