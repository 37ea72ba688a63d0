//! Vanilla reference data and project validation.
//!
//! Each supported game version ships a `{version}_data.json` listing the
//! valid vanilla identifiers, and a shared `version_list.json` maps versions
//! to pack format numbers.

use crate::error::{PackError, Result};
use crate::project::elements::slot;
use crate::project::{Element, Project};
use crate::resolve::{strip_vanilla, Resolver};
use crate::types::{BlockFace, Heightmap, RecipeKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Valid vanilla identifiers for one game version, without the `minecraft:` prefix.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VanillaCatalog {
    #[serde(default)]
    pub blocks: BTreeSet<String>,
    #[serde(default)]
    pub items: BTreeSet<String>,
    #[serde(default)]
    pub biomes: BTreeSet<String>,
    #[serde(default)]
    pub enchantments: BTreeSet<String>,
    #[serde(default)]
    pub effects: BTreeSet<String>,
    #[serde(default)]
    pub damage_types: BTreeSet<String>,
    #[serde(default)]
    pub sound_events: BTreeSet<String>,
    #[serde(default)]
    pub entities: BTreeSet<String>,
    #[serde(default)]
    pub game_events: BTreeSet<String>,
}

impl VanillaCatalog {
    /// Load a catalog from a `{version}_data.json` file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| PackError::io(path, e))?;
        let catalog: Self = serde_json::from_str(&contents)?;
        log::debug!(
            "Loaded catalog {}: {} blocks, {} items, {} biomes",
            path.display(),
            catalog.blocks.len(),
            catalog.items.len(),
            catalog.biomes.len()
        );
        Ok(catalog)
    }

    /// Load the catalog for a game version from a data directory.
    pub fn load_version<P: AsRef<Path>>(dir: P, version: &str) -> Result<Self> {
        Self::load(dir.as_ref().join(format!("{}_data.json", version)))
    }

    pub fn has_block(&self, name: &str) -> bool {
        self.blocks.contains(strip_vanilla(name))
    }

    pub fn has_item(&self, name: &str) -> bool {
        self.items.contains(strip_vanilla(name))
    }

    pub fn has_biome(&self, name: &str) -> bool {
        self.biomes.contains(strip_vanilla(name))
    }

    pub fn has_sound_event(&self, name: &str) -> bool {
        self.sound_events.contains(strip_vanilla(name))
    }
}

/// Supported game versions and their pack format numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VersionList {
    pub versions: Vec<String>,
    #[serde(default)]
    pub dataformat: BTreeMap<String, u32>,
    #[serde(default)]
    pub resourceformat: BTreeMap<String, u32>,
}

impl VersionList {
    /// Load `version_list.json`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| PackError::io(path, e))?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn supports(&self, version: &str) -> bool {
        self.versions.iter().any(|v| v == version)
    }

    /// Data and resource pack format numbers for a version.
    pub fn formats(&self, version: &str) -> Result<(u32, u32)> {
        let data = self.dataformat.get(version);
        let resource = self.resourceformat.get(version);
        match (data, resource) {
            (Some(data), Some(resource)) => Ok((*data, *resource)),
            _ => Err(PackError::Validation(format!(
                "no pack formats known for version '{}'",
                version
            ))),
        }
    }
}

const IDENTIFIER_CHARS: &str = "abcdefghijklmnopqrstuvwxyz_0123456789";
const DISPLAY_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz _-!0123456789";

const MAX_STACK_SIZE: u32 = 99;
const MAX_PAINTING_SIZE: u32 = 16;

fn check_chars(what: &str, value: &str, allowed: &str) -> Result<()> {
    if value.is_empty() {
        return Err(PackError::Validation(format!("{} is empty", what)));
    }
    if let Some(bad) = value.chars().find(|c| !allowed.contains(*c)) {
        return Err(PackError::Validation(format!(
            "{} '{}' contains invalid character '{}'",
            what, value, bad
        )));
    }
    Ok(())
}

/// Blocks, items and equipment pieces share the `items/` asset namespace.
fn check_item_names(project: &Project) -> Result<()> {
    for name in project.blocks.names() {
        if project.items.contains(name) {
            return Err(PackError::Validation(format!(
                "block '{}' and item '{}' share a name",
                name, name
            )));
        }
    }
    for (key, equipment) in project.equipment.iter() {
        for slot in equipment.slots() {
            let piece = equipment.derived_name(slot);
            let taken = if project.items.contains(&piece) {
                "item"
            } else if project.blocks.contains(&piece) {
                "block"
            } else {
                continue;
            };
            return Err(PackError::Validation(format!(
                "equipment '{}': piece '{}' collides with {} '{}'",
                key, piece, taken, piece
            )));
        }
    }
    Ok(())
}

fn check_name<T: Element>(category: &str, key: &str, element: &T) -> Result<()> {
    check_chars(&format!("{} name", category), element.name(), IDENTIFIER_CHARS)?;
    if key != element.name() {
        return Err(PackError::Validation(format!(
            "{} '{}' is stored under key '{}'",
            category,
            element.name(),
            key
        )));
    }
    Ok(())
}

impl Project {
    /// Check every element against the vanilla catalog.
    ///
    /// Returns the first problem found. Generation does not call this; it is
    /// the gate elements pass before they are handed to the pipeline.
    pub fn validate(&self, catalog: &VanillaCatalog) -> Result<()> {
        check_chars("Pack name", &self.details.name, DISPLAY_CHARS)?;
        check_chars("Namespace", &self.details.namespace, IDENTIFIER_CHARS)?;
        check_chars("Author", &self.details.author, IDENTIFIER_CHARS)?;

        check_item_names(self)?;
        let resolver = Resolver::new(self, Some(catalog));

        for (key, block) in self.blocks.iter() {
            check_name("Block", key, block)?;
            check_chars("Block display name", &block.display_name, DISPLAY_CHARS)?;
            if !catalog.has_block(&block.base_block) {
                return Err(PackError::Reference(format!(
                    "block '{}': unknown base block '{}'",
                    key, block.base_block
                )));
            }
            if let Some(face) = block.textures.keys().find(|k| BlockFace::from_key(k).is_none()) {
                return Err(PackError::Validation(format!(
                    "block '{}': unknown texture face '{}'",
                    key, face
                )));
            }
            if !block.place_sound.is_empty() && !catalog.has_sound_event(&block.place_sound) {
                return Err(PackError::Reference(format!(
                    "block '{}': unknown sound event '{}'",
                    key, block.place_sound
                )));
            }
            if !block.drops_self() {
                resolver.resolve(&block.block_drop)?;
            }
        }

        for (key, item) in self.items.iter() {
            check_name("Item", key, item)?;
            check_chars("Item display name", &item.display_name, DISPLAY_CHARS)?;
            if !catalog.has_item(&item.base_item) {
                return Err(PackError::Reference(format!(
                    "item '{}': unknown base item '{}'",
                    key, item.base_item
                )));
            }
            if !(1..=MAX_STACK_SIZE).contains(&item.stack_size) {
                return Err(PackError::Validation(format!(
                    "item '{}': stack size {} outside 1..={}",
                    key, item.stack_size, MAX_STACK_SIZE
                )));
            }
        }

        for (key, recipe) in self.recipes.iter() {
            check_name("Recipe", key, recipe)?;
            let slots: Vec<&str> = match recipe.kind {
                RecipeKind::Crafting => {
                    let grid = recipe.grid();
                    if grid.is_empty() {
                        return Err(PackError::missing_field(key, "items.0-8"));
                    }
                    let mut slots: Vec<&str> = grid.into_iter().map(|(_, name)| name).collect();
                    slots.push(recipe.required_slot(slot::CRAFTING_OUTPUT)?);
                    slots
                }
                RecipeKind::Stonecutting => vec![
                    recipe.required_slot(slot::STONECUTTING_INPUT)?,
                    recipe.required_slot(slot::STONECUTTING_OUTPUT)?,
                ],
                _ => vec![
                    recipe.required_slot(slot::COOKING_INPUT)?,
                    recipe.required_slot(slot::COOKING_OUTPUT)?,
                ],
            };
            for name in slots {
                resolver.resolve(name)?;
            }
        }

        for (key, painting) in self.paintings.iter() {
            check_name("Painting", key, painting)?;
            check_chars("Painting display name", &painting.display_name, DISPLAY_CHARS)?;
            for (what, size) in [("width", painting.width), ("height", painting.height)] {
                if !(1..=MAX_PAINTING_SIZE).contains(&size) {
                    return Err(PackError::Validation(format!(
                        "painting '{}': {} {} outside 1..={}",
                        key, what, size, MAX_PAINTING_SIZE
                    )));
                }
            }
        }

        for (key, structure) in self.structures.iter() {
            check_name("Structure", key, structure)?;
            if Heightmap::from_label(&structure.psth).is_none() {
                return Err(PackError::Reference(format!(
                    "structure '{}': unknown heightmap '{}'",
                    key, structure.psth
                )));
            }
            if structure.spacing <= structure.seperation {
                return Err(PackError::Validation(format!(
                    "structure '{}': spacing {} must exceed separation {}",
                    key, structure.spacing, structure.seperation
                )));
            }
            if let Some(biome) = structure.biomes.iter().find(|b| !catalog.has_biome(b)) {
                return Err(PackError::Reference(format!(
                    "structure '{}': unknown biome '{}'",
                    key, biome
                )));
            }
        }

        for (key, equipment) in self.equipment.iter() {
            check_name("Equipment", key, equipment)?;
            check_chars("Equipment display name", &equipment.display_name, DISPLAY_CHARS)?;
            for slot in equipment.slots() {
                equipment.item_texture(slot)?;
                equipment.durability(slot)?;
            }
            equipment.model_layers()?;

            let horse_item = equipment.item_textures.get("horseArmor").is_some_and(|t| t.is_some());
            let horse_model = equipment.model_textures.get("horseArmor").is_some_and(|t| t.is_some());
            if !equipment.include_horse && (horse_item || horse_model) {
                return Err(PackError::Validation(format!(
                    "equipment '{}': horse armor textures set without includeHorse",
                    key
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{Block, Equipment, Item, PackDetails, Painting, Recipe, RightClick, Structure};
    use crate::types::ArmorSlot;
    use std::path::PathBuf;

    fn catalog() -> VanillaCatalog {
        let set = |names: &[&str]| names.iter().map(|s| s.to_string()).collect();
        VanillaCatalog {
            blocks: set(&["stone", "oak_planks"]),
            items: set(&["stone", "diamond", "stick", "item_frame"]),
            biomes: set(&["plains", "desert"]),
            sound_events: set(&["block.stone.place"]),
            ..Default::default()
        }
    }

    fn project() -> Project {
        Project::new(PackDetails::new("Gem Pack", "gems", "joel"))
    }

    fn block(base: &str) -> Block {
        Block {
            name: "ruby_ore".to_string(),
            display_name: "Ruby Ore".to_string(),
            base_block: base.to_string(),
            textures: BTreeMap::new(),
            place_sound: "block.stone.place".to_string(),
            block_drop: "self".to_string(),
            directional: false,
            model: "vanilla".to_string(),
        }
    }

    #[test]
    fn test_load_catalog_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("1.21.11_data.json"),
            r#"{"blocks": ["stone"], "items": ["stick"], "biomes": ["plains"]}"#,
        )
        .unwrap();

        let catalog = VanillaCatalog::load_version(dir.path(), "1.21.11").unwrap();
        assert!(catalog.has_block("minecraft:stone"));
        assert!(catalog.has_item("stick"));
        assert!(catalog.effects.is_empty());
    }

    #[test]
    fn test_version_formats() {
        let list: VersionList = serde_json::from_str(
            r#"{
                "versions": ["1.21.11"],
                "dataformat": {"1.21.11": 94},
                "resourceformat": {"1.21.11": 75}
            }"#,
        )
        .unwrap();

        assert!(list.supports("1.21.11"));
        assert_eq!(list.formats("1.21.11").unwrap(), (94, 75));
        assert!(matches!(list.formats("1.8"), Err(PackError::Validation(_))));
    }

    #[test]
    fn test_valid_project_passes() {
        let mut project = project();
        project.blocks.upsert(block("stone"));
        assert!(project.validate(&catalog()).is_ok());
    }

    #[test]
    fn test_bad_namespace() {
        let project = Project::new(PackDetails::new("Gem Pack", "Gems", "joel"));
        assert!(matches!(project.validate(&catalog()), Err(PackError::Validation(_))));
    }

    #[test]
    fn test_unknown_base_block() {
        let mut project = project();
        project.blocks.upsert(block("bedrock_but_better"));
        assert!(matches!(project.validate(&catalog()), Err(PackError::Reference(_))));
    }

    #[test]
    fn test_recipe_ingredients_resolve() {
        let mut project = project();
        project.blocks.upsert(block("stone"));
        let mut recipe = Recipe {
            name: "ore_from_diamond".to_string(),
            items: [("4".to_string(), "diamond".to_string()), ("9".to_string(), "ruby_ore".to_string())]
                .into_iter()
                .collect(),
            output_count: 1,
            output_count2: 1,
            exact: true,
            shapeless: false,
            kind: RecipeKind::Crafting,
        };
        project.recipes.upsert(recipe.clone());
        assert!(project.validate(&catalog()).is_ok());

        recipe.items.insert("4".to_string(), "unobtainium".to_string());
        project.recipes.upsert(recipe);
        assert!(matches!(project.validate(&catalog()), Err(PackError::Reference(_))));
    }

    #[test]
    fn test_painting_size_bounds() {
        let mut project = project();
        project.paintings.upsert(Painting {
            name: "huge".to_string(),
            display_name: "Huge".to_string(),
            width: 17,
            height: 1,
            placeable: true,
            texture: PathBuf::from("huge.png"),
        });
        assert!(matches!(project.validate(&catalog()), Err(PackError::Validation(_))));
    }

    #[test]
    fn test_structure_checks() {
        let mut project = project();
        let mut structure = Structure {
            name: "tower".to_string(),
            structure: PathBuf::from("tower.nbt"),
            step: "Surface structures".to_string(),
            terrain_adaptation: "Beard thin".to_string(),
            start_height: 0,
            psth: "World surface worldgen".to_string(),
            spacing: 32,
            seperation: 8,
            biomes: vec!["plains".to_string()],
        };
        project.structures.upsert(structure.clone());
        assert!(project.validate(&catalog()).is_ok());

        structure.seperation = 32;
        project.structures.upsert(structure.clone());
        assert!(matches!(project.validate(&catalog()), Err(PackError::Validation(_))));

        structure.seperation = 8;
        structure.psth = "Sky".to_string();
        project.structures.upsert(structure);
        assert!(matches!(project.validate(&catalog()), Err(PackError::Reference(_))));
    }

    #[test]
    fn test_equipment_horse_textures_require_flag() {
        let mut project = project();
        let texture = |p: &str| Some(PathBuf::from(p));
        let mut item_textures: BTreeMap<String, Option<PathBuf>> = ArmorSlot::HUMANOID
            .iter()
            .map(|slot| (slot.texture_key().to_string(), texture("piece.png")))
            .collect();
        item_textures.insert("horseArmor".to_string(), texture("horse.png"));

        project.equipment.upsert(Equipment {
            name: "emerald".to_string(),
            display_name: "Emerald".to_string(),
            armor: BTreeMap::new(),
            toughness: 0.0,
            kb_resistance: 0.0,
            durability: Equipment::derive_durability(100),
            item_textures,
            model_textures: [
                ("h".to_string(), texture("h.png")),
                ("h_l".to_string(), texture("h_l.png")),
            ]
            .into_iter()
            .collect(),
            include_horse: false,
        });

        assert!(matches!(project.validate(&catalog()), Err(PackError::Validation(_))));
    }

    fn emerald(include_horse: bool) -> Equipment {
        let texture = |p: &str| Some(PathBuf::from(p));
        Equipment {
            name: "emerald".to_string(),
            display_name: "Emerald".to_string(),
            armor: BTreeMap::new(),
            toughness: 0.0,
            kb_resistance: 0.0,
            durability: Equipment::derive_durability(100),
            item_textures: ArmorSlot::ALL
                .iter()
                .map(|slot| (slot.texture_key().to_string(), texture("piece.png")))
                .collect(),
            model_textures: [
                ("h".to_string(), texture("h.png")),
                ("h_l".to_string(), texture("h_l.png")),
                ("horseArmor".to_string(), texture("horse.png")),
            ]
            .into_iter()
            .collect(),
            include_horse,
        }
    }

    fn item(name: &str) -> Item {
        Item {
            name: name.to_string(),
            display_name: "Emerald Helmet".to_string(),
            base_item: "stick".to_string(),
            texture: PathBuf::from("helmet.png"),
            model: "generated".to_string(),
            stack_size: 1,
            right_click: RightClick::default(),
        }
    }

    #[test]
    fn test_item_colliding_with_equipment_piece() {
        let mut project = project();
        project.equipment.upsert(emerald(true));
        project.items.upsert(item("emerald"));
        assert!(project.validate(&catalog()).is_ok());

        project.items.upsert(item("emerald_helmet"));
        assert!(matches!(project.validate(&catalog()), Err(PackError::Validation(_))));
    }

    #[test]
    fn test_horse_piece_collides_only_when_enabled() {
        let mut project = project();
        project.equipment.upsert(emerald(true));
        project.items.upsert(item("emerald_horse_armor"));
        assert!(matches!(project.validate(&catalog()), Err(PackError::Validation(_))));

        let mut equipment = emerald(false);
        equipment.item_textures.remove("horseArmor");
        equipment.model_textures.remove("horseArmor");
        project.equipment.upsert(equipment);
        assert!(project.validate(&catalog()).is_ok());
    }

    #[test]
    fn test_block_and_item_share_name() {
        let mut project = project();
        project.blocks.upsert(block("stone"));
        project.items.upsert(item("ruby_ore"));
        match project.validate(&catalog()) {
            Err(PackError::Validation(message)) => assert!(message.contains("ruby_ore")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_block_texture_faces() {
        let mut project = project();
        let mut ore = block("stone");
        ore.textures.insert("0".to_string(), PathBuf::from("top.png"));
        project.blocks.upsert(ore.clone());
        assert!(project.validate(&catalog()).is_ok());

        ore.textures.insert("top".to_string(), PathBuf::from("top.png"));
        project.blocks.upsert(ore);
        assert!(matches!(project.validate(&catalog()), Err(PackError::Validation(_))));
    }
}
