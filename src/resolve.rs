//! Name resolution for ingredients, drops and give commands.
//!
//! A name in a recipe slot or a block drop may point at a project block,
//! a project item, a piece derived from an equipment set, or a vanilla item.
//! Project elements are looked up first so a custom `ruby` shadows nothing
//! in vanilla by accident.

use crate::catalog::VanillaCatalog;
use crate::error::{PackError, Result};
use crate::project::{Block, Equipment, Item, Project};
use crate::snbt;
use crate::types::{qualify, ArmorSlot};
use serde_json::{json, Map, Value};

/// Prefix of vanilla identifiers.
pub const VANILLA_NAMESPACE: &str = "minecraft";

/// What a name resolved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemRef<'a> {
    Block(&'a Block),
    Item(&'a Item),
    Equipment(&'a Equipment, ArmorSlot),
    /// A vanilla item id without the `minecraft:` prefix.
    Vanilla(&'a str),
}

/// Resolves names against a project and, optionally, a vanilla catalog.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    project: &'a Project,
    catalog: Option<&'a VanillaCatalog>,
}

impl<'a> Resolver<'a> {
    pub fn new(project: &'a Project, catalog: Option<&'a VanillaCatalog>) -> Self {
        Self { project, catalog }
    }

    pub fn namespace(&self) -> &'a str {
        self.project.namespace()
    }

    pub fn author(&self) -> &'a str {
        self.project.author()
    }

    /// Resolve a name: blocks, then items, then equipment pieces, then vanilla.
    ///
    /// Without a catalog every unmatched name is accepted as vanilla.
    pub fn resolve(&self, name: &'a str) -> Result<ItemRef<'a>> {
        if let Some(block) = self.project.blocks.get(name) {
            return Ok(ItemRef::Block(block));
        }
        if let Some(item) = self.project.items.get(name) {
            return Ok(ItemRef::Item(item));
        }
        if let Some((equipment, slot)) = self.equipment_piece(name) {
            return Ok(ItemRef::Equipment(equipment, slot));
        }

        let vanilla = strip_vanilla(name);
        if vanilla.is_empty() {
            return Err(PackError::Reference("empty item name".to_string()));
        }
        if let Some(catalog) = self.catalog {
            if !catalog.has_item(vanilla) {
                return Err(PackError::Reference(format!(
                    "'{}' is not a project element or a vanilla item",
                    name
                )));
            }
        }
        Ok(ItemRef::Vanilla(vanilla))
    }

    /// Find the equipment set and slot behind a derived name like `emerald_boots`.
    fn equipment_piece(&self, name: &str) -> Option<(&'a Equipment, ArmorSlot)> {
        ArmorSlot::ALL.into_iter().find_map(|slot| {
            let base = name.strip_suffix(slot.suffix())?.strip_suffix('_')?;
            let equipment = self.project.equipment.get(base)?;
            equipment.has_slot(slot).then_some((equipment, slot))
        })
    }

    /// Item id used where only an id fits (recipe ingredients).
    pub fn base_id(&self, item: ItemRef<'_>) -> String {
        match item {
            ItemRef::Block(_) => "minecraft:item_frame".to_string(),
            ItemRef::Item(item) => qualify(VANILLA_NAMESPACE, strip_vanilla(&item.base_item)),
            ItemRef::Equipment(_, slot) => slot.base_item().to_string(),
            ItemRef::Vanilla(id) => qualify(VANILLA_NAMESPACE, id),
        }
    }

    /// Data components that turn the base item into the custom element.
    ///
    /// Vanilla items carry none.
    pub fn components(&self, item: ItemRef<'_>) -> Result<Map<String, Value>> {
        let namespace = self.namespace();
        let mut components = Map::new();

        match item {
            ItemRef::Block(block) => {
                components.insert("minecraft:item_name".into(), json!(block.display_name));
                components.insert(
                    "minecraft:item_model".into(),
                    json!(format!("{}:{}", namespace, block.name)),
                );
                components.insert(
                    "minecraft:entity_data".into(),
                    json!({
                        "id": "minecraft:item_frame",
                        "Tags": [
                            format!("{}.item_frame_block", self.author()),
                            format!("{}.{}", self.author(), block.name),
                        ],
                        "Invisible": true,
                        "Fixed": true,
                    }),
                );
                components.insert(
                    "minecraft:custom_data".into(),
                    json!({ namespace: { "block": block.name } }),
                );
            }
            ItemRef::Item(item) => {
                components.insert("minecraft:item_name".into(), json!(item.display_name));
                components.insert(
                    "minecraft:item_model".into(),
                    json!(format!("{}:{}", namespace, item.name)),
                );
                components.insert("minecraft:max_stack_size".into(), json!(item.stack_size));
                if item.right_click.enabled {
                    components.insert(
                        "minecraft:consumable".into(),
                        json!({
                            "consume_seconds": 1_000_000,
                            "animation": "none",
                            "has_consume_particles": false,
                        }),
                    );
                }
                components.insert(
                    "minecraft:custom_data".into(),
                    json!({ namespace: { "item": item.name } }),
                );
            }
            ItemRef::Equipment(equipment, slot) => {
                let piece = equipment.derived_name(slot);
                let mut equippable = json!({
                    "slot": slot.equip_slot(),
                    "asset_id": format!("{}:{}", namespace, equipment.name),
                });
                if slot == ArmorSlot::HorseArmor {
                    equippable["allowed_entities"] = json!("minecraft:horse");
                    equippable["damage_on_hurt"] = json!(false);
                }

                components.insert(
                    "minecraft:item_name".into(),
                    json!(format!("{} {}", equipment.display_name, slot.title())),
                );
                components.insert(
                    "minecraft:item_model".into(),
                    json!(format!("{}:{}", namespace, piece)),
                );
                components.insert("minecraft:equippable".into(), equippable);
                components.insert("minecraft:max_damage".into(), json!(equipment.durability(slot)?));
                components.insert(
                    "minecraft:attribute_modifiers".into(),
                    Value::Array(attribute_modifiers(namespace, equipment, slot)),
                );
                components.insert(
                    "minecraft:custom_data".into(),
                    json!({ namespace: { "equipment": equipment.name, "slot": slot.suffix() } }),
                );
            }
            ItemRef::Vanilla(_) => {}
        }

        Ok(components)
    }

    /// An item stack object (`{id, count, components?}`) for recipe results.
    pub fn stack(&self, item: ItemRef<'_>, count: u32) -> Result<Value> {
        let mut stack = json!({
            "id": self.base_id(item),
            "count": count,
        });
        let components = self.components(item)?;
        if !components.is_empty() {
            stack["components"] = Value::Object(components);
        }
        Ok(stack)
    }

    /// Argument of a `give` command: `id[component=value,...]`.
    pub fn give_argument(&self, item: ItemRef<'_>) -> Result<String> {
        let components = self.components(item)?;
        if components.is_empty() {
            Ok(self.base_id(item))
        } else {
            Ok(format!("{}[{}]", self.base_id(item), snbt::component_list(&components)))
        }
    }
}

fn attribute_modifiers(namespace: &str, equipment: &Equipment, slot: ArmorSlot) -> Vec<Value> {
    let piece = equipment.derived_name(slot);
    [
        ("armor", equipment.armor(slot)),
        ("armor_toughness", equipment.toughness),
        ("knockback_resistance", equipment.kb_resistance),
    ]
    .into_iter()
    .filter(|(_, amount)| *amount != 0.0)
    .map(|(attribute, amount)| {
        json!({
            "type": format!("minecraft:{}", attribute),
            "id": format!("{}:{}_{}", namespace, piece, attribute),
            "amount": amount,
            "operation": "add_value",
            "slot": slot.equip_slot(),
        })
    })
    .collect()
}

/// Drop an optional `minecraft:` prefix.
pub fn strip_vanilla(name: &str) -> &str {
    name.strip_prefix("minecraft:").unwrap_or(name)
}
