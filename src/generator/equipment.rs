//! Armor sets.
//!
//! Each set fans out into one derived item per produced slot
//! (`{set}_helmet` .. `{set}_boots`, plus `{set}_horse_armor` when horse armor
//! is enabled) and one equipment asset shared by all of them.

use super::{GenerationContext, PackGenerator, PackWriter};
use crate::error::Result;
use crate::resolve::ItemRef;
use crate::template::TemplateSet;
use minijinja::context;
use serde::Serialize;

/// The `give` lines of one armor set.
#[derive(Debug, Serialize)]
struct GiveSet<'a> {
    display_name: &'a str,
    gives: Vec<String>,
}

pub struct EquipmentGenerator {
    templates: TemplateSet,
}

impl EquipmentGenerator {
    pub fn new(templates: TemplateSet) -> Self {
        Self { templates }
    }

    pub fn boxed(templates: TemplateSet) -> Box<dyn PackGenerator> {
        Box::new(Self::new(templates))
    }
}

impl PackGenerator for EquipmentGenerator {
    fn generate(&self, ctx: &GenerationContext<'_>, out: &mut PackWriter) -> Result<()> {
        let mut sets = Vec::new();
        for equipment in ctx.project.equipment.values() {
            let gives = equipment
                .slots()
                .into_iter()
                .map(|slot| ctx.resolver.give_argument(ItemRef::Equipment(equipment, slot)))
                .collect::<Result<Vec<_>>>()?;
            sets.push(GiveSet {
                display_name: &equipment.display_name,
                gives,
            });
        }

        let content = self.templates.render(
            "give_equipment.mcfunction.j2",
            context! { header => ctx.header.as_str(), sets },
        )?;
        out.write(ctx.function_path("give_equipment.mcfunction"), &content)
    }
}

pub struct EquipmentResourcer {
    templates: TemplateSet,
}

impl EquipmentResourcer {
    pub fn new(templates: TemplateSet) -> Self {
        Self { templates }
    }

    pub fn boxed(templates: TemplateSet) -> Box<dyn PackGenerator> {
        Box::new(Self::new(templates))
    }
}

impl PackGenerator for EquipmentResourcer {
    fn generate(&self, ctx: &GenerationContext<'_>, out: &mut PackWriter) -> Result<()> {
        let namespace = ctx.namespace();

        for (set, equipment) in ctx.project.equipment.iter() {
            log::debug!("Equipment '{}': {} pieces", set, equipment.slots().len());

            for slot in equipment.slots() {
                let name = equipment.derived_name(slot);

                let content = self.templates.render("model.json.j2", context! { namespace, name })?;
                out.append(ctx.assets_path(format!("models/item/{}.json", name)), &content);
                let content = self.templates.render("model_def.json.j2", context! { namespace, name })?;
                out.append(ctx.assets_path(format!("items/{}.json", name)), &content);

                let texture = equipment.item_texture(slot)?;
                out.copy_if_absent(texture, ctx.assets_path(format!("textures/item/{}.png", name)))?;
            }

            let template = if equipment.include_horse {
                "equipment_horse.json.j2"
            } else {
                "equipment.json.j2"
            };
            let content = self.templates.render(template, context! { namespace, name => set })?;
            out.append(ctx.assets_path(format!("equipment/{}.json", set)), &content);

            for (layer, texture) in equipment.model_layers()? {
                out.copy_if_absent(
                    texture,
                    ctx.assets_path(format!("textures/entity/equipment/{}/{}.png", layer.directory(), set)),
                )?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{Category, Equipment, PackDetails, Project};
    use crate::types::ArmorSlot;
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};

    fn equipment(dir: &Path, include_horse: bool) -> Equipment {
        let texture = |name: &str| {
            let path = dir.join(format!("{}.png", name));
            std::fs::write(&path, b"png").unwrap();
            Some(path)
        };

        let mut item_textures: BTreeMap<String, Option<PathBuf>> = ArmorSlot::HUMANOID
            .iter()
            .map(|slot| (slot.texture_key().to_string(), texture(slot.suffix())))
            .collect();
        let mut model_textures = BTreeMap::from([
            ("h".to_string(), texture("layer_1")),
            ("h_l".to_string(), texture("layer_2")),
        ]);
        if include_horse {
            item_textures.insert("horseArmor".to_string(), texture("horse_icon"));
            model_textures.insert("horseArmor".to_string(), texture("horse_layer"));
        } else {
            item_textures.insert("horseArmor".to_string(), None);
        }

        Equipment {
            name: "ruby".to_string(),
            display_name: "Ruby".to_string(),
            armor: BTreeMap::from([(ArmorSlot::Chestplate, 8.0)]),
            toughness: 2.0,
            kb_resistance: 0.0,
            durability: Equipment::derive_durability(400),
            item_textures,
            model_textures,
            include_horse,
        }
    }

    fn run(include_horse: bool) -> (tempfile::TempDir, PackWriter) {
        let dir = tempfile::tempdir().unwrap();
        let mut project = Project::new(PackDetails::new("Gem Pack", "gems", "joel"));
        project.equipment.upsert(equipment(dir.path(), include_horse));
        let ctx = GenerationContext::new(&project, None, "# header");

        let mut out = PackWriter::new(dir.path().join("pack"));
        out.create_root().unwrap();
        for sub in ["items", "models/item", "textures/item", "equipment"] {
            out.create_dir(ctx.assets_path(sub)).unwrap();
        }
        for layer in ["humanoid", "humanoid_leggings", "horse_body"] {
            out.create_dir(ctx.assets_path(format!("textures/entity/equipment/{}", layer)))
                .unwrap();
        }

        let templates = TemplateSet::builtin(Category::Equipment).unwrap();
        EquipmentResourcer::new(templates).generate(&ctx, &mut out).unwrap();
        out.flush().unwrap();
        (dir, out)
    }

    #[test]
    fn test_four_pieces_without_horse() {
        let (_dir, out) = run(false);
        let assets = out.path("assets/gems");

        for piece in ["helmet", "chestplate", "leggings", "boots"] {
            assert!(assets.join(format!("items/ruby_{}.json", piece)).exists());
            assert!(assets.join(format!("textures/item/ruby_{}.png", piece)).exists());
        }
        assert!(!assets.join("items/ruby_horse_armor.json").exists());
        assert!(!assets.join("textures/entity/equipment/horse_body/ruby.png").exists());

        let asset: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(assets.join("equipment/ruby.json")).unwrap()).unwrap();
        assert!(asset["layers"].get("horse_body").is_none());
        assert_eq!(asset["layers"]["humanoid"][0]["texture"], "gems:ruby");
    }

    #[test]
    fn test_five_pieces_with_horse() {
        let (_dir, out) = run(true);
        let assets = out.path("assets/gems");

        assert!(assets.join("items/ruby_horse_armor.json").exists());
        assert!(assets.join("models/item/ruby_horse_armor.json").exists());
        assert!(assets.join("textures/entity/equipment/horse_body/ruby.png").exists());

        let asset: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(assets.join("equipment/ruby.json")).unwrap()).unwrap();
        assert_eq!(asset["layers"]["horse_body"][0]["texture"], "gems:ruby");
    }

    #[test]
    fn test_give_function_lists_every_piece() {
        let dir = tempfile::tempdir().unwrap();
        let mut project = Project::new(PackDetails::new("Gem Pack", "gems", "joel"));
        project.equipment.upsert(equipment(dir.path(), true));
        let ctx = GenerationContext::new(&project, None, "# header");

        let mut out = PackWriter::new(dir.path().join("pack"));
        out.create_root().unwrap();
        out.create_dir("data/gems/function").unwrap();

        let templates = TemplateSet::builtin(Category::Equipment).unwrap();
        EquipmentGenerator::new(templates).generate(&ctx, &mut out).unwrap();

        let give = std::fs::read_to_string(out.path("data/gems/function/give_equipment.mcfunction")).unwrap();
        assert!(give.starts_with("# header\n"));
        assert!(give.contains("# Ruby"));
        assert_eq!(give.lines().filter(|l| l.starts_with("give @s ")).count(), 5);
        assert!(give.contains("give @s minecraft:iron_horse_armor["));
    }
}
