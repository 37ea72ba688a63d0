//! Custom blocks.
//!
//! A custom block is an invisible, fixed item frame carrying block tags.
//! When a player places one, an advancement fires and the frame is swapped
//! for the block's base block plus an item display showing the block model.
//! Every tick each display checks its base block is still there and drops
//! its loot when it is not.

use super::{asset_stem, write_custom_model, GenerationContext, PackGenerator, PackWriter};
use crate::error::{PackError, Result};
use crate::project::Block;
use crate::resolve::{ItemRef, VANILLA_NAMESPACE};
use crate::template::TemplateSet;
use crate::types::{qualify, BlockFace};
use minijinja::context;
use std::collections::BTreeMap;

pub struct BlockGenerator {
    templates: TemplateSet,
}

impl BlockGenerator {
    pub fn new(templates: TemplateSet) -> Self {
        Self { templates }
    }

    pub fn boxed(templates: TemplateSet) -> Box<dyn PackGenerator> {
        Box::new(Self::new(templates))
    }
}

impl PackGenerator for BlockGenerator {
    fn generate(&self, ctx: &GenerationContext<'_>, out: &mut PackWriter) -> Result<()> {
        let namespace = ctx.namespace();
        let author = ctx.author();
        let header = ctx.header.as_str();
        let blocks = &ctx.project.blocks;
        let names = blocks.names();

        out.create_dir(ctx.function_path("blocks"))?;

        // Placement trigger
        let marker = format!("{{{}:{{}}}}", namespace);
        let content = self.templates.render(
            "placed_item_frame.json.j2",
            context! { namespace, marker },
        )?;
        out.write(ctx.data_path("advancement/placed_item_frame.json"), &content)?;

        let content = self.templates.render(
            "placed_item_frame.mcfunction.j2",
            context! { header, namespace, author },
        )?;
        out.write(ctx.function_path("blocks/placed_item_frame.mcfunction"), &content)?;

        let content = self.templates.render(
            "check_placed_item_frame.mcfunction.j2",
            context! { header, namespace, author, blocks => names },
        )?;
        out.write(ctx.function_path("blocks/check_placed_item_frame.mcfunction"), &content)?;

        // Per-block place / state check / break
        for (name, block) in blocks.iter() {
            let dir = ctx.function_path(format!("blocks/{}", name));
            out.create_dir(&dir)?;

            let place_sound = if block.place_sound.is_empty() {
                String::new()
            } else {
                qualify(VANILLA_NAMESPACE, &block.place_sound)
            };
            let block_ctx = context! {
                header,
                namespace,
                author,
                block => name,
                base_block => qualify(VANILLA_NAMESPACE, &block.base_block),
                place_sound,
                directional => block.directional,
            };

            let content = self.templates.render("place.mcfunction.j2", &block_ctx)?;
            out.write(dir.join("place.mcfunction"), &content)?;
            let content = self.templates.render("block.mcfunction.j2", &block_ctx)?;
            out.write(dir.join(format!("{}.mcfunction", name)), &content)?;
            let content = self.templates.render("break.mcfunction.j2", &block_ctx)?;
            out.write(dir.join("break.mcfunction"), &content)?;
        }

        let content = self.templates.render(
            "as_blocks.mcfunction.j2",
            context! { header, namespace, author, blocks => names },
        )?;
        out.write(ctx.function_path("blocks/as_blocks.mcfunction"), &content)?;

        let gives = blocks
            .values()
            .map(|block| ctx.resolver.give_argument(ItemRef::Block(block)))
            .collect::<Result<Vec<_>>>()?;
        let content = self.templates.render("give_blocks.mcfunction.j2", context! { header, gives })?;
        out.write(ctx.function_path("give_blocks.mcfunction"), &content)?;

        // Loot tables
        for (name, block) in blocks.iter() {
            let drop = if block.drops_self() {
                ItemRef::Block(block)
            } else {
                ctx.resolver.resolve(&block.block_drop)?
            };
            let content = self.templates.render(
                "loot_table.json.j2",
                context! {
                    drop_id => ctx.resolver.base_id(drop),
                    components => ctx.resolver.components(drop)?,
                },
            )?;
            out.write(ctx.data_path(format!("loot_table/{}.json", name)), &content)?;
        }

        Ok(())
    }
}

pub struct BlockResourcer {
    templates: TemplateSet,
}

impl BlockResourcer {
    pub fn new(templates: TemplateSet) -> Self {
        Self { templates }
    }

    pub fn boxed(templates: TemplateSet) -> Box<dyn PackGenerator> {
        Box::new(Self::new(templates))
    }
}

impl PackGenerator for BlockResourcer {
    fn generate(&self, ctx: &GenerationContext<'_>, out: &mut PackWriter) -> Result<()> {
        let namespace = ctx.namespace();

        for (name, block) in ctx.project.blocks.iter() {
            let content = self.templates.render("model_def.json.j2", context! { namespace, name })?;
            out.write(ctx.assets_path(format!("items/{}.json", name)), &content)?;

            for (_, texture) in block.face_textures() {
                let stem = asset_stem(name, texture)?;
                out.copy_if_absent(texture, ctx.assets_path(format!("textures/item/{}.png", stem)))?;
            }

            let model_path = ctx.assets_path(format!("models/item/{}.json", name));
            match block.custom_model() {
                Some(path) => write_custom_model(ctx, out, name, path, model_path)?,
                None => {
                    let textures = cube_textures(namespace, block)?;
                    let content = self.templates.render("model.json.j2", context! { textures })?;
                    out.write(model_path, &content)?;
                }
            }
        }

        Ok(())
    }
}

/// Texture map of a `block/cube` model. Faces without a texture reuse the first supplied one.
fn cube_textures(namespace: &str, block: &Block) -> Result<BTreeMap<&'static str, String>> {
    let faces = block.face_textures();
    let Some((_, first)) = faces.first() else {
        return Err(PackError::missing_field(&block.name, "textures"));
    };
    let fallback = asset_stem(&block.name, first)?;

    let mut textures = BTreeMap::new();
    for face in BlockFace::ALL {
        let stem = match block.texture(face) {
            Some(path) => asset_stem(&block.name, path)?,
            None => fallback,
        };
        textures.insert(face.model_face(), format!("{}:item/{}", namespace, stem));
    }
    textures.insert("particle", format!("{}:item/{}", namespace, fallback));
    Ok(textures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn block(textures: &[(&str, &str)]) -> Block {
        Block {
            name: "ruby_ore".to_string(),
            display_name: "Ruby Ore".to_string(),
            base_block: "stone".to_string(),
            textures: textures
                .iter()
                .map(|(k, v)| (k.to_string(), PathBuf::from(v)))
                .collect(),
            place_sound: String::new(),
            block_drop: "self".to_string(),
            directional: false,
            model: "vanilla".to_string(),
        }
    }

    #[test]
    fn test_cube_textures_fill_missing_faces() {
        let block = block(&[("0", "tex/ruby_top.png"), ("4", "tex/ruby_front.png")]);
        let textures = cube_textures("gems", &block).unwrap();

        assert_eq!(textures["up"], "gems:item/ruby_top");
        assert_eq!(textures["north"], "gems:item/ruby_front");
        assert_eq!(textures["down"], "gems:item/ruby_top");
        assert_eq!(textures["particle"], "gems:item/ruby_top");
        assert_eq!(textures.len(), 7);
    }

    #[test]
    fn test_cube_textures_require_one_face() {
        let result = cube_textures("gems", &block(&[]));
        assert!(matches!(result, Err(PackError::MissingField { .. })));
    }
}
