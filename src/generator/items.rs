//! Custom items and their right-click handlers.

use super::{asset_stem, write_custom_model, GenerationContext, PackGenerator, PackWriter};
use crate::error::Result;
use crate::resolve::ItemRef;
use crate::snbt;
use crate::template::TemplateSet;
use minijinja::context;
use serde_json::json;

pub struct ItemGenerator {
    templates: TemplateSet,
}

impl ItemGenerator {
    pub fn new(templates: TemplateSet) -> Self {
        Self { templates }
    }

    pub fn boxed(templates: TemplateSet) -> Box<dyn PackGenerator> {
        Box::new(Self::new(templates))
    }
}

impl PackGenerator for ItemGenerator {
    fn generate(&self, ctx: &GenerationContext<'_>, out: &mut PackWriter) -> Result<()> {
        let namespace = ctx.namespace();
        let header = ctx.header.as_str();
        let items = &ctx.project.items;

        let gives = items
            .values()
            .map(|item| ctx.resolver.give_argument(ItemRef::Item(item)))
            .collect::<Result<Vec<_>>>()?;
        let content = self.templates.render("give_items.mcfunction.j2", context! { header, gives })?;
        out.write(ctx.function_path("give_items.mcfunction"), &content)?;

        for (name, item) in items.iter().filter(|(_, item)| item.right_click.enabled) {
            let dir = ctx.function_path(format!("items/{}", name));
            out.create_dir(&dir)?;

            let objective = format!("{}_cooldown", name);
            let marker = snbt::to_snbt(&json!({ namespace: { "item": name } }));
            let item_ctx = context! {
                header,
                namespace,
                item => name,
                mode => item.right_click.mode.as_str(),
                objective,
                function => item.right_click.function,
                marker,
            };

            let content = self.templates.render("item.mcfunction.j2", &item_ctx)?;
            out.write(dir.join(format!("{}.mcfunction", name)), &content)?;
            let content = self.templates.render("cooldown.mcfunction.j2", &item_ctx)?;
            out.write(dir.join("cooldown.mcfunction"), &content)?;
            let content = self.templates.render("execute.mcfunction.j2", &item_ctx)?;
            out.write(dir.join("execute.mcfunction"), &content)?;

            let content = self.templates.render("item_use.json.j2", &item_ctx)?;
            out.write(ctx.data_path(format!("advancement/{}_use.json", name)), &content)?;

            if item.uses_cooldown() {
                let content = self.templates.render("item_cooldown.json.j2", &item_ctx)?;
                out.write(ctx.data_path(format!("advancement/{}_cooldown.json", name)), &content)?;
                out.append(
                    ctx.load_function(),
                    &format!("scoreboard objectives add {} dummy\n", objective),
                );
            }
        }

        Ok(())
    }
}

pub struct ItemResourcer {
    templates: TemplateSet,
}

impl ItemResourcer {
    pub fn new(templates: TemplateSet) -> Self {
        Self { templates }
    }

    pub fn boxed(templates: TemplateSet) -> Box<dyn PackGenerator> {
        Box::new(Self::new(templates))
    }
}

impl PackGenerator for ItemResourcer {
    fn generate(&self, ctx: &GenerationContext<'_>, out: &mut PackWriter) -> Result<()> {
        let namespace = ctx.namespace();

        for (name, item) in ctx.project.items.iter() {
            let content = self.templates.render("model_def.json.j2", context! { namespace, name })?;
            out.write(ctx.assets_path(format!("items/{}.json", name)), &content)?;

            let stem = asset_stem(name, &item.texture)?;
            out.copy_if_absent(&item.texture, ctx.assets_path(format!("textures/item/{}.png", stem)))?;

            let model_path = ctx.assets_path(format!("models/item/{}.json", name));
            match item.custom_model() {
                Some(path) => write_custom_model(ctx, out, name, path, model_path)?,
                None => {
                    let content = self.templates.render(
                        "model.json.j2",
                        context! {
                            parent => item.model.trim().to_lowercase(),
                            texture => format!("{}:item/{}", namespace, stem),
                        },
                    )?;
                    out.write(model_path, &content)?;
                }
            }
        }

        Ok(())
    }
}
