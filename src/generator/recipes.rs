//! Crafting, cooking and stonecutting recipes.

use super::{GenerationContext, PackGenerator, PackWriter};
use crate::error::Result;
use crate::project::elements::slot;
use crate::project::Recipe;
use crate::template::TemplateSet;
use crate::types::RecipeKind;
use minijinja::context;
use std::collections::BTreeMap;

/// Pattern letter of each crafting grid slot, row by row.
pub const SLOT_LETTERS: [char; 9] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I'];

/// Experience granted by cooking recipes.
const COOKING_EXPERIENCE: f64 = 0.1;

/// The full 3x3 pattern of a shaped recipe; empty slots are spaces.
pub fn shaped_pattern(recipe: &Recipe) -> Vec<String> {
    (0..3u8)
        .map(|row| {
            (0..3u8)
                .map(|col| {
                    let id = row * 3 + col;
                    match recipe.slot(id) {
                        Some(_) => SLOT_LETTERS[id as usize],
                        None => ' ',
                    }
                })
                .collect()
        })
        .collect()
}

pub struct RecipeGenerator {
    templates: TemplateSet,
}

impl RecipeGenerator {
    pub fn new(templates: TemplateSet) -> Self {
        Self { templates }
    }

    pub fn boxed(templates: TemplateSet) -> Box<dyn PackGenerator> {
        Box::new(Self::new(templates))
    }

    fn render(&self, ctx: &GenerationContext<'_>, recipe: &Recipe) -> Result<String> {
        let resolver = &ctx.resolver;

        match recipe.kind {
            RecipeKind::Crafting => {
                let output = resolver.resolve(recipe.required_slot(slot::CRAFTING_OUTPUT)?)?;
                let result = resolver.stack(output, recipe.output_count)?;

                if recipe.exact {
                    let mut key = BTreeMap::new();
                    for (id, name) in recipe.grid() {
                        let ingredient = resolver.resolve(name)?;
                        key.insert(SLOT_LETTERS[id as usize].to_string(), resolver.base_id(ingredient));
                    }
                    self.templates.render(
                        "shaped.json.j2",
                        context! { pattern => shaped_pattern(recipe), key, result },
                    )
                } else {
                    let ingredients = recipe
                        .grid()
                        .into_iter()
                        .map(|(_, name)| resolver.resolve(name).map(|item| resolver.base_id(item)))
                        .collect::<Result<Vec<_>>>()?;
                    self.templates.render("shapeless.json.j2", context! { ingredients, result })
                }
            }
            RecipeKind::Stonecutting => {
                let input = resolver.resolve(recipe.required_slot(slot::STONECUTTING_INPUT)?)?;
                let output = resolver.resolve(recipe.required_slot(slot::STONECUTTING_OUTPUT)?)?;
                self.templates.render(
                    "stonecutting.json.j2",
                    context! {
                        ingredient => resolver.base_id(input),
                        result => resolver.stack(output, recipe.output_count2)?,
                    },
                )
            }
            kind => {
                let input = resolver.resolve(recipe.required_slot(slot::COOKING_INPUT)?)?;
                let output = resolver.resolve(recipe.required_slot(slot::COOKING_OUTPUT)?)?;
                self.templates.render(
                    "fire.json.j2",
                    context! {
                        recipe_type => kind.as_str(),
                        ingredient => resolver.base_id(input),
                        result => resolver.stack(output, 1)?,
                        experience => COOKING_EXPERIENCE,
                        cooking_time => kind.cooking_time(),
                    },
                )
            }
        }
    }
}

impl PackGenerator for RecipeGenerator {
    fn generate(&self, ctx: &GenerationContext<'_>, out: &mut PackWriter) -> Result<()> {
        for (name, recipe) in ctx.project.recipes.iter() {
            let content = self.render(ctx, recipe)?;
            out.write(ctx.data_path(format!("recipe/{}.json", name)), &content)?;
        }
        Ok(())
    }
}
