//! Template rendering for generated pack files.
//!
//! Each content category owns a [`TemplateSet`]: a minijinja environment
//! holding that category's templates. Built-in templates are compiled into
//! the binary; a template directory can replace them wholesale.
//!
//! Rendering is strict: a template that reads a variable missing from its
//! context fails instead of printing an empty string. JSON templates
//! (`*.json.j2`) escape every interpolation as a JSON literal, while function
//! templates (`*.mcfunction.j2`) emit values verbatim.

use crate::error::{PackError, Result};
use crate::project::Category;
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;
use std::path::Path;

/// File extension of template files.
pub const TEMPLATE_EXTENSION: &str = "j2";

macro_rules! embed {
    ($category:literal, [$($name:literal),* $(,)?]) => {
        &[$(
            (
                $name,
                include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/", $category, "/", $name)),
            )
        ),*]
    };
}

const BLOCK_TEMPLATES: &[(&str, &str)] = embed!(
    "blocks",
    [
        "as_blocks.mcfunction.j2",
        "block.mcfunction.j2",
        "break.mcfunction.j2",
        "check_placed_item_frame.mcfunction.j2",
        "give_blocks.mcfunction.j2",
        "loot_table.json.j2",
        "model.json.j2",
        "model_def.json.j2",
        "place.mcfunction.j2",
        "placed_item_frame.json.j2",
        "placed_item_frame.mcfunction.j2",
    ]
);

const ITEM_TEMPLATES: &[(&str, &str)] = embed!(
    "items",
    [
        "cooldown.mcfunction.j2",
        "execute.mcfunction.j2",
        "give_items.mcfunction.j2",
        "item.mcfunction.j2",
        "item_cooldown.json.j2",
        "item_use.json.j2",
        "model.json.j2",
        "model_def.json.j2",
    ]
);

const RECIPE_TEMPLATES: &[(&str, &str)] = embed!(
    "recipes",
    [
        "fire.json.j2",
        "shaped.json.j2",
        "shapeless.json.j2",
        "stonecutting.json.j2",
    ]
);

const PAINTING_TEMPLATES: &[(&str, &str)] = embed!(
    "paintings",
    [
        "give_painting.mcfunction.j2",
        "painting.json.j2",
        "placeable.json.j2",
    ]
);

const STRUCTURE_TEMPLATES: &[(&str, &str)] = embed!(
    "structures",
    [
        "structure.json.j2",
        "structure_set.json.j2",
        "template_pool.json.j2",
    ]
);

const EQUIPMENT_TEMPLATES: &[(&str, &str)] = embed!(
    "equipment",
    [
        "equipment.json.j2",
        "equipment_horse.json.j2",
        "give_equipment.mcfunction.j2",
        "model.json.j2",
        "model_def.json.j2",
    ]
);

fn builtin_templates(category: Category) -> &'static [(&'static str, &'static str)] {
    match category {
        Category::Blocks => BLOCK_TEMPLATES,
        Category::Items => ITEM_TEMPLATES,
        Category::Recipes => RECIPE_TEMPLATES,
        Category::Paintings => PAINTING_TEMPLATES,
        Category::Structures => STRUCTURE_TEMPLATES,
        Category::Equipment => EQUIPMENT_TEMPLATES,
    }
}

fn auto_escape(name: &str) -> AutoEscape {
    if name.ends_with(".json.j2") {
        AutoEscape::Json
    } else {
        AutoEscape::None
    }
}

fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_auto_escape_callback(auto_escape);
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env
}

/// The templates of one content category.
pub struct TemplateSet {
    category: Category,
    env: Environment<'static>,
}

impl std::fmt::Debug for TemplateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateSet")
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

impl TemplateSet {
    /// The built-in templates for a category.
    pub fn builtin(category: Category) -> Result<Self> {
        let mut env = environment();
        for &(name, source) in builtin_templates(category) {
            env.add_template(name, source)?;
        }
        Ok(Self { category, env })
    }

    /// Load every `*.j2` file from `{root}/{category}/`.
    ///
    /// Built-in templates are not consulted; a name missing from the
    /// directory fails at render time.
    pub fn from_dir<P: AsRef<Path>>(category: Category, root: P) -> Result<Self> {
        let dir = root.as_ref().join(category.as_str());
        let entries = std::fs::read_dir(&dir).map_err(|e| PackError::io(&dir, e))?;

        let mut env = environment();
        let mut count = 0;
        for entry in entries {
            let path = entry.map_err(|e| PackError::io(&dir, e))?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(TEMPLATE_EXTENSION) {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let source = std::fs::read_to_string(&path).map_err(|e| PackError::io(&path, e))?;
            env.add_template_owned(name.to_string(), source)?;
            count += 1;
        }

        log::debug!("Loaded {} {} templates from {}", count, category.as_str(), dir.display());
        Ok(Self { category, env })
    }

    /// The override directory's templates when one is given, the built-ins otherwise.
    pub fn load(category: Category, override_root: Option<&Path>) -> Result<Self> {
        match override_root {
            Some(root) => Self::from_dir(category, root),
            None => Self::builtin(category),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Render a template by file name (`"place.mcfunction.j2"`).
    pub fn render<S: Serialize>(&self, name: &str, context: S) -> Result<String> {
        let template = self.env.get_template(name)?;
        Ok(template.render(context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_builtin_sets_parse() {
        for category in Category::ALL {
            let templates = TemplateSet::builtin(category).unwrap();
            assert_eq!(templates.category(), category);
        }
    }

    #[test]
    fn test_missing_template() {
        let templates = TemplateSet::builtin(Category::Recipes).unwrap();
        let result = templates.render("nope.json.j2", context! {});
        assert!(matches!(result, Err(PackError::TemplateNotFound(_))));
    }

    #[test]
    fn test_strict_undefined() {
        let templates = TemplateSet::builtin(Category::Items).unwrap();
        let result = templates.render("execute.mcfunction.j2", context! { header => "# h" });
        assert!(matches!(result, Err(PackError::UndefinedVariable(_))));
    }

    #[test]
    fn test_json_templates_escape_values() {
        let templates = TemplateSet::builtin(Category::Paintings).unwrap();
        let rendered = templates
            .render(
                "painting.json.j2",
                context! {
                    namespace => "gems",
                    texture => "sunset",
                    width => 2,
                    height => 1,
                    display_name => "The \"Sunset\"",
                    author => "joel",
                },
            )
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["title"]["text"], "The \"Sunset\"");
        assert_eq!(value["asset_id"], "gems:sunset");
        assert_eq!(value["width"], 2);
    }

    #[test]
    fn test_function_templates_are_verbatim() {
        let templates = TemplateSet::builtin(Category::Items).unwrap();
        let rendered = templates
            .render(
                "execute.mcfunction.j2",
                context! {
                    header => "# header",
                    function => "tellraw @a {\"text\":\"<hi>\"}",
                },
            )
            .unwrap();

        assert_eq!(rendered, "# header\ntellraw @a {\"text\":\"<hi>\"}\n");
    }

    #[test]
    fn test_override_directory() {
        let dir = tempfile::tempdir().unwrap();
        let recipes = dir.path().join("recipes");
        std::fs::create_dir(&recipes).unwrap();
        std::fs::write(recipes.join("stonecutting.json.j2"), "{\"custom\": {{ ingredient }}}").unwrap();
        std::fs::write(recipes.join("notes.txt"), "ignored").unwrap();

        let templates = TemplateSet::load(Category::Recipes, Some(dir.path())).unwrap();
        let rendered = templates
            .render("stonecutting.json.j2", context! { ingredient => "minecraft:stone" })
            .unwrap();
        assert_eq!(rendered, "{\"custom\": \"minecraft:stone\"}");
        assert!(matches!(
            templates.render("shaped.json.j2", context! {}),
            Err(PackError::TemplateNotFound(_))
        ));
    }

    #[test]
    fn test_override_syntax_error() {
        let dir = tempfile::tempdir().unwrap();
        let items = dir.path().join("items");
        std::fs::create_dir(&items).unwrap();
        std::fs::write(items.join("broken.mcfunction.j2"), "{% for x in %}").unwrap();

        let result = TemplateSet::from_dir(Category::Items, dir.path());
        assert!(matches!(result, Err(PackError::TemplateSyntax(_))));
    }
}
