//! Jigsaw structures built from a single structure template.

use super::{asset_stem, GenerationContext, PackGenerator, PackWriter};
use crate::error::{PackError, Result};
use crate::project::Structure;
use crate::resolve::VANILLA_NAMESPACE;
use crate::template::TemplateSet;
use crate::types::{label_to_id, qualify, Heightmap};
use minijinja::context;

/// Placement salt for a structure set, stable for a given structure name.
///
/// FNV-1a over the name, folded into the non-negative `int` range.
pub fn structure_salt(name: &str) -> u32 {
    let hash = name
        .bytes()
        .fold(0x811c_9dc5_u32, |hash, byte| (hash ^ u32::from(byte)).wrapping_mul(0x0100_0193));
    hash & 0x7fff_ffff
}

pub struct StructureGenerator {
    templates: TemplateSet,
}

impl StructureGenerator {
    pub fn new(templates: TemplateSet) -> Self {
        Self { templates }
    }

    pub fn boxed(templates: TemplateSet) -> Box<dyn PackGenerator> {
        Box::new(Self::new(templates))
    }

    fn heightmap(structure: &Structure) -> Result<Heightmap> {
        Heightmap::from_label(&structure.psth).ok_or_else(|| {
            PackError::Reference(format!(
                "structure '{}': unknown project_start_to_heightmap '{}'",
                structure.name, structure.psth
            ))
        })
    }
}

impl PackGenerator for StructureGenerator {
    fn generate(&self, ctx: &GenerationContext<'_>, out: &mut PackWriter) -> Result<()> {
        let namespace = ctx.namespace();

        for dir in ["structure", "structure_set", "template_pool"] {
            out.create_dir(ctx.data_path(format!("worldgen/{}", dir)))?;
        }

        for (name, structure) in ctx.project.structures.iter() {
            let heightmap = Self::heightmap(structure)?;
            let template = asset_stem(name, &structure.structure)?;
            let biomes: Vec<String> = structure
                .biomes
                .iter()
                .map(|biome| qualify(VANILLA_NAMESPACE, biome))
                .collect();

            let content = self.templates.render(
                "structure.json.j2",
                context! {
                    namespace,
                    name,
                    biomes,
                    step => label_to_id(&structure.step),
                    terrain_adaptation => label_to_id(&structure.terrain_adaptation),
                    start_height => structure.start_height,
                    heightmap => heightmap.as_str(),
                },
            )?;
            out.write(ctx.data_path(format!("worldgen/structure/{}.json", name)), &content)?;

            let content = self.templates.render(
                "structure_set.json.j2",
                context! {
                    namespace,
                    name,
                    spacing => structure.spacing,
                    separation => structure.seperation,
                    salt => structure_salt(name),
                },
            )?;
            out.write(ctx.data_path(format!("worldgen/structure_set/{}.json", name)), &content)?;

            let content = self
                .templates
                .render("template_pool.json.j2", context! { namespace, template })?;
            out.write(ctx.data_path(format!("worldgen/template_pool/{}.json", name)), &content)?;

            out.copy(&structure.structure, ctx.data_path(format!("structure/{}.nbt", template)))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salt_is_stable() {
        assert_eq!(structure_salt("tower"), structure_salt("tower"));
        assert_ne!(structure_salt("tower"), structure_salt("towers"));
        assert!(structure_salt("a_very_long_structure_name") <= i32::MAX as u32);
    }

    #[test]
    fn test_fnv_reference_value() {
        // FNV-1a of "a" is 0xe40c292c; the top bit is cleared.
        assert_eq!(structure_salt("a"), 0xe40c_292c & 0x7fff_ffff);
        assert_eq!(structure_salt(""), 0x811c_9dc5 & 0x7fff_ffff);
    }
}
