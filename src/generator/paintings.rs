//! Painting variants.

use super::{asset_stem, GenerationContext, PackGenerator, PackWriter};
use crate::error::Result;
use crate::project::Painting;
use crate::template::TemplateSet;
use minijinja::context;

/// Pixels per painting block in vanilla textures.
const PIXELS_PER_BLOCK: u32 = 16;

pub struct PaintingGenerator {
    templates: TemplateSet,
}

impl PaintingGenerator {
    pub fn new(templates: TemplateSet) -> Self {
        Self { templates }
    }

    pub fn boxed(templates: TemplateSet) -> Box<dyn PackGenerator> {
        Box::new(Self::new(templates))
    }
}

impl PackGenerator for PaintingGenerator {
    fn generate(&self, ctx: &GenerationContext<'_>, out: &mut PackWriter) -> Result<()> {
        let namespace = ctx.namespace();
        let author = ctx.author();

        out.create_dir(ctx.data_path("painting_variant"))?;
        out.create_dir("data/minecraft/tags/painting_variant")?;

        let give_path = ctx.function_path("give_paintings.mcfunction");
        out.append(&give_path, &format!("{}\n", ctx.header));

        let mut placeable = Vec::new();
        for (name, painting) in ctx.project.paintings.iter() {
            let texture = asset_stem(name, &painting.texture)?;
            let content = self.templates.render(
                "painting.json.j2",
                context! {
                    namespace,
                    author,
                    texture,
                    width => painting.width,
                    height => painting.height,
                    display_name => painting.display_name,
                },
            )?;
            out.write(ctx.data_path(format!("painting_variant/{}.json", name)), &content)?;

            let line = self
                .templates
                .render("give_painting.mcfunction.j2", context! { namespace, painting => name })?;
            out.append(&give_path, &line);

            if painting.placeable {
                placeable.push(format!("{}:{}", namespace, name));
            }
        }

        let content = self.templates.render("placeable.json.j2", context! { values => placeable })?;
        out.write("data/minecraft/tags/painting_variant/placeable.json", &content)?;

        Ok(())
    }
}

/// Copies painting textures and checks their proportions.
pub struct PaintingResourcer;

impl PaintingResourcer {
    pub fn boxed(_templates: TemplateSet) -> Box<dyn PackGenerator> {
        Box::new(Self)
    }
}

impl PackGenerator for PaintingResourcer {
    fn generate(&self, ctx: &GenerationContext<'_>, out: &mut PackWriter) -> Result<()> {
        for (name, painting) in ctx.project.paintings.iter() {
            check_texture_size(painting)?;
            let stem = asset_stem(name, &painting.texture)?;
            out.copy_if_absent(&painting.texture, ctx.assets_path(format!("textures/painting/{}.png", stem)))?;
        }
        Ok(())
    }
}

/// Warn when a texture's proportions do not match the painting's block size.
fn check_texture_size(painting: &Painting) -> Result<()> {
    let (width, height) = image::image_dimensions(&painting.texture)?;
    if u64::from(width) * u64::from(painting.height) != u64::from(height) * u64::from(painting.width) {
        log::warn!(
            "Painting '{}' is {}x{} blocks but its texture is {}x{} pixels",
            painting.name,
            painting.width,
            painting.height,
            width,
            height
        );
    } else if u64::from(width) < u64::from(painting.width) * u64::from(PIXELS_PER_BLOCK) {
        log::debug!(
            "Painting '{}' texture is below {} pixels per block",
            painting.name,
            PIXELS_PER_BLOCK
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PackError;
    use std::path::PathBuf;

    fn painting(texture: PathBuf) -> Painting {
        Painting {
            name: "sunset".to_string(),
            display_name: "Sunset".to_string(),
            width: 2,
            height: 1,
            placeable: true,
            texture,
        }
    }

    #[test]
    fn test_texture_size_accepts_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sunset.png");
        image::RgbaImage::new(16, 16).save(&path).unwrap();

        assert!(check_texture_size(&painting(path)).is_ok());
    }

    #[test]
    fn test_texture_size_with_huge_block_counts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sunset.png");
        image::RgbaImage::new(32, 16).save(&path).unwrap();

        let mut painting = painting(path);
        painting.width = 1 << 31;
        painting.height = 1 << 30;
        assert!(check_texture_size(&painting).is_ok());

        painting.width = u32::MAX;
        assert!(check_texture_size(&painting).is_ok());
    }

    #[test]
    fn test_unreadable_texture() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sunset.png");
        std::fs::write(&path, b"not a png").unwrap();

        let result = check_texture_size(&painting(path));
        assert!(matches!(result, Err(PackError::Image(_))));
    }
}
