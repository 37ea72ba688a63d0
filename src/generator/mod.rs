//! Data pack and resource pack generation.
//!
//! The [`Generator`] owns the output layout. It creates the base directories,
//! writes pack metadata and the tick/load bootstrap functions, then runs one
//! generator per non-empty content category in a fixed order. Data pack
//! generation comes first, resource pack generation second.

mod blocks;
mod equipment;
mod items;
mod paintings;
mod recipes;
mod structures;
pub mod writer;

pub use recipes::shaped_pattern;
pub use structures::structure_salt;
pub use writer::PackWriter;

use crate::catalog::VanillaCatalog;
use crate::error::{PackError, Result};
use crate::model::ModelFile;
use crate::project::{Category, Project};
use crate::resolve::Resolver;
use crate::template::TemplateSet;
use crate::types::{file_stem, ModelLayer};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};

/// Name printed in the load banner and the default header.
pub const APP_NAME: &str = "packsmith";

/// Generation configuration.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Directory both packs are written into.
    pub output_dir: PathBuf,
    /// Version shown in the load message and default header.
    pub app_version: String,
    /// Banner placed at the top of every function file. `None` uses [`GeneratorConfig::default_header`].
    pub header: Option<String>,
    /// `pack_format` of the data pack.
    pub data_format: u32,
    /// `pack_format` of the resource pack.
    pub resource_format: u32,
    /// Replacement template root holding one directory per category.
    pub template_dir: Option<PathBuf>,
    /// Vanilla catalog; when set, unknown vanilla names fail resolution.
    pub catalog: Option<VanillaCatalog>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            header: None,
            data_format: 94,
            resource_format: 75,
            template_dir: None,
            catalog: None,
        }
    }
}

impl GeneratorConfig {
    pub fn with_output_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_app_version(mut self, version: impl Into<String>) -> Self {
        self.app_version = version.into();
        self
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Set the data and resource pack format numbers.
    pub fn with_formats(mut self, data_format: u32, resource_format: u32) -> Self {
        self.data_format = data_format;
        self.resource_format = resource_format;
        self
    }

    pub fn with_template_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.template_dir = Some(dir.into());
        self
    }

    pub fn with_catalog(mut self, catalog: VanillaCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// The header banner in effect.
    pub fn header(&self) -> String {
        match &self.header {
            Some(header) => header.clone(),
            None => Self::default_header(&self.app_version),
        }
    }

    /// A `#`-boxed banner naming the generator.
    pub fn default_header(app_version: &str) -> String {
        let lines = [
            format!("Generated by {} {}", APP_NAME, app_version),
            "Edits are lost on the next generation".to_string(),
        ];
        let width = lines.iter().map(|l| l.len()).max().unwrap_or(0);
        let border = "#".repeat(width + 4);

        let mut banner = border.clone();
        for line in &lines {
            banner.push_str(&format!("\n# {:<width$} #", line, width = width));
        }
        banner.push('\n');
        banner.push_str(&border);
        banner
    }
}

/// Shared state handed to every category generator.
#[derive(Debug)]
pub struct GenerationContext<'a> {
    pub project: &'a Project,
    pub resolver: Resolver<'a>,
    /// Header banner without trailing newlines.
    pub header: String,
}

impl<'a> GenerationContext<'a> {
    pub fn new(project: &'a Project, catalog: Option<&'a VanillaCatalog>, header: &str) -> Self {
        Self {
            project,
            resolver: Resolver::new(project, catalog),
            header: header.trim_end().to_string(),
        }
    }

    pub fn namespace(&self) -> &'a str {
        self.project.namespace()
    }

    pub fn author(&self) -> &'a str {
        self.project.author()
    }

    /// `data/{namespace}/{relative}`
    pub fn data_path<P: AsRef<Path>>(&self, relative: P) -> PathBuf {
        Path::new("data").join(self.namespace()).join(relative)
    }

    /// `data/{namespace}/function/{relative}`
    pub fn function_path<P: AsRef<Path>>(&self, relative: P) -> PathBuf {
        self.data_path("function").join(relative)
    }

    /// `assets/{namespace}/{relative}`
    pub fn assets_path<P: AsRef<Path>>(&self, relative: P) -> PathBuf {
        Path::new("assets").join(self.namespace()).join(relative)
    }

    /// The shared load function other generators append to.
    pub fn load_function(&self) -> PathBuf {
        self.function_path("load.mcfunction")
    }
}

/// One category's contribution to a pack.
pub trait PackGenerator {
    /// Write this category's files. The category has at least one element.
    fn generate(&self, ctx: &GenerationContext<'_>, out: &mut PackWriter) -> Result<()>;
}

type Factory = fn(TemplateSet) -> Box<dyn PackGenerator>;

/// A category generator and the category it runs for.
struct Stage {
    category: Category,
    build: Factory,
}

const fn stage(category: Category, build: Factory) -> Stage {
    Stage { category, build }
}

const DATAPACK_STAGES: [Stage; 6] = [
    stage(Category::Blocks, blocks::BlockGenerator::boxed),
    stage(Category::Items, items::ItemGenerator::boxed),
    stage(Category::Recipes, recipes::RecipeGenerator::boxed),
    stage(Category::Paintings, paintings::PaintingGenerator::boxed),
    stage(Category::Structures, structures::StructureGenerator::boxed),
    stage(Category::Equipment, equipment::EquipmentGenerator::boxed),
];

const RESOURCE_STAGES: [Stage; 4] = [
    stage(Category::Blocks, blocks::BlockResourcer::boxed),
    stage(Category::Items, items::ItemResourcer::boxed),
    stage(Category::Paintings, paintings::PaintingResourcer::boxed),
    stage(Category::Equipment, equipment::EquipmentResourcer::boxed),
];

/// `pack.mcmeta` contents.
#[derive(Debug, Serialize)]
struct PackMeta<'a> {
    pack: PackSection<'a>,
}

#[derive(Debug, Serialize)]
struct PackSection<'a> {
    pack_format: u32,
    description: &'a str,
}

/// A function tag (`{"values": [...]}`).
#[derive(Debug, Serialize)]
struct FunctionTag {
    values: Vec<String>,
}

/// One generated pack.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPack {
    pub root: PathBuf,
    pub files_written: usize,
}

/// Both generated packs.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutput {
    pub datapack: GeneratedPack,
    pub resource_pack: GeneratedPack,
}

/// Turns a project into a data pack and a resource pack.
pub struct Generator<'a> {
    project: &'a Project,
    config: GeneratorConfig,
}

impl<'a> Generator<'a> {
    /// Create a generator with default configuration.
    pub fn new(project: &'a Project) -> Self {
        Self {
            project,
            config: GeneratorConfig::default(),
        }
    }

    pub fn with_config(project: &'a Project, config: GeneratorConfig) -> Self {
        Self { project, config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// `{output}/{pack name}`
    pub fn datapack_dir(&self) -> PathBuf {
        self.config.output_dir.join(&self.project.details.name)
    }

    /// `{output}/{pack name} Resource Pack`
    pub fn resource_pack_dir(&self) -> PathBuf {
        self.config
            .output_dir
            .join(format!("{} Resource Pack", self.project.details.name))
    }

    fn context(&self) -> GenerationContext<'_> {
        GenerationContext::new(self.project, self.config.catalog.as_ref(), &self.config.header())
    }

    /// Generate the data pack, then the resource pack.
    pub fn generate(&self) -> Result<GenerationOutput> {
        let datapack = self.generate_datapack()?;
        let resource_pack = self.generate_resource_pack()?;
        Ok(GenerationOutput {
            datapack,
            resource_pack,
        })
    }

    /// Generate the data pack.
    pub fn generate_datapack(&self) -> Result<GeneratedPack> {
        let ctx = self.context();
        let project = self.project;
        let mut out = PackWriter::new(self.datapack_dir());
        log::info!("Generating data pack in {}", out.root().display());

        out.create_root()?;
        out.create_dir("data")?;
        out.create_dir(ctx.data_path(""))?;
        out.create_dir("data/minecraft")?;

        out.write_json(
            "pack.mcmeta",
            &PackMeta {
                pack: PackSection {
                    pack_format: self.config.data_format,
                    description: &project.details.description,
                },
            },
        )?;

        out.create_dir(ctx.data_path("function"))?;
        if project.has(Category::Blocks) || project.has(Category::Items) {
            out.create_dir(ctx.data_path("advancement"))?;
        }
        if project.has(Category::Blocks) {
            out.create_dir(ctx.data_path("loot_table"))?;
        }
        if project.has(Category::Recipes) {
            out.create_dir(ctx.data_path("recipe"))?;
        }
        if project.has(Category::Structures) {
            out.create_dir(ctx.data_path("structure"))?;
            out.create_dir(ctx.data_path("worldgen"))?;
        }
        out.create_dir("data/minecraft/tags/function")?;

        let mut tick = format!("{}\n", ctx.header);
        if project.has(Category::Blocks) {
            tick.push_str(&format!(
                "execute as @e[type=minecraft:item_display,tag={}.custom_block] at @s run function {}:blocks/as_blocks\n",
                ctx.author(),
                ctx.namespace()
            ));
        }
        out.write(ctx.function_path("tick.mcfunction"), &tick)?;

        let greeting = json!({
            "text": format!("[{} {}] - Successfully loaded pack!", APP_NAME, self.config.app_version),
            "color": "red",
        });
        out.append(ctx.load_function(), &format!("{}\ntellraw @a {}\n", ctx.header, greeting));

        for (tag, function) in [("tick", "tick"), ("load", "load")] {
            out.write_json(
                format!("data/minecraft/tags/function/{}.json", tag),
                &FunctionTag {
                    values: vec![format!("{}:{}", ctx.namespace(), function)],
                },
            )?;
        }

        self.run_stages(&DATAPACK_STAGES, &ctx, &mut out)?;
        out.flush()?;

        log::info!("Data pack complete: {} files", out.files_written());
        Ok(GeneratedPack {
            root: out.root().to_path_buf(),
            files_written: out.files_written(),
        })
    }

    /// Generate the resource pack.
    pub fn generate_resource_pack(&self) -> Result<GeneratedPack> {
        let ctx = self.context();
        let project = self.project;
        let mut out = PackWriter::new(self.resource_pack_dir());
        log::info!("Generating resource pack in {}", out.root().display());

        out.create_root()?;
        for dir in ["items", "models/item", "textures/item", "textures/painting"] {
            out.create_dir(ctx.assets_path(dir))?;
        }
        if project.has(Category::Equipment) {
            out.create_dir(ctx.assets_path("equipment"))?;
            for layer in [ModelLayer::Humanoid, ModelLayer::HumanoidLeggings, ModelLayer::HorseBody] {
                out.create_dir(ctx.assets_path(format!("textures/entity/equipment/{}", layer.directory())))?;
            }
        }

        out.write_json(
            "pack.mcmeta",
            &PackMeta {
                pack: PackSection {
                    pack_format: self.config.resource_format,
                    description: &project.details.description,
                },
            },
        )?;

        self.run_stages(&RESOURCE_STAGES, &ctx, &mut out)?;
        out.flush()?;

        log::info!("Resource pack complete: {} files", out.files_written());
        Ok(GeneratedPack {
            root: out.root().to_path_buf(),
            files_written: out.files_written(),
        })
    }

    fn run_stages(
        &self,
        stages: &[Stage],
        ctx: &GenerationContext<'_>,
        out: &mut PackWriter,
    ) -> Result<()> {
        for stage in stages {
            let category = stage.category;
            if !self.project.has(category) {
                log::debug!("No {}, skipping", category.as_str());
                continue;
            }

            log::info!("Generating {} {}", self.project.count(category), category.as_str());
            let templates = TemplateSet::load(category, self.config.template_dir.as_deref())?;
            let generator = (stage.build)(templates);
            generator.generate(ctx, out)?;
        }
        Ok(())
    }
}

/// Serialize as JSON indented with four spaces.
pub(crate) fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write a custom model with its textures moved into the pack namespace.
pub(crate) fn write_custom_model(
    ctx: &GenerationContext<'_>,
    out: &mut PackWriter,
    element: &str,
    source: &Path,
    relative: PathBuf,
) -> Result<()> {
    let mut model = ModelFile::load(source)?;
    for (key, reference) in model.dangling_references() {
        log::warn!(
            "Model of '{}': texture '{}' points at undefined '{}'",
            element,
            key,
            reference
        );
    }
    model.qualify_textures(ctx.namespace());
    out.write(relative, &model.to_json_pretty()?)
}

/// File stem of a texture or structure path, used as its pack-side name.
pub(crate) fn asset_stem<'p>(element: &str, path: &'p Path) -> Result<&'p str> {
    file_stem(path).ok_or_else(|| {
        PackError::Validation(format!(
            "{}: '{}' has no usable file name",
            element,
            path.display()
        ))
    })
}
