//! # Packsmith
//!
//! Turns a custom content project (blocks, items, recipes, paintings,
//! structures and equipment sets) into a Minecraft data pack and a matching
//! resource pack.
//!
//! ## Quick Start
//!
//! ```ignore
//! use packsmith::{load_project, Generator, GeneratorConfig};
//!
//! let project = load_project("path/to/workspace")?;
//!
//! let config = GeneratorConfig::default()
//!     .with_output_dir("out")
//!     .with_formats(94, 75);
//!
//! let output = Generator::with_config(&project, config).generate()?;
//! println!("{} files", output.datapack.files_written);
//! ```
//!
//! ## Validation
//!
//! Generation trusts its input. To check a project against the vanilla
//! registries first, load a catalog and call [`Project::validate`]:
//!
//! ```ignore
//! use packsmith::VanillaCatalog;
//!
//! let catalog = VanillaCatalog::load_version("catalog", "1.21.5")?;
//! project.validate(&catalog)?;
//! ```

pub mod archive;
pub mod catalog;
pub mod error;
pub mod generator;
pub mod model;
pub mod project;
pub mod resolve;
pub mod snbt;
pub mod template;
pub mod types;

// Re-export main types for convenience
pub use archive::zip_directory;
pub use catalog::{VanillaCatalog, VersionList};
pub use error::{PackError, Result};
pub use generator::{
    GeneratedPack, GenerationContext, GenerationOutput, Generator, GeneratorConfig, PackGenerator,
    PackWriter,
};
pub use project::{
    Block, Category, ElementMap, Equipment, Item, PackDetails, Painting, Project, Recipe, Structure,
};
pub use resolve::{ItemRef, Resolver};
pub use template::TemplateSet;
pub use types::{ArmorSlot, BlockFace, Heightmap, ModelLayer, RecipeKind, RightClickMode};

/// Load a project from a workspace directory.
pub fn load_project<P: AsRef<std::path::Path>>(path: P) -> Result<Project> {
    project::loader::load_project_dir(path)
}
