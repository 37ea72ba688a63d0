//! Packsmith CLI
//!
//! Generate Minecraft data packs and resource packs from a project workspace.

use clap::{Args, Parser, Subcommand};
use packsmith::{
    load_project, zip_directory, Category, Generator, GeneratorConfig, Project, VanillaCatalog,
    VersionList,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "packsmith")]
#[command(author, version, about = "Generate Minecraft data and resource packs from a content project", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate both packs from a project workspace
    Generate {
        /// Project workspace directory (holds project.dat)
        #[arg(short, long)]
        project: PathBuf,

        /// Directory the packs are written into
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        #[command(flatten)]
        catalog: CatalogArgs,

        /// Data pack format (overrides version_list.json)
        #[arg(long)]
        data_format: Option<u32>,

        /// Resource pack format (overrides version_list.json)
        #[arg(long)]
        resource_format: Option<u32>,

        /// Template override directory with one subdirectory per category
        #[arg(long)]
        templates: Option<PathBuf>,

        /// File whose contents replace the default function header
        #[arg(long)]
        header: Option<PathBuf>,

        /// Validate against the catalog before generating
        #[arg(long)]
        validate: bool,

        /// Also write both packs as ZIP archives
        #[arg(long)]
        zip: bool,
    },

    /// Check a project against the vanilla catalog
    Validate {
        /// Project workspace directory (holds project.dat)
        #[arg(short, long)]
        project: PathBuf,

        #[command(flatten)]
        catalog: CatalogArgs,
    },

    /// Show information about a project
    Info {
        /// Project workspace directory (holds project.dat)
        #[arg(short, long)]
        project: PathBuf,
    },
}

#[derive(Args)]
struct CatalogArgs {
    /// Directory holding version_list.json and {version}_data.json files
    #[arg(long)]
    catalog_dir: Option<PathBuf>,

    /// Game version to target (e.g., "1.21.5")
    #[arg(long)]
    game_version: Option<String>,
}

impl CatalogArgs {
    fn catalog(&self) -> Result<Option<VanillaCatalog>, Box<dyn std::error::Error>> {
        match (&self.catalog_dir, &self.game_version) {
            (Some(dir), Some(version)) => Ok(Some(VanillaCatalog::load_version(dir, version)?)),
            _ => Ok(None),
        }
    }

    fn formats(&self) -> Result<Option<(u32, u32)>, Box<dyn std::error::Error>> {
        match (&self.catalog_dir, &self.game_version) {
            (Some(dir), Some(version)) => {
                let versions = VersionList::load(dir.join("version_list.json"))?;
                if !versions.supports(version) {
                    log::warn!("Version {} is not in version_list.json", version);
                }
                Ok(Some(versions.formats(version)?))
            }
            _ => Ok(None),
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Generate {
            project,
            output,
            catalog,
            data_format,
            resource_format,
            templates,
            header,
            validate,
            zip,
        } => {
            let mut config = GeneratorConfig::default().with_output_dir(output);

            let (default_data, default_resource) = (config.data_format, config.resource_format);
            let (data, resource) = catalog.formats()?.unwrap_or((default_data, default_resource));
            config = config.with_formats(data_format.unwrap_or(data), resource_format.unwrap_or(resource));

            if let Some(dir) = templates {
                config = config.with_template_dir(dir);
            }
            if let Some(path) = header {
                config = config.with_header(std::fs::read_to_string(path)?);
            }
            if let Some(catalog) = catalog.catalog()? {
                config = config.with_catalog(catalog);
            }

            generate(&project, config, validate, zip)?;
        }
        Commands::Validate { project, catalog } => {
            let project = load_project(&project)?;
            let Some(catalog) = catalog.catalog()? else {
                return Err("validate needs --catalog-dir and --game-version".into());
            };
            project.validate(&catalog)?;
            println!("Project '{}' is valid", project.details.name);
        }
        Commands::Info { project } => {
            show_project_info(&load_project(&project)?);
        }
    }

    Ok(())
}

fn generate(
    project_dir: &Path,
    config: GeneratorConfig,
    validate: bool,
    zip: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Loading project from {:?}...", project_dir);
    let project = load_project(project_dir)?;

    if validate {
        match &config.catalog {
            Some(catalog) => project.validate(catalog)?,
            None => log::warn!("--validate given without a catalog; skipping validation"),
        }
    }

    println!("Generating with config:");
    println!("  - Data format: {}", config.data_format);
    println!("  - Resource format: {}", config.resource_format);
    if let Some(dir) = &config.template_dir {
        println!("  - Templates: {:?}", dir);
    }

    let generator = Generator::with_config(&project, config);
    let output = generator.generate()?;

    println!("  Data pack: {:?} ({} files)", output.datapack.root, output.datapack.files_written);
    println!(
        "  Resource pack: {:?} ({} files)",
        output.resource_pack.root, output.resource_pack.files_written
    );

    if zip {
        for root in [&output.datapack.root, &output.resource_pack.root] {
            let mut dest = root.clone().into_os_string();
            dest.push(".zip");
            let dest = PathBuf::from(dest);
            let count = zip_directory(root, &dest)?;
            println!("Exported ZIP ({} files) to {:?}", count, dest);
        }
    }

    Ok(())
}

fn show_project_info(project: &Project) {
    let details = &project.details;
    println!("\nProject Info:");
    println!("  Name: {}", details.name);
    println!("  Namespace: {}", details.namespace);
    println!("  Author: {}", details.author);
    if !details.description.is_empty() {
        println!("  Description: {}", details.description);
    }
    for category in Category::ALL {
        println!("  {}: {}", category.as_str(), project.count(category));
    }
}
