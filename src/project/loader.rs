//! Project loading from a workspace directory.
//!
//! A workspace holds `project.dat` (pack details) and one JSON file per
//! content category, each a mapping of element name to element record.

use super::{Category, ElementMap, PackDetails, Project};
use crate::error::{PackError, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;

/// Contents of `project.dat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectFile {
    /// Editor version that last saved the project.
    #[serde(default)]
    pub app_version: String,
    #[serde(rename = "packDetails")]
    pub pack_details: PackDetails,
}

/// Load a project from a workspace directory.
///
/// Missing category files load as empty mappings.
pub fn load_project_dir<P: AsRef<Path>>(path: P) -> Result<Project> {
    let path = path.as_ref();

    let project_file = path.join("project.dat");
    let contents = std::fs::read_to_string(&project_file)
        .map_err(|e| PackError::io(&project_file, e))?;
    let header: ProjectFile = serde_json::from_str(&contents)?;

    let mut project = Project::new(header.pack_details);
    project.blocks = load_category(path, Category::Blocks)?;
    project.items = load_category(path, Category::Items)?;
    project.recipes = load_category(path, Category::Recipes)?;
    project.paintings = load_category(path, Category::Paintings)?;
    project.structures = load_category(path, Category::Structures)?;
    project.equipment = load_category(path, Category::Equipment)?;

    for category in Category::ALL {
        log::debug!("Loaded {} {}", project.count(category), category.as_str());
    }

    Ok(project)
}

fn load_category<T: DeserializeOwned>(dir: &Path, category: Category) -> Result<ElementMap<T>> {
    let file = dir.join(format!("{}.json", category.as_str()));
    if !file.exists() {
        return Ok(ElementMap::default());
    }

    let contents = std::fs::read_to_string(&file).map_err(|e| PackError::io(&file, e))?;
    serde_json::from_str(&contents).map_err(|e| {
        PackError::Validation(format!("{}: {}", file.display(), e))
    })
}
