//! The in-memory project model handed to the generation pipeline.
//!
//! A project is six element mappings (one per content category) plus the
//! pack details entered when the project was created. Generators only read
//! from it.

pub mod elements;
pub mod loader;

pub use elements::{
    Block, Element, Equipment, Item, Painting, Recipe, RightClick, Structure, DROP_SELF,
};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The six content categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Blocks,
    Items,
    Recipes,
    Paintings,
    Structures,
    Equipment,
}

impl Category {
    /// Categories in generation order.
    pub const ALL: [Category; 6] = [
        Category::Blocks,
        Category::Items,
        Category::Recipes,
        Category::Paintings,
        Category::Structures,
        Category::Equipment,
    ];

    /// Short name used for template directories and project files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Blocks => "blocks",
            Category::Items => "items",
            Category::Recipes => "recipes",
            Category::Paintings => "paintings",
            Category::Structures => "structures",
            Category::Equipment => "equipment",
        }
    }
}

/// Elements of one category keyed by name, iterated in sorted order.
///
/// Inserting a record whose name already exists replaces the old record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementMap<T> {
    elements: BTreeMap<String, T>,
}

impl<T> Default for ElementMap<T> {
    fn default() -> Self {
        Self {
            elements: BTreeMap::new(),
        }
    }
}

impl<T: Element> ElementMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a record under its own name. Returns the replaced record.
    pub fn upsert(&mut self, element: T) -> Option<T> {
        self.elements.insert(element.name().to_string(), element)
    }
}

impl<T> ElementMap<T> {
    pub fn get(&self, name: &str) -> Option<&T> {
        self.elements.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.elements.contains_key(name)
    }

    /// Iterate `(key, record)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.elements.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate records in key order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.elements.values()
    }

    /// Element keys in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.elements.keys().map(|k| k.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<T: Element> FromIterator<T> for ElementMap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut map = Self::new();
        for element in iter {
            map.upsert(element);
        }
        map
    }
}

/// Pack-level details entered when the project was created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackDetails {
    /// Output folder name of the data pack.
    pub name: String,
    pub namespace: String,
    #[serde(default)]
    pub description: String,
    pub author: String,
    /// Target game version ("1.21.11").
    #[serde(default)]
    pub version: String,
}

impl PackDetails {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            description: String::new(),
            author: author.into(),
            version: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

/// A complete project: pack details plus the six element mappings.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub details: PackDetails,
    pub blocks: ElementMap<Block>,
    pub items: ElementMap<Item>,
    pub recipes: ElementMap<Recipe>,
    pub paintings: ElementMap<Painting>,
    pub structures: ElementMap<Structure>,
    pub equipment: ElementMap<Equipment>,
}

impl Project {
    /// Create an empty project.
    pub fn new(details: PackDetails) -> Self {
        Self {
            details,
            blocks: ElementMap::new(),
            items: ElementMap::new(),
            recipes: ElementMap::new(),
            paintings: ElementMap::new(),
            structures: ElementMap::new(),
            equipment: ElementMap::new(),
        }
    }

    /// Number of elements in a category.
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Blocks => self.blocks.len(),
            Category::Items => self.items.len(),
            Category::Recipes => self.recipes.len(),
            Category::Paintings => self.paintings.len(),
            Category::Structures => self.structures.len(),
            Category::Equipment => self.equipment.len(),
        }
    }

    /// Whether a category has any elements.
    pub fn has(&self, category: Category) -> bool {
        self.count(category) > 0
    }

    pub fn namespace(&self) -> &str {
        &self.details.namespace
    }

    pub fn author(&self) -> &str {
        &self.details.author
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn painting(name: &str, width: u32) -> Painting {
        Painting {
            name: name.to_string(),
            display_name: name.to_string(),
            width,
            height: 1,
            placeable: true,
            texture: PathBuf::from(format!("{}.png", name)),
        }
    }

    #[test]
    fn test_upsert_replaces_existing() {
        let mut paintings = ElementMap::new();
        assert!(paintings.upsert(painting("sunset", 1)).is_none());
        let replaced = paintings.upsert(painting("sunset", 4));
        assert_eq!(replaced.map(|p| p.width), Some(1));
        assert_eq!(paintings.len(), 1);
        assert_eq!(paintings.get("sunset").map(|p| p.width), Some(4));
    }

    #[test]
    fn test_iteration_is_sorted() {
        let paintings: ElementMap<Painting> = ["zebra", "apple", "mango"]
            .into_iter()
            .map(|name| painting(name, 1))
            .collect();
        assert_eq!(paintings.names(), vec!["apple", "mango", "zebra"]);
    }

    #[test]
    fn test_category_presence() {
        let mut project = Project::new(PackDetails::new("Pack", "pack", "me"));
        assert!(!project.has(Category::Paintings));
        project.paintings.upsert(painting("sunset", 1));
        assert!(project.has(Category::Paintings));
        assert_eq!(project.count(Category::Blocks), 0);
    }
}
