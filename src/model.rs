//! Custom model JSON handling.
//!
//! Models exported from a modelling tool reference their textures by bare
//! names. Before a model is written into the resource pack its texture map
//! is rewritten so every reference points into the pack's namespace.

use crate::error::{PackError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// A block or item model file.
///
/// Only the fields the pipeline touches are typed; everything else
/// (elements, display transforms, gui_light, ...) passes through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelFile {
    /// Parent model to inherit from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Texture variable definitions.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub textures: BTreeMap<String, String>,

    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl ModelFile {
    /// Parse a model from JSON text. Anything that is not strict JSON is rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a model file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| PackError::io(path, e))?;
        Self::from_json(&contents)
    }

    /// Rewrite texture references to `{namespace}:item/{texture}`.
    ///
    /// `#variable` references and already namespaced ids are kept.
    pub fn qualify_textures(&mut self, namespace: &str) {
        for texture in self.textures.values_mut() {
            if !texture.starts_with('#') && !texture.contains(':') {
                *texture = format!("{}:item/{}", namespace, texture);
            }
        }
    }

    /// Resolve a texture reference (e.g., "#side") one level through the texture map.
    fn resolve_texture<'a>(&'a self, reference: &'a str) -> Option<&'a str> {
        match reference.strip_prefix('#') {
            Some(key) => self.textures.get(key).map(|s| s.as_str()),
            None => Some(reference),
        }
    }

    /// Texture variables whose `#reference` points at nothing.
    pub fn dangling_references(&self) -> Vec<(&str, &str)> {
        self.textures
            .iter()
            .filter(|(_, texture)| self.resolve_texture(texture).is_none())
            .map(|(key, texture)| (key.as_str(), texture.as_str()))
            .collect()
    }

    /// Serialize with four-space indentation.
    pub fn to_json_pretty(&self) -> Result<String> {
        crate::generator::to_pretty_json(self)
    }
}
