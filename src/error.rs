//! Error types for pack generation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using PackError.
pub type Result<T> = std::result::Result<T, PackError>;

/// Main error type for project validation and pack generation.
#[derive(Error, Debug)]
pub enum PackError {
    /// An element field holds a value the target game cannot accept.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A name does not resolve against the vanilla catalog or the project elements.
    #[error("Unresolved reference: {0}")]
    Reference(String),

    /// A field required by a generator is absent from an element record.
    #[error("Element '{element}' is missing field '{field}'")]
    MissingField { element: String, field: String },

    /// The named template does not exist in the category's template set.
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// A template failed to parse.
    #[error("Template syntax error: {0}")]
    TemplateSyntax(String),

    /// A template referenced a context key that was not supplied.
    #[error("Undefined template variable: {0}")]
    UndefinedVariable(String),

    /// Any other template rendering failure.
    #[error("Template error: {0}")]
    Template(String),

    /// A file was written before its parent directory was created.
    #[error("Parent directory missing for {0}")]
    MissingDirectory(PathBuf),

    /// I/O error during file operations.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse or write JSON data.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to read a texture image.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Failed to write a ZIP archive.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

impl PackError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PackError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn missing_field(element: &str, field: &str) -> Self {
        PackError::MissingField {
            element: element.to_string(),
            field: field.to_string(),
        }
    }
}

impl From<minijinja::Error> for PackError {
    fn from(err: minijinja::Error) -> Self {
        use minijinja::ErrorKind;

        match err.kind() {
            ErrorKind::TemplateNotFound => PackError::TemplateNotFound(err.to_string()),
            ErrorKind::SyntaxError => PackError::TemplateSyntax(err.to_string()),
            ErrorKind::UndefinedError => PackError::UndefinedVariable(err.to_string()),
            _ => PackError::Template(err.to_string()),
        }
    }
}
