//! Token document loading
//!
//! Reads a token document from disk and converts it into a [`TokenGroup`].
//! Failures are fatal for the build; nothing is retried.

use crate::model::{TokenGroup, ValueKind};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading a token document
#[derive(Debug, Error)]
pub enum LoadError {
    /// File missing or unreadable
    #[error("IO error reading token document `{id}` ({}): {source}", .path.display())]
    Io {
        /// Document identifier
        id: String,
        /// Resolved file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Invalid JSON syntax
    #[error("Invalid JSON in token document `{id}` ({}): {source}", .path.display())]
    Json {
        /// Document identifier
        id: String,
        /// Resolved file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// Document root is not a JSON object
    #[error("Token document `{id}` ({}) must be a JSON object, found {found}", .path.display())]
    NotAnObject {
        /// Document identifier
        id: String,
        /// Resolved file path
        path: PathBuf,
        /// Kind of the root value
        found: ValueKind,
    },
}

impl LoadError {
    /// Identifier of the document that failed
    pub fn document_id(&self) -> &str {
        match self {
            LoadError::Io { id, .. } | LoadError::Json { id, .. } | LoadError::NotAnObject { id, .. } => id,
        }
    }
}

/// Result type for loading operations
pub type Result<T> = std::result::Result<T, LoadError>;

/// A parsed token document
#[derive(Debug, Clone, PartialEq)]
pub struct TokenDocument {
    /// Document identifier
    pub id: String,
    /// File the document was read from (empty when parsed from a string)
    pub path: PathBuf,
    /// Top-level group
    pub root: TokenGroup,
}

impl TokenDocument {
    /// Parse a token document from a JSON string
    ///
    /// # Examples
    ///
    /// ```
    /// use token_core::TokenDocument;
    ///
    /// let doc = TokenDocument::from_json(
    ///     "typography",
    ///     r#"{ "body": { "family": { "$type": "string", "$value": "Inter" } } }"#,
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(doc.id, "typography");
    /// assert_eq!(doc.root.len(), 1);
    /// ```
    pub fn from_json(id: impl Into<String>, json: &str) -> Result<Self> {
        Self::parse(id.into(), PathBuf::new(), json)
    }

    fn parse(id: String, path: PathBuf, json: &str) -> Result<Self> {
        let value: Value = match serde_json::from_str(json) {
            Ok(value) => value,
            Err(source) => return Err(LoadError::Json { id, path, source }),
        };

        match value {
            Value::Object(object) => {
                let root = TokenGroup::from_object(&object);
                Ok(Self { id, path, root })
            }
            other => Err(LoadError::NotAnObject { id, path, found: ValueKind::of(&other) }),
        }
    }
}

/// Load a token document from `root.join(file)`
///
/// # Examples
///
/// ```no_run
/// use token_core::load_document;
///
/// let doc = load_document("design", "button", "button.json").unwrap();
/// println!("Loaded {} top-level entries", doc.root.len());
/// ```
pub fn load_document(
    root: impl AsRef<Path>,
    id: &str,
    file: impl AsRef<Path>,
) -> Result<TokenDocument> {
    let path = root.as_ref().join(file);
    tracing::debug!(document = id, path = %path.display(), "reading token document");

    let json = match fs::read_to_string(&path) {
        Ok(json) => json,
        Err(source) => return Err(LoadError::Io { id: id.to_string(), path, source }),
    };

    TokenDocument::parse(id.to_string(), path, &json)
}
