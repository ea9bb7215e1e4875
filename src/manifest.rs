//! Build manifest
//!
//! The manifest lists every token document of a build, where it lives, and
//! which parts of it are flattened under which namespace prefix. It also
//! names the input and output locations.
//!
//! A manifest can be written as JSON; every field is optional and falls back
//! to [`Manifest::default`]:
//!
//! ```json
//! {
//!   "tokensDir": "design",
//!   "outDir": "src/tokens",
//!   "documents": [
//!     {
//!       "id": "padding-radius",
//!       "file": "padding&Radi.json",
//!       "sections": [
//!         { "path": ["padding"], "prefix": "padding" },
//!         { "path": ["radi"], "prefix": "radi" }
//!       ]
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Color families present in the semantic and raw palettes
pub const COLOR_FAMILIES: [&str; 5] = ["grey", "blue", "green", "red", "yellow"];

/// Manifest error types
#[derive(Debug, Error)]
pub enum ManifestError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid JSON
    #[error("Invalid manifest JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Structurally valid but unusable manifest
    #[error("Invalid manifest: {0}")]
    Invalid(String),
}

/// Result type for manifest operations
pub type Result<T> = std::result::Result<T, ManifestError>;

/// Part of a document flattened under one prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Keys to follow from the document root before flattening (empty = root)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<String>,
    /// Namespace prefix for every key produced by this section
    pub prefix: String,
}

impl Section {
    /// Flatten the whole document under `prefix`
    pub fn root(prefix: impl Into<String>) -> Self {
        Self { path: Vec::new(), prefix: prefix.into() }
    }

    /// Flatten the group found at `path` under `prefix`
    pub fn nested<I, S>(path: I, prefix: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { path: path.into_iter().map(Into::into).collect(), prefix: prefix.into() }
    }
}

/// A token document and the sections taken from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSpec {
    /// Identifier used in logs and errors
    pub id: String,
    /// File path relative to the tokens directory
    pub file: PathBuf,
    /// Sections flattened in order
    pub sections: Vec<Section>,
}

impl DocumentSpec {
    /// Create a document with no sections
    pub fn new(id: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self { id: id.into(), file: file.into(), sections: Vec::new() }
    }

    /// Append a section
    pub fn section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// One section per color family, each prefixed `<prefix>-<family>`
    pub fn color_families(mut self, prefix: &str) -> Self {
        for family in COLOR_FAMILIES {
            self.sections.push(Section::nested([family], format!("{prefix}-{family}")));
        }
        self
    }
}

/// Build manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Manifest {
    /// Directory the document files are resolved against
    pub tokens_dir: PathBuf,
    /// Directory receiving the generated files
    pub out_dir: PathBuf,
    /// Stylesheet file name
    pub css_file: String,
    /// TypeScript module file name
    pub module_file: String,
    /// Documents, processed in order
    pub documents: Vec<DocumentSpec>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            tokens_dir: PathBuf::from("."),
            out_dir: PathBuf::from("src/tokens"),
            css_file: "tokens.css".to_string(),
            module_file: "tokens.ts".to_string(),
            documents: vec![
                DocumentSpec::new("button", "button.json").section(Section::root("button")),
                DocumentSpec::new("state-layer", "stateLayer.tokens.json")
                    .section(Section::root("state-layer")),
                DocumentSpec::new("padding-radius", "padding&Radi.json")
                    .section(Section::nested(["padding"], "padding"))
                    .section(Section::nested(["radi"], "radi")),
                DocumentSpec::new("typography", "typography.tokens.json")
                    .section(Section::root("typography")),
                DocumentSpec::new("semantic", "semantic.tokens.json").color_families("semantic"),
                DocumentSpec::new("raw", "raw.tokens.json").color_families("raw"),
            ],
        }
    }
}

impl Manifest {
    /// Create a manifest with the given documents and default locations
    pub fn new(documents: Vec<DocumentSpec>) -> Self {
        Self { documents, ..Default::default() }
    }

    /// Parse and validate a manifest from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let manifest: Manifest = serde_json::from_str(json)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Read and validate a manifest file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Set the tokens directory
    pub fn tokens_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tokens_dir = dir.into();
        self
    }

    /// Set the output directory
    pub fn out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = dir.into();
        self
    }

    /// Full path of the generated stylesheet
    pub fn css_path(&self) -> PathBuf {
        self.out_dir.join(&self.css_file)
    }

    /// Full path of the generated module
    pub fn module_path(&self) -> PathBuf {
        self.out_dir.join(&self.module_file)
    }

    /// Check the manifest can drive a build
    pub fn validate(&self) -> Result<()> {
        if self.documents.is_empty() {
            return Err(ManifestError::Invalid("no documents listed".to_string()));
        }

        for (field, name) in [("cssFile", &self.css_file), ("moduleFile", &self.module_file)] {
            if name.trim().is_empty() {
                return Err(ManifestError::Invalid(format!("{field} must not be empty")));
            }
        }
        if self.css_file == self.module_file {
            return Err(ManifestError::Invalid(
                "cssFile and moduleFile must differ".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for doc in &self.documents {
            if !seen.insert(doc.id.as_str()) {
                return Err(ManifestError::Invalid(format!("duplicate document id `{}`", doc.id)));
            }
            if doc.sections.is_empty() {
                return Err(ManifestError::Invalid(format!(
                    "document `{}` has no sections",
                    doc.id
                )));
            }
            if doc.sections.iter().any(|s| s.prefix.is_empty()) {
                return Err(ManifestError::Invalid(format!(
                    "document `{}` has a section with an empty prefix",
                    doc.id
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_manifest_documents() {
        let manifest = Manifest::default();
        manifest.validate().unwrap();

        let ids: Vec<&str> = manifest.documents.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["button", "state-layer", "padding-radius", "typography", "semantic", "raw"]
        );
        assert_eq!(manifest.css_path(), PathBuf::from("src/tokens/tokens.css"));
        assert_eq!(manifest.module_path(), PathBuf::from("src/tokens/tokens.ts"));
    }

    #[test]
    fn test_default_unwrap_paths() {
        let manifest = Manifest::default();

        let padding = &manifest.documents[2];
        assert_eq!(padding.file, PathBuf::from("padding&Radi.json"));
        assert_eq!(
            padding.sections,
            vec![Section::nested(["padding"], "padding"), Section::nested(["radi"], "radi")]
        );

        let semantic = &manifest.documents[4];
        let prefixes: Vec<&str> = semantic.sections.iter().map(|s| s.prefix.as_str()).collect();
        assert_eq!(
            prefixes,
            vec!["semantic-grey", "semantic-blue", "semantic-green", "semantic-red", "semantic-yellow"]
        );
        assert_eq!(semantic.sections[0].path, vec!["grey".to_string()]);
    }

    #[test]
    fn test_from_json_partial_uses_defaults() {
        let manifest = Manifest::from_json(r#"{ "outDir": "dist" }"#).unwrap();

        assert_eq!(manifest.out_dir, PathBuf::from("dist"));
        assert_eq!(manifest.css_file, "tokens.css");
        assert_eq!(manifest.documents.len(), 6);
    }

    #[test]
    fn test_from_json_documents() {
        let json = r#"{
            "tokensDir": "design",
            "documents": [
                { "id": "spacing", "file": "spacing.json", "sections": [{ "prefix": "space" }] }
            ]
        }"#;

        let manifest = Manifest::from_json(json).unwrap();
        assert_eq!(manifest.tokens_dir, PathBuf::from("design"));
        assert_eq!(manifest.documents[0].sections, vec![Section::root("space")]);
    }

    #[test]
    fn test_json_roundtrip() {
        let manifest = Manifest::default();
        let json = serde_json::to_string_pretty(&manifest).unwrap();
        assert!(json.contains("\"cssFile\""));
        assert_eq!(Manifest::from_json(&json).unwrap(), manifest);
    }

    #[test]
    fn test_validate_rejects_bad_manifests() {
        let empty = Manifest::new(Vec::new());
        assert!(matches!(empty.validate(), Err(ManifestError::Invalid(_))));

        let duplicate = Manifest::new(vec![
            DocumentSpec::new("a", "a.json").section(Section::root("a")),
            DocumentSpec::new("a", "b.json").section(Section::root("b")),
        ]);
        assert!(duplicate.validate().unwrap_err().to_string().contains("duplicate"));

        let no_prefix = Manifest::new(vec![DocumentSpec::new("a", "a.json").section(Section::root(""))]);
        assert!(no_prefix.validate().is_err());

        let no_sections = Manifest::new(vec![DocumentSpec::new("a", "a.json")]);
        assert!(no_sections.validate().is_err());

        let mut same_outputs = Manifest::default();
        same_outputs.module_file = "tokens.css".to_string();
        assert!(same_outputs.validate().is_err());
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(Manifest::from_json("{"), Err(ManifestError::Json(_))));
        assert!(matches!(
            Manifest::from_json(r#"{ "documents": [] }"#),
            Err(ManifestError::Invalid(_))
        ));
    }
}
