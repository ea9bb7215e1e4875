//! Token build pipeline
//!
//! Load every document → flatten every section into one [`TokenMap`] →
//! render the stylesheet and the module → write both files.
//!
//! All documents are loaded before anything is flattened, and both artifacts
//! are rendered before anything is written, so a load failure never leaves
//! partial output behind.

use crate::manifest::{Manifest, ManifestError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use token_core::{flatten_group_into, load_document, Diagnostic, LoadError, TokenDocument, TokenMap};
use token_emit::{render_css, render_module, write_artifact};
use tracing::{info, warn};

/// Build error types
#[derive(Debug, Error)]
pub enum BuildError {
    /// Manifest could not be read or is invalid
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// A token document could not be loaded
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Strict mode and at least one node was skipped
    #[error("{} malformed token node(s) skipped in strict mode", .0.len())]
    Strict(Vec<Diagnostic>),

    /// Output could not be written
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        /// Target file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl BuildError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            BuildError::Load(_) | BuildError::Strict(_) => 1,
            BuildError::Manifest(_) => 2,
            BuildError::Write { .. } => 3,
        }
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, BuildError>;

/// Options that change how a build treats its input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Fail instead of skipping malformed nodes
    pub strict: bool,
}

/// Rendered artifacts of a build, not yet written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiled {
    /// Flattened tokens and diagnostics
    pub tokens: TokenMap,
    /// Stylesheet contents
    pub css: String,
    /// TypeScript module contents
    pub module: String,
}

/// Summary of a completed build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Number of distinct tokens written
    pub token_count: usize,
    /// Nodes skipped while flattening
    pub diagnostics: Vec<Diagnostic>,
    /// Written stylesheet
    pub css_path: PathBuf,
    /// Written module
    pub module_path: PathBuf,
}

/// Load every document listed in the manifest, stopping at the first failure
pub fn load_documents(manifest: &Manifest) -> Result<Vec<TokenDocument>> {
    manifest
        .documents
        .iter()
        .map(|spec| {
            load_document(&manifest.tokens_dir, &spec.id, &spec.file).map_err(BuildError::from)
        })
        .collect()
}

/// Flatten the manifest's sections of `documents` into one map
///
/// `documents` must be in manifest order, as returned by [`load_documents`].
/// Sections whose path does not lead to a group are skipped with a warning.
pub fn flatten_documents(manifest: &Manifest, documents: &[TokenDocument]) -> TokenMap {
    let mut tokens = TokenMap::new();

    for (spec, document) in manifest.documents.iter().zip(documents) {
        for section in &spec.sections {
            match document.root.group_at(section.path.as_slice()) {
                Some(group) => flatten_group_into(group, &section.prefix, &mut tokens),
                None => warn!(
                    document = %spec.id,
                    path = %section.path.join("."),
                    "section not found, skipping"
                ),
            }
        }
    }

    tokens
}

/// Load, flatten and render without touching the output directory
pub fn compile(manifest: &Manifest) -> Result<Compiled> {
    info!("Reading token files");
    let documents = load_documents(manifest)?;

    info!("Processing tokens");
    let tokens = flatten_documents(manifest, &documents);
    for diagnostic in tokens.diagnostics() {
        warn!("{diagnostic}");
    }
    info!(count = tokens.len(), "Processed {} tokens", tokens.len());

    let css = render_css(&tokens);
    let module = render_module(&tokens);

    Ok(Compiled { tokens, css, module })
}

/// Run a full build and write both artifacts
pub fn run(manifest: &Manifest, options: &BuildOptions) -> Result<BuildReport> {
    manifest.validate()?;

    let compiled = compile(manifest)?;
    if options.strict && !compiled.tokens.diagnostics().is_empty() {
        return Err(BuildError::Strict(compiled.tokens.diagnostics().to_vec()));
    }

    fs::create_dir_all(&manifest.out_dir)
        .map_err(|source| BuildError::Write { path: manifest.out_dir.clone(), source })?;

    let css_path = manifest.css_path();
    write(&css_path, &compiled.css)?;

    let module_path = manifest.module_path();
    write(&module_path, &compiled.module)?;

    info!("Token build complete");

    Ok(BuildReport {
        token_count: compiled.tokens.len(),
        diagnostics: compiled.tokens.diagnostics().to_vec(),
        css_path,
        module_path,
    })
}

fn write(path: &Path, contents: &str) -> Result<()> {
    info!(path = %path.display(), "Generating {}", path.display());
    write_artifact(path, contents)
        .map_err(|source| BuildError::Write { path: path.to_path_buf(), source })
}
