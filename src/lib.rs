//! Design token build pipeline
//!
//! Compiles hierarchical design-token documents into a CSS custom-property
//! stylesheet and a TypeScript constant module.
//!
//! # Modules
//!
//! - [`manifest`] - Which documents are read and how they are namespaced
//! - [`pipeline`] - Load → flatten → render → write
//!
//! The token model, formatting and flattening live in [`token_core`]; the
//! emitters live in [`token_emit`].
//!
//! # Example
//!
//! ```no_run
//! use token_build::{run, BuildOptions, Manifest};
//!
//! let manifest = Manifest::default().tokens_dir("design").out_dir("src/tokens");
//! let report = run(&manifest, &BuildOptions::default()).unwrap();
//! println!("{} tokens written to {}", report.token_count, report.css_path.display());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod manifest;
pub mod pipeline;

pub use manifest::{DocumentSpec, Manifest, ManifestError, Section, COLOR_FAMILIES};
pub use pipeline::{
    compile, flatten_documents, load_documents, run, BuildError, BuildOptions, BuildReport,
    Compiled,
};
