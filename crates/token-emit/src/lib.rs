//! Artifact emitters for flattened design tokens
//!
//! This crate turns a [`TokenMap`](token_core::TokenMap) into the two
//! generated files consumed by the UI layer:
//!
//! - [`css`] - `:root` custom-property stylesheet, sorted by key
//! - [`module`] - TypeScript constant module referencing the custom properties
//! - [`writer`] - Atomic file output
//!
//! # Example
//!
//! ```rust
//! use token_core::TokenMap;
//! use token_emit::{render_css, render_module};
//!
//! let mut tokens = TokenMap::new();
//! tokens.insert("raw-grey-black", "#000000");
//!
//! assert!(render_css(&tokens).contains("  --raw-grey-black: #000000;\n"));
//! assert!(render_module(&tokens).contains("    grey_black: 'var(--raw-grey-black)',\n"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod css;
pub mod module;
pub mod writer;

pub use css::render_css;
pub use module::{group_constants, render_module, ConstantGroup, EXPORT_NAME};
pub use writer::write_artifact;

/// First line of every generated file
pub const GENERATED_HEADER: &str = "/* Auto-generated from design tokens - DO NOT EDIT MANUALLY */";
