//! Design token model and flattening
//!
//! This crate turns hierarchical design-token documents into a flat, ordered
//! mapping from namespaced keys to CSS-ready values.
//!
//! # Modules
//!
//! - [`model`] - Token tree (leaves and groups) decided once at parse time
//! - [`loader`] - Reading and parsing token documents from disk
//! - [`format`] - Type-directed value formatting (`color`, `number`, `string`)
//! - [`flatten`] - Recursive namespacing into a [`TokenMap`]
//!
//! # Example
//!
//! ```rust
//! use token_core::{flatten_group_into, TokenDocument, TokenMap};
//!
//! let json = r##"{
//!   "primary": { "$type": "color", "$value": { "hex": "#112233", "alpha": 0.5 } },
//!   "gap": { "$type": "number", "$value": 12 }
//! }"##;
//!
//! let doc = TokenDocument::from_json("demo", json).unwrap();
//! let mut tokens = TokenMap::new();
//! flatten_group_into(&doc.root, "demo", &mut tokens);
//!
//! assert_eq!(tokens.get("demo-primary"), Some("rgba(17, 34, 51, 0.5)"));
//! assert_eq!(tokens.get("demo-gap"), Some("12px"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod flatten;
pub mod format;
pub mod loader;
pub mod model;

pub use flatten::{
    flatten, flatten_group_into, flatten_into, join_key, Diagnostic, TokenMap, SEPARATOR,
};
pub use format::{coerce, format_color, format_number, format_token, parse_hex_color};
pub use loader::{load_document, LoadError, TokenDocument};
pub use model::{SkippedEntry, Token, TokenGroup, TokenNode, TokenType, ValueKind};
