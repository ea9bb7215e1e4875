//! Token flattening
//!
//! Walks a token tree depth-first in declaration order and records every
//! token under a namespaced key (`prefix-group-token`). All documents of a
//! build share one [`TokenMap`]; a key written twice keeps the value of the
//! last write. Array elements are keyed by their index.

use crate::format::format_token;
use crate::model::{Token, TokenGroup, TokenNode, ValueKind};
use indexmap::IndexMap;
use std::fmt;

/// Separator between the segments of a namespaced key
pub const SEPARATOR: &str = "-";

/// A node that was skipped while flattening
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Namespaced key the node would have produced
    pub key: String,
    /// What was found instead of a token or group
    pub kind: ValueKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skipped `{}`: expected a token or group, found {}", self.key, self.kind)
    }
}

/// Ordered mapping from namespaced key to formatted value
///
/// Iteration follows first-insertion order. Overwriting a key replaces its
/// value but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenMap {
    entries: IndexMap<String, String>,
    diagnostics: Vec<Diagnostic>,
}

impl TokenMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the one it replaced
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    /// Look up a formatted value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether a key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Entries in ascending byte order of their key
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Nodes skipped so far
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Record a skipped node
    pub fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

/// Join a prefix and a key with [`SEPARATOR`]
///
/// An empty prefix yields the key unchanged.
pub fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}{SEPARATOR}{key}")
    }
}

/// Flatten a node into `tokens` and hand the map back
///
/// ```rust
/// use serde_json::json;
/// use token_core::{flatten, TokenMap, TokenNode};
///
/// let node = TokenNode::from_value(&json!({
///     "padding-4": { "$type": "number", "$value": 8 }
/// }))
/// .unwrap();
///
/// let tokens = flatten(&node, "padding", TokenMap::new());
/// assert_eq!(tokens.get("padding-padding-4"), Some("8px"));
/// ```
pub fn flatten(node: &TokenNode, prefix: &str, mut tokens: TokenMap) -> TokenMap {
    flatten_into(node, prefix, &mut tokens);
    tokens
}

/// Flatten a node into an existing map
///
/// A token is stored under `prefix` itself. A token with an empty prefix has
/// no name and is dropped.
pub fn flatten_into(node: &TokenNode, prefix: &str, tokens: &mut TokenMap) {
    match node {
        TokenNode::Group(group) => flatten_group_into(group, prefix, tokens),
        TokenNode::Leaf(_) if prefix.is_empty() => {
            tracing::debug!("dropping unnamed top-level token");
        }
        TokenNode::Leaf(token) => record(token, prefix.to_string(), tokens),
    }
}

/// Flatten every child of `group` under `prefix`
pub fn flatten_group_into(group: &TokenGroup, prefix: &str, tokens: &mut TokenMap) {
    for (key, child) in group.iter() {
        let name = join_key(prefix, key);
        match child {
            TokenNode::Leaf(token) => record(token, name, tokens),
            TokenNode::Group(nested) => flatten_group_into(nested, &name, tokens),
        }
    }

    for skipped in group.skipped() {
        tokens.push_diagnostic(Diagnostic {
            key: join_key(prefix, &skipped.key),
            kind: skipped.kind,
        });
    }
}

fn record(token: &Token, name: String, tokens: &mut TokenMap) {
    let value = format_token(token);
    if let Some(previous) = tokens.get(&name) {
        tracing::debug!(key = %name, %previous, %value, "token overwritten");
    }
    tokens.insert(name, value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn node(value: Value) -> TokenNode {
        TokenNode::from_value(&value).unwrap()
    }

    #[test]
    fn test_join_key() {
        assert_eq!(join_key("", "grey"), "grey");
        assert_eq!(join_key("raw", "grey"), "raw-grey");
        assert_eq!(join_key("raw-grey", "10"), "raw-grey-10");
    }

    #[test]
    fn test_flatten_nested_groups() {
        let tree = node(json!({
            "primary": {
                "default": {
                    "background": { "$type": "color", "$value": { "hex": "#1E3A5F", "alpha": 1 } },
                    "label": { "$type": "color", "$value": { "hex": "#FFFFFF", "alpha": 1 } }
                },
                "gap": { "$type": "number", "$value": 8 }
            }
        }));

        let tokens = flatten(&tree, "button", TokenMap::new());
        let keys: Vec<&str> = tokens.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "button-primary-default-background",
                "button-primary-default-label",
                "button-primary-gap",
            ]
        );
        assert_eq!(tokens.get("button-primary-gap"), Some("8px"));
    }

    #[test]
    fn test_flatten_without_prefix() {
        let tree = node(json!({ "font": { "$type": "string", "$value": "Inter" } }));
        let tokens = flatten(&tree, "", TokenMap::new());
        assert_eq!(tokens.get("font"), Some("Inter"));
    }

    #[test]
    fn test_flatten_leaf_uses_prefix_as_key() {
        let leaf = node(json!({ "$type": "number", "$value": 4 }));
        assert_eq!(flatten(&leaf, "radius-sm", TokenMap::new()).get("radius-sm"), Some("4px"));
        assert!(flatten(&leaf, "", TokenMap::new()).is_empty());
    }

    #[test]
    fn test_metadata_keys_never_emitted() {
        let tree = node(json!({
            "$description": "palette",
            "grey": {
                "$extensions": { "hidden": { "$type": "number", "$value": 1 } },
                "10": {
                    "$type": "color",
                    "$value": { "hex": "#F5F5F5", "alpha": 1 },
                    "$extensions": { "com.figma.variableId": "VariableID:1:2" }
                }
            }
        }));

        let tokens = flatten(&tree, "raw", TokenMap::new());
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens.get("raw-grey-10"), Some("#F5F5F5"));
        assert!(tokens.iter().all(|(k, _)| !k.contains('$')));
    }

    #[test]
    fn test_last_write_wins() {
        let first = node(json!({ "gap": { "$type": "number", "$value": 4 } }));
        let second = node(json!({ "gap": { "$type": "number", "$value": 16 } }));
        let other = node(json!({ "pad": { "$type": "number", "$value": 2 } }));

        let mut tokens = TokenMap::new();
        flatten_into(&first, "space", &mut tokens);
        flatten_into(&other, "space", &mut tokens);
        flatten_into(&second, "space", &mut tokens);

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens.get("space-gap"), Some("16px"));
        // Overwriting keeps the first position
        assert_eq!(tokens.iter().next(), Some(("space-gap", "16px")));
    }

    #[test]
    fn test_overlapping_paths_collide() {
        // `a` + `b-c` and `a-b` + `c` both produce `x-a-b-c`
        let tree = node(json!({
            "a": { "b-c": { "$type": "string", "$value": "first" } },
            "a-b": { "c": { "$type": "string", "$value": "second" } }
        }));

        let tokens = flatten(&tree, "x", TokenMap::new());
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens.get("x-a-b-c"), Some("second"));
    }

    #[test]
    fn test_malformed_nodes_skipped_with_diagnostics() {
        let tree = node(json!({
            "ok": { "$type": "number", "$value": 1 },
            "nested": {
                "loose": 12,
                "flag": true
            },
            "empty": null
        }));

        let tokens = flatten(&tree, "doc", TokenMap::new());

        assert_eq!(tokens.len(), 1);
        assert!(!tokens.contains_key("doc-nested-loose"));
        assert_eq!(
            tokens.diagnostics(),
            &[
                Diagnostic { key: "doc-nested-loose".into(), kind: ValueKind::Number },
                Diagnostic { key: "doc-nested-flag".into(), kind: ValueKind::Bool },
                Diagnostic { key: "doc-empty".into(), kind: ValueKind::Null },
            ]
        );
        assert_eq!(
            tokens.diagnostics()[0].to_string(),
            "skipped `doc-nested-loose`: expected a token or group, found number"
        );
    }

    #[test]
    fn test_array_elements_flattened_by_index() {
        let tree = node(json!({
            "shadow": [
                { "$type": "number", "$value": 2 },
                { "$type": "number", "$value": 4 }
            ]
        }));

        let tokens = flatten(&tree, "elev", TokenMap::new());
        assert_eq!(
            tokens.iter().collect::<Vec<_>>(),
            vec![("elev-shadow-0", "2px"), ("elev-shadow-1", "4px")]
        );
        assert!(tokens.diagnostics().is_empty());
    }

    #[test]
    fn test_sorted_is_byte_order() {
        let mut tokens = TokenMap::new();
        tokens.insert("raw-grey-b", "2");
        tokens.insert("Raw", "0");
        tokens.insert("raw-grey-a", "1");
        tokens.insert("padding", "3");

        let keys: Vec<&str> = tokens.sorted().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Raw", "padding", "raw-grey-a", "raw-grey-b"]);
    }
}
