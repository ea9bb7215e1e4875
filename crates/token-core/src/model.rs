//! Token tree model
//!
//! A token document is a JSON object whose nested objects are either
//! **leaves** (objects carrying both `$type` and `$value`) or **groups** of
//! further nodes. The shape of every node is decided once, when the raw JSON
//! is converted into a [`TokenNode`]; later stages never re-inspect the JSON.
//!
//! # Example
//!
//! ```json
//! {
//!   "$description": "ignored",
//!   "grey": {
//!     "10": { "$type": "color", "$value": { "hex": "#F5F5F5", "alpha": 1 } }
//!   }
//! }
//! ```

use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fmt;

/// Keys starting with this marker carry metadata and are never nesting keys
pub const METADATA_PREFIX: char = '$';

/// Key holding a leaf's type tag
pub const TYPE_KEY: &str = "$type";

/// Key holding a leaf's raw value
pub const VALUE_KEY: &str = "$value";

/// Declared type of a token leaf
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// Color, either a bare string or `{ hex, alpha }`
    Color,
    /// Dimension rendered in pixels
    Number,
    /// Literal string
    String,
    /// Any other tag, kept verbatim
    Other(String),
}

impl TokenType {
    /// Tag text as written in the document
    pub fn as_str(&self) -> &str {
        match self {
            TokenType::Color => "color",
            TokenType::Number => "number",
            TokenType::String => "string",
            TokenType::Other(tag) => tag,
        }
    }

    fn from_tag(tag: &Value) -> Self {
        match tag {
            Value::String(s) => Self::from(s.as_str()),
            other => TokenType::Other(other.to_string()),
        }
    }
}

impl From<&str> for TokenType {
    fn from(tag: &str) -> Self {
        match tag {
            "color" => TokenType::Color,
            "number" => TokenType::Number,
            "string" => TokenType::String,
            other => TokenType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single design token
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Declared type tag
    pub token_type: TokenType,
    /// Raw `$value`, formatted later according to `token_type`
    pub value: Value,
}

impl Token {
    /// Create a token from a type tag and a raw value
    pub fn new(token_type: impl Into<TokenType>, value: Value) -> Self {
        Self { token_type: token_type.into(), value }
    }
}

/// Kind of a JSON value, used when reporting nodes that are not tokens or groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `null`
    Null,
    /// `true` / `false`
    Bool,
    /// Any number
    Number,
    /// Any string
    String,
    /// Any array
    Array,
    /// Any object
    Object,
}

impl ValueKind {
    /// Classify a JSON value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Human-readable name
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A child that was neither a token nor a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Key of the child inside its group
    pub key: String,
    /// What was found instead
    pub kind: ValueKind,
}

/// A named collection of token nodes, in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenGroup {
    entries: IndexMap<String, TokenNode>,
    skipped: Vec<SkippedEntry>,
}

impl TokenGroup {
    /// Create an empty group
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a group from a JSON object
    ///
    /// Metadata keys are dropped. Children that are neither objects nor arrays
    /// are recorded in [`TokenGroup::skipped`] instead of becoming entries.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        Self::from_children(
            object
                .iter()
                .filter(|(key, _)| !key.starts_with(METADATA_PREFIX))
                .map(|(key, value)| (key.clone(), value)),
        )
    }

    /// Build a group from a JSON array, keyed by element index (`"0"`, `"1"`, ...)
    pub fn from_array(items: &[Value]) -> Self {
        Self::from_children(items.iter().enumerate().map(|(index, value)| (index.to_string(), value)))
    }

    fn from_children<'a>(children: impl IntoIterator<Item = (String, &'a Value)>) -> Self {
        let mut group = Self::new();

        for (key, value) in children {
            match value {
                Value::Object(child) => {
                    group.entries.insert(key, TokenNode::from_object(child));
                }
                Value::Array(items) => {
                    group.entries.insert(key, TokenNode::Group(Self::from_array(items)));
                }
                other => group.skipped.push(SkippedEntry { key, kind: ValueKind::of(other) }),
            }
        }

        group
    }

    /// Add or replace a child node
    pub fn with_entry(mut self, key: impl Into<String>, node: impl Into<TokenNode>) -> Self {
        self.entries.insert(key.into(), node.into());
        self
    }

    /// Look up a direct child
    pub fn get(&self, key: &str) -> Option<&TokenNode> {
        self.entries.get(key)
    }

    /// Follow a path of keys down to a nested group
    ///
    /// An empty path resolves to `self`. Returns `None` if any step is
    /// missing or lands on a token.
    pub fn group_at<S: AsRef<str>>(&self, path: &[S]) -> Option<&TokenGroup> {
        path.iter().try_fold(self, |group, key| match group.get(key.as_ref())? {
            TokenNode::Group(child) => Some(child),
            TokenNode::Leaf(_) => None,
        })
    }

    /// Iterate over children in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TokenNode)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Children that were dropped because they were neither objects nor arrays
    pub fn skipped(&self) -> &[SkippedEntry] {
        &self.skipped
    }

    /// Number of children
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the group has no children
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A node in a token tree
#[derive(Debug, Clone, PartialEq)]
pub enum TokenNode {
    /// A token carrying a type tag and a value
    Leaf(Token),
    /// A group of further nodes
    Group(TokenGroup),
}

impl TokenNode {
    /// Convert a JSON value into a node
    ///
    /// Objects become leaves or groups and arrays become groups keyed by
    /// index; any other value yields `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(object) => Some(Self::from_object(object)),
            Value::Array(items) => Some(TokenNode::Group(TokenGroup::from_array(items))),
            _ => None,
        }
    }

    /// Convert a JSON object into a leaf (if it has `$type` and `$value`) or a group
    pub fn from_object(object: &Map<String, Value>) -> Self {
        match (object.get(TYPE_KEY), object.get(VALUE_KEY)) {
            (Some(tag), Some(value)) => TokenNode::Leaf(Token {
                token_type: TokenType::from_tag(tag),
                value: value.clone(),
            }),
            _ => TokenNode::Group(TokenGroup::from_object(object)),
        }
    }

    /// Whether this node is a token
    pub fn is_leaf(&self) -> bool {
        matches!(self, TokenNode::Leaf(_))
    }
}

impl From<Token> for TokenNode {
    fn from(token: Token) -> Self {
        TokenNode::Leaf(token)
    }
}

impl From<TokenGroup> for TokenNode {
    fn from(group: TokenGroup) -> Self {
        TokenNode::Group(group)
    }
}
