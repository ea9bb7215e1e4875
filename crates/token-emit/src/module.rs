//! TypeScript constant module emitter
//!
//! Tokens are grouped by the first segment of their key. Inside a group each
//! token becomes a member named after the rest of its key (with `-` turned
//! into `_`) whose value references the matching custom property:
//!
//! ```text
//! export const tokens = {
//!   raw: {
//!     grey_black: 'var(--raw-grey-black)',
//!   },
//! } as const;
//! ```
//!
//! Groups and members keep the insertion order of the [`TokenMap`], unlike
//! the stylesheet which is sorted.

use crate::GENERATED_HEADER;
use indexmap::IndexMap;
use token_core::{TokenMap, SEPARATOR};

/// Name of the exported constant
pub const EXPORT_NAME: &str = "tokens";

/// Tokens sharing a first key segment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstantGroup {
    /// First key segment
    pub name: String,
    /// Member name → full namespaced key
    pub members: IndexMap<String, String>,
}

/// Group the tokens of `tokens` by their first key segment
///
/// Keys without anything after the group segment produce no member. When two
/// keys of a group map to the same member name the later key wins.
pub fn group_constants(tokens: &TokenMap) -> Vec<ConstantGroup> {
    let mut groups: IndexMap<&str, ConstantGroup> = IndexMap::new();

    for (key, _) in tokens.iter() {
        let (group_name, rest) = key.split_once(SEPARATOR).unwrap_or((key, ""));
        let group = groups.entry(group_name).or_insert_with(|| ConstantGroup {
            name: group_name.to_string(),
            members: IndexMap::new(),
        });

        if rest.is_empty() {
            continue;
        }

        let member = rest.replace(SEPARATOR, "_");
        if let Some(previous) = group.members.insert(member, key.to_string()) {
            tracing::warn!(
                group = group_name,
                previous = %previous,
                key = key,
                "module member name collision, keeping the later token"
            );
        }
    }

    groups.into_values().collect()
}

/// Render the TypeScript constant module
pub fn render_module(tokens: &TokenMap) -> String {
    let mut ts = format!("{GENERATED_HEADER}\n\nexport const {EXPORT_NAME} = {{\n");

    for group in group_constants(tokens) {
        ts.push_str(&format!("  {}: {{\n", property_name(&group.name)));
        for (member, key) in &group.members {
            let reference = quote(&format!("var(--{key})"));
            ts.push_str(&format!("    {}: {},\n", property_name(member), reference));
        }
        ts.push_str("  },\n");
    }

    ts.push_str("} as const;\n\n");
    ts.push_str(&format!("export type TokenPath = keyof typeof {EXPORT_NAME};\n"));
    ts
}

/// Identifier as-is, anything else as a quoted property name
fn property_name(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        quote(name)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn quote(text: &str) -> String {
    let escaped = text.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}
