//! Stylesheet emitter
//!
//! One `:root` block with a custom property per token, in ascending key
//! order so regenerated files diff cleanly.

use crate::GENERATED_HEADER;
use token_core::TokenMap;

/// Render the custom-property stylesheet
pub fn render_css(tokens: &TokenMap) -> String {
    let mut css = format!("{GENERATED_HEADER}\n\n:root {{\n");

    for (name, value) in tokens.sorted() {
        css.push_str(&format!("  --{name}: {value};\n"));
    }

    css.push_str("}\n");
    css
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty() {
        let css = render_css(&TokenMap::new());
        assert_eq!(
            css,
            "/* Auto-generated from design tokens - DO NOT EDIT MANUALLY */\n\n:root {\n}\n"
        );
    }

    #[test]
    fn test_render_sorted_regardless_of_insertion() {
        let mut tokens = TokenMap::new();
        tokens.insert("semantic-red-60", "rgba(17, 34, 51, 0.5)");
        tokens.insert("button-primary-gap", "8px");
        tokens.insert("raw-grey-black", "#000000");

        let css = render_css(&tokens);
        let lines: Vec<&str> = css.lines().filter(|l| l.starts_with("  --")).collect();
        assert_eq!(
            lines,
            vec![
                "  --button-primary-gap: 8px;",
                "  --raw-grey-black: #000000;",
                "  --semantic-red-60: rgba(17, 34, 51, 0.5);",
            ]
        );
    }

    #[test]
    fn test_render_strictly_ascending() {
        let mut tokens = TokenMap::new();
        for key in ["b-2", "a-10", "b-10", "a-2", "A", "a"] {
            tokens.insert(key, "1px");
        }

        let css = render_css(&tokens);
        let names: Vec<&str> = css
            .lines()
            .filter_map(|l| l.strip_prefix("  --"))
            .filter_map(|l| l.split(':').next())
            .collect();

        assert_eq!(names.len(), 6);
        assert!(names.windows(2).all(|w| w[0] < w[1]), "not sorted: {names:?}");
    }

    #[test]
    fn test_render_is_wrapped_in_root_block() {
        let mut tokens = TokenMap::new();
        tokens.insert("typography-body-family", "Inter");

        let css = render_css(&tokens);
        assert!(css.starts_with(GENERATED_HEADER));
        assert!(css.contains(":root {\n  --typography-body-family: Inter;\n}\n"));
        assert!(css.ends_with("}\n"));
    }
}
