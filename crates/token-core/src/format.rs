//! Value formatting
//!
//! Converts a token's raw `$value` into the text written after the colon of
//! a CSS custom-property declaration. Formatting only depends on the type tag
//! and the value, so identical input always yields identical output.

use crate::model::{Token, TokenType};
use serde_json::{Number, Value};

/// Format a token according to its type tag
///
/// - `color`: see [`format_color`]
/// - `number`: the value followed by `px`
/// - `string` and unknown tags: the value as text (see [`coerce`])
pub fn format_token(token: &Token) -> String {
    match &token.token_type {
        TokenType::Color => format_color(&token.value),
        TokenType::Number => format!("{}px", coerce(&token.value)),
        TokenType::String | TokenType::Other(_) => coerce(&token.value),
    }
}

/// Format a color value
///
/// A structured `{ "hex": "#RRGGBB", "alpha": a }` becomes `rgba(r, g, b, a)`
/// when `a` is a number (or numeric string) other than 1, and the hex string
/// otherwise. A hex string that cannot be decoded is returned unchanged.
pub fn format_color(value: &Value) -> String {
    let Value::Object(color) = value else {
        return coerce(value);
    };

    let Some(hex) = color.get("hex").and_then(Value::as_str) else {
        return coerce(value);
    };

    match color.get("alpha").and_then(translucent_alpha) {
        Some(alpha) => match parse_hex_color(hex) {
            Some((r, g, b)) => format!("rgba({r}, {g}, {b}, {alpha})"),
            None => hex.to_string(),
        },
        None => hex.to_string(),
    }
}

/// Alpha text for `rgba()`, or `None` when the color is opaque or has no usable alpha
fn translucent_alpha(alpha: &Value) -> Option<String> {
    match alpha {
        Value::Number(n) => n.as_f64().filter(|a| *a != 1.0).map(|_| format_number(n)),
        Value::String(s) => {
            let text = s.trim();
            text.parse::<f64>()
                .ok()
                .filter(|a| a.is_finite() && *a != 1.0)
                .map(|_| text.to_string())
        }
        _ => None,
    }
}

/// Parse a hex color string to RGB components
///
/// The leading `#` is optional; anything after the first six digits (such as
/// an alpha pair) is ignored.
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
    Some((r, g, b))
}

/// Render a JSON number in its shortest form
///
/// Integral floats lose their fractional part (`12.0` → `12`). Magnitudes of
/// `1e21` and above or below `1e-6` use exponent notation (`1e+21`, `1e-7`),
/// the same way JavaScript prints numbers.
pub fn format_number(number: &Number) -> String {
    if let Some(i) = number.as_i64() {
        i.to_string()
    } else if let Some(u) = number.as_u64() {
        u.to_string()
    } else {
        number.as_f64().map(format_f64).unwrap_or_else(|| number.to_string())
    }
}

fn format_f64(value: f64) -> String {
    // -0 prints as 0
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    // `{:e}` yields the shortest round-trip digits, e.g. `1.5e-7`
    let scientific = format!("{:e}", value.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return value.to_string();
    };

    let digits = mantissa.replace('.', "");
    let count = digits.len() as i32;
    // Position of the decimal point relative to the first digit
    let point = exponent + 1;

    let body = if count <= point && point <= 21 {
        format!("{digits}{}", "0".repeat((point - count) as usize))
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        format!("{int}.{frac}")
    } else if -6 < point && point <= 0 {
        format!("0.{}{digits}", "0".repeat((-point) as usize))
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{first}e{sign}{}", exponent.abs())
        } else {
            format!("{first}.{rest}e{sign}{}", exponent.abs())
        }
    };

    if value < 0.0 {
        format!("-{body}")
    } else {
        body
    }
}

/// Render any JSON value as plain text
///
/// Strings are returned verbatim, numbers via [`format_number`], arrays as
/// their coerced elements joined with `,`, and objects as compact JSON.
pub fn coerce(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => format_number(n),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(items) => items.iter().map(coerce).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}
