//! Value-to-text rendering rules.
//!
//! These rules must match what the controller's parser accepts byte for byte:
//!
//! | Value              | Text                         |
//! |--------------------|------------------------------|
//! | `+inf` / `-inf`    | `Infinity` / `-Infinity`     |
//! | `NaN`              | `NaN`                        |
//! | `true` / `false`   | `true` / `false`             |
//! | string `s`         | `"s"` (no escaping)          |
//! | integer            | decimal                      |
//! | finite float       | shortest round-trip, `1.0`, `1e-05` |
//! | sequence           | `[a,b,c]`, `[]` when empty   |

use std::fmt::Write;

use tracing::warn;

use crate::error::{EncodeError, Result};
use crate::value::Value;

/// Render one argument value. `name` is only used for error context.
pub fn render_value(name: &str, value: &Value, out: &mut String) -> Result<()> {
    match value {
        Value::Int(v) => {
            let _ = write!(out, "{v}");
        }
        Value::Float(v) => out.push_str(&format_float(*v)),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Str(s) => {
            if s.contains(['"', '\\']) {
                warn!(argument = name, "string argument contains unescaped quote or backslash");
            }
            out.push('"');
            out.push_str(s);
            out.push('"');
        }
        Value::Sequence(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if !item.is_numeric() {
                    return Err(EncodeError::UnsupportedValueKind {
                        name: name.to_string(),
                        kind: item.kind(),
                    });
                }
                if i > 0 {
                    out.push(',');
                }
                render_value(name, item, out)?;
            }
            out.push(']');
        }
    }
    Ok(())
}

/// Render a float using shortest round-trip digits.
///
/// Integral values keep a `.0` suffix; decimal exponents below -4 or at
/// least 16 switch to scientific form with a signed two-digit exponent.
pub fn format_float(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let (negative, digits, exp) = decompose(&format!("{v:e}"));
    let mut out = String::with_capacity(digits.len() + 8);
    if negative {
        out.push('-');
    }

    if (-4..16).contains(&exp) {
        if exp < 0 {
            out.push_str("0.");
            for _ in 0..(-exp - 1) {
                out.push('0');
            }
            out.push_str(&digits);
        } else {
            let int_len = exp as usize + 1;
            if digits.len() <= int_len {
                out.push_str(&digits);
                for _ in digits.len()..int_len {
                    out.push('0');
                }
                out.push_str(".0");
            } else {
                out.push_str(&digits[..int_len]);
                out.push('.');
                out.push_str(&digits[int_len..]);
            }
        }
    } else {
        push_scientific(&mut out, &digits, exp);
    }
    out
}

/// Render a float like C's `%g`: six significant digits, trailing zeros
/// removed. Non-finite values fall back to [`format_float`] tokens.
pub fn format_general(v: f64) -> String {
    const PRECISION: i32 = 6;

    if !v.is_finite() {
        return format_float(v);
    }

    let rounded = format!("{:.*e}", (PRECISION - 1) as usize, v);
    let (negative, digits, exp) = decompose(&rounded);

    let mut out = String::new();
    if (-4..PRECISION).contains(&exp) {
        let decimals = (PRECISION - 1 - exp) as usize;
        let fixed = format!("{:.*}", decimals, v);
        out.push_str(trim_fraction(&fixed));
    } else {
        if negative {
            out.push('-');
        }
        push_scientific(&mut out, digits.trim_end_matches('0'), exp);
    }
    out
}

/// Split Rust `{:e}` output (`-1.25e-3`) into sign, bare digits and exponent.
fn decompose(sci: &str) -> (bool, String, i32) {
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci, "0"));
    let negative = mantissa.starts_with('-');
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    (negative, digits, exp.parse().unwrap_or(0))
}

fn push_scientific(out: &mut String, digits: &str, exp: i32) {
    let digits = if digits.is_empty() { "0" } else { digits };
    out.push_str(&digits[..1]);
    if digits.len() > 1 {
        out.push('.');
        out.push_str(&digits[1..]);
    }
    let sign = if exp < 0 { '-' } else { '+' };
    let _ = write!(out, "e{sign}{:02}", exp.unsigned_abs());
}

fn trim_fraction(fixed: &str) -> &str {
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed
    }
}
