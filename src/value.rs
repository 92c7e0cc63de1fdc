//! Parsing and pretty-printing of resistor values.
//!
//! Accepts the label forms a parts catalog uses (`"4.7"`, `"1K"`, `"1M Ω"`)
//! and renders values back in the compact `4K7` / `470R` / `1M5` style.

/// Parses a resistor value from a label.
///
/// A leading number followed by an optional `K` (×10³) or `M` (×10⁶)
/// suffix; the suffix match is case-insensitive and trailing unit text is
/// ignored, so `"2.2K Ω"` parses the same as `"2.2k"`.
pub fn parse_r_value(s: &str) -> Option<f64> {
    let s = s.trim();
    let num_end = s
        .find(|c: char| !c.is_ascii_digit() && c != '.' && c != '+' && c != '-')
        .unwrap_or(s.len());
    if num_end == 0 {
        return None;
    }
    let value: f64 = s[..num_end].parse().ok()?;
    let suffix = &s[num_end..];
    let mult = if suffix.contains('K') || suffix.contains('k') {
        1e3
    } else if suffix.contains('M') || suffix.contains('m') {
        1e6
    } else {
        1.0
    };
    Some(value * mult)
}

fn _format_rval(r: f64, unit: &str) -> String {
    let mut val = format!("{}", r);
    if val.contains('.') {
        val.replace('.', unit)
    } else {
        val.push_str(unit);
        val
    }
}

/// Renders a value in compact unit notation: `470R`, `4K7`, `1M5`.
pub fn format_r_value(r: f64) -> String {
    if r < 1000.0 {
        _format_rval(r, "R")
    } else if r < 1_000_000.0 {
        _format_rval(r / 1000.0, "K")
    } else {
        _format_rval(r / 1_000_000.0, "M")
    }
}
