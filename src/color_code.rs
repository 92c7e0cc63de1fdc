//! Resistor identification codes: color bands and SMD markings.
//!
//! All encoders are total functions over `f64`: a non-positive or non-finite
//! input yields the `"(invalid)"` sentinel and nothing ever panics.

/// Band colors for digits 0..=9. The multiplier band uses the same palette,
/// indexed by the power of ten (Black = ×1 up to White = ×10⁹).
pub const COLOR_NAMES: [&str; 10] = [
    "Black", "Brown", "Red", "Orange", "Yellow", "Green", "Blue", "Violet", "Grey", "White",
];

const INVALID: &str = "(invalid)";

/// Normalizes `ohms` to `digits` significant figures: returns the rounded
/// significand and the power-of-ten exponent, after one carry step in either
/// direction. The exponent is pre-clamped to `[0, 9]` but may leave that
/// range through the carry; callers apply their own final clamp. The
/// significand is clamped to its digit-safe upper bound so extreme inputs
/// (beyond the ×10⁹ multiplier) cannot index past the palette.
fn normalize(ohms: f64, digits: u32) -> (i64, i64) {
    let hi = 10i64.pow(digits) - 1;
    let lo = (hi + 1) / 10;

    let mut exp10 = (ohms.log10().floor() as i64 - (digits as i64 - 1)).clamp(0, 9);
    let mut sig = (ohms / 10f64.powi(exp10 as i32)).round() as i64;
    if sig > hi {
        sig /= 10;
        exp10 += 1;
    }
    if sig < lo {
        sig *= 10;
        exp10 -= 1;
    }
    (sig.min(hi), exp10)
}

/// 4-band color code: two digit bands, a multiplier band, and the fixed 5%
/// "Gold" tolerance band.
///
/// ```
/// assert_eq!(rnetcalc::four_band_code(10.0), "Brown-Black-Black-Gold");
/// ```
pub fn four_band_code(ohms: f64) -> String {
    if ohms <= 0.0 || !ohms.is_finite() {
        return INVALID.to_string();
    }
    let (sig2, exp10) = normalize(ohms, 2);
    let exp10 = exp10.clamp(0, 9) as usize;
    format!(
        "{}-{}-{}-Gold",
        COLOR_NAMES[(sig2 / 10) as usize],
        COLOR_NAMES[(sig2 % 10) as usize],
        COLOR_NAMES[exp10]
    )
}

/// 5-band color code: three digit bands, a multiplier band, and the fixed 1%
/// "Brown" tolerance band.
pub fn five_band_code(ohms: f64) -> String {
    if ohms <= 0.0 || !ohms.is_finite() {
        return INVALID.to_string();
    }
    let (sig3, exp10) = normalize(ohms, 3);
    let exp10 = exp10.clamp(0, 9) as usize;
    format!(
        "{}-{}-{}-{}-Brown",
        COLOR_NAMES[(sig3 / 100) as usize],
        COLOR_NAMES[((sig3 / 10) % 10) as usize],
        COLOR_NAMES[(sig3 % 10) as usize],
        COLOR_NAMES[exp10]
    )
}

/// SMD marking, 3-digit style: two significant digits followed by the power
/// of ten, with `R` notation below 10 Ω.
///
/// ```
/// assert_eq!(rnetcalc::smd_code(4.7), "4R7");
/// assert_eq!(rnetcalc::smd_code(10_000.0), "103");
/// ```
pub fn smd_code(ohms: f64) -> String {
    if ohms <= 0.0 || !ohms.is_finite() {
        return INVALID.to_string();
    }
    if ohms < 10.0 {
        let whole = ohms as i64;
        let tenth = (((ohms - whole as f64) * 10.0).round() as i64) % 10;
        return format!("{}R{}", whole, tenth);
    }
    let (sig2, exp10) = normalize(ohms, 2);
    format!("{}{}", sig2, exp10.max(0))
}

/// One-line summary of all three codes for a value, as shown under ranked
/// results.
pub fn code_summary(ohms: f64) -> String {
    format!(
        "{:.2} Ω: 4-band: {} | 5-band: {} | SMD: {}",
        ohms,
        four_band_code(ohms),
        five_band_code(ohms),
        smd_code(ohms)
    )
}

/// Deduplicates leaf values for display, first occurrence kept.
///
/// Values are grouped at centiohm resolution (quantized to `round(v · 100)`)
/// so the grouping does not depend on platform floating-point noise.
pub fn unique_values(values: &[f64]) -> Vec<f64> {
    let mut seen: Vec<i64> = Vec::new();
    let mut out = Vec::new();
    for &v in values {
        let q = (v * 100.0).round() as i64;
        if !seen.contains(&q) {
            seen.push(q);
            out.push(v);
        }
    }
    out
}
