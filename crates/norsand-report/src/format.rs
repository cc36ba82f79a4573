//! Number formatting for the report tables.
//!
//! The tables are consumed by existing analysis scripts, so the textual
//! layout is fixed: C-style exponents (`e-02`, `e+00`) and lowercase
//! `nan`/`inf`.

use norsand_types::Scalar;

/// Fixed-point with `decimals` digits after the point.
pub fn fixed(value: Scalar, decimals: usize) -> String {
    match non_finite(value) {
        Some(s) => s.to_string(),
        None => format!("{value:.decimals$}"),
    }
}

/// Scientific notation with 6 mantissa decimals, e.g. `1.234560e-02`.
pub fn scientific(value: Scalar) -> String {
    if let Some(s) = non_finite(value) {
        return s.to_string();
    }
    // Rust renders `1.234560e-2`; pad the exponent to a signed two digits.
    let raw = format!("{value:.6e}");
    match raw.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exp),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => raw,
    }
}

fn non_finite(value: Scalar) -> Option<&'static str> {
    if value.is_nan() {
        Some("nan")
    } else if value == Scalar::INFINITY {
        Some("inf")
    } else if value == Scalar::NEG_INFINITY {
        Some("-inf")
    } else {
        None
    }
}
