//! Formatting helpers for presenting counts and geometry.

/// Counts as the source documents carry them: whole numbers without a
/// fractional part, anything else with at most two decimals.
pub fn format_count(value: f64) -> String {
    if !value.is_finite() {
        return "—".into();
    }
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        trim_decimals(format!("{value:.2}"))
    }
}

/// SVG coordinate with at most two decimals (`40`, `12.5`, `7.33`).
pub fn format_coord(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    // Avoid "-0" in path data.
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    trim_decimals(format!("{rounded:.2}"))
}

fn trim_decimals(mut text: String) -> String {
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    text
}
