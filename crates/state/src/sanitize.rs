/// Returns `value` if finite, otherwise 0.
pub fn safe_number(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Rounds `value` to `decimals` places. Non-finite input yields 0.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let value = safe_number(value);
    let factor = 10_f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    safe_number(rounded)
}
