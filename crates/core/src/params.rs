//! Pure helpers for reading typed parameters out of a `serde_json::Value` object.
//!
//! Each helper takes a JSON value, a key name, and a default. A missing key
//! or a value of the wrong type yields the default, so a control panel can
//! send partial updates. [`clamp_param`] then pulls a value into its
//! declared range.

use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// Accepts both JSON numbers (including integers) and converts them to f64.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `bool` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// Pulls `value` into `[min, max]`, logging a warning when it had to move.
///
/// Non-finite values fall back to `default`.
pub fn clamp_param(name: &str, value: f64, min: f64, max: f64, default: f64) -> f64 {
    if !value.is_finite() {
        log::warn!("parameter {name} is not finite ({value}); using default {default}");
        return default;
    }
    let clamped = value.clamp(min, max);
    if clamped != value {
        log::warn!("parameter {name}={value} outside [{min}, {max}]; clamped to {clamped}");
    }
    clamped
}
