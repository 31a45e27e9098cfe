//! Local field checks run before a form is dispatched.

use crate::error::ValidationError;
use serde_json::{Map, Value};

pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "is required"));
    }
    Ok(())
}

pub fn in_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < min || value > max {
        return Err(ValidationError::new(
            field,
            format!("must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

pub fn non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::new(field, "must be >= 0"));
    }
    Ok(())
}

pub fn positive(field: &'static str, value: u32) -> Result<(), ValidationError> {
    if value == 0 {
        return Err(ValidationError::new(field, "must be > 0"));
    }
    Ok(())
}

/// Parse a free-form JSON configuration box. Blank input is an empty map;
/// anything that is not a JSON object is rejected.
pub fn parse_json_object(field: &'static str, text: &str) -> Result<Map<String, Value>, ValidationError> {
    if text.trim().is_empty() {
        return Ok(Map::new());
    }
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ValidationError::new(field, "must be a JSON object")),
        Err(err) => Err(ValidationError::new(field, format!("invalid JSON: {}", err))),
    }
}

pub fn parse_number<T: std::str::FromStr>(field: &'static str, text: &str) -> Result<T, ValidationError> {
    text.trim()
        .parse::<T>()
        .map_err(|_| ValidationError::new(field, "must be a number"))
}

/// Like [`parse_number`] but blank input means "not provided".
pub fn parse_optional_number<T: std::str::FromStr>(
    field: &'static str,
    text: &str,
) -> Result<Option<T>, ValidationError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    parse_number(field, text).map(Some)
}
