use crate::utils::error::{HotelError, Result};
use std::str::FromStr;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Coerces form text into a number. Surrounding whitespace is ignored.
pub fn parse_number<T>(field_name: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| HotelError::invalid_input(field_name, raw, e.to_string()))
}

pub fn require_text(field_name: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(HotelError::MissingField {
            field: field_name.to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// Zero counts as "not filled in" for numeric form fields.
pub fn require_non_zero<T: PartialEq + Default>(field_name: &str, value: T) -> Result<T> {
    if value == T::default() {
        return Err(HotelError::MissingField {
            field: field_name.to_string(),
        });
    }
    Ok(value)
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(HotelError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_positive<T>(field_name: &str, value: T) -> Result<()>
where
    T: PartialOrd + Default + std::fmt::Display,
{
    if value <= T::default() {
        return Err(HotelError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be greater than zero".to_string(),
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(HotelError::InvalidInput {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(HotelError::InvalidInput {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}
