use crate::utils::error::{AppError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> AppError {
    AppError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// The JSON store file must name a file: not empty, no NUL, not a directory.
pub fn validate_store_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(invalid(field_name, path, "The file store needs a data file path"));
    }
    if path.contains('\0') {
        return Err(invalid(field_name, path, "Store path contains a NUL byte"));
    }
    if path.ends_with('/') || path.ends_with('\\') || Path::new(path).is_dir() {
        return Err(invalid(
            field_name,
            path,
            "Store path points at a directory; name the JSON file, e.g. data/users.json",
        ));
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(invalid(field_name, value, format!("Must be {} or more", min_value)));
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| AppError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field_name, value, "Value cannot be empty or whitespace-only"));
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(invalid(
            field_name,
            value,
            format!("Valid values: {}", allowed.join(", ")),
        ));
    }
    Ok(())
}
