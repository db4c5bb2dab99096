use crate::utils::error::{CatalogueError, Result};
use std::collections::HashSet;
use std::net::IpAddr;
use std::path::PathBuf;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_ip_address(field_name: &str, value: &str) -> Result<IpAddr> {
    value
        .parse::<IpAddr>()
        .map_err(|e| CatalogueError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Invalid IP address: {}", e),
        })
}

/// Accepts a plain path or a `file://` URL and returns the filesystem path.
pub fn validate_file_location(field_name: &str, location: &str) -> Result<PathBuf> {
    if location.is_empty() {
        return Err(CatalogueError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: location.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if location.contains('\0') {
        return Err(CatalogueError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: location.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    if location.contains("${") {
        return Err(CatalogueError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: location.to_string(),
            reason: "Unresolved environment variable placeholder".to_string(),
        });
    }

    if !location.contains("://") {
        return Ok(PathBuf::from(location));
    }

    let url = Url::parse(location).map_err(|e| CatalogueError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: location.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })?;

    if url.scheme() != "file" {
        return Err(CatalogueError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: location.to_string(),
            reason: format!("Unsupported URL scheme: {}", url.scheme()),
        });
    }

    url.to_file_path()
        .map_err(|_| CatalogueError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: location.to_string(),
            reason: "URL does not name a local file".to_string(),
        })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CatalogueError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Every name non-blank and listed once.
pub fn validate_unique_names(field_name: &str, names: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        validate_non_empty_string(field_name, name)?;
        if !seen.insert(name.as_str()) {
            return Err(CatalogueError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: name.clone(),
                reason: "Duplicate name".to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(CatalogueError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
