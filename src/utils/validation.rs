use crate::utils::error::{Result, ThicknessError};
use std::collections::HashSet;
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ThicknessError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ThicknessError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extensions(
    field_name: &str,
    files: &[String],
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    for file in files {
        if let Some(extension) = Path::new(file).extension().and_then(|ext| ext.to_str()) {
            if !allowed_set.contains(extension) {
                return Err(ThicknessError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                });
            }
        } else {
            return Err(ThicknessError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: file.clone(),
                reason: "File has no extension or invalid filename".to_string(),
            });
        }
    }

    Ok(())
}

pub fn validate_files_exist(field_name: &str, files: &[String]) -> Result<()> {
    for file in files {
        if !Path::new(file).is_file() {
            return Err(ThicknessError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: file.clone(),
                reason: "File does not exist".to_string(),
            });
        }
    }
    Ok(())
}

/// Horizon files come in top/bottom pairs, so there must be at least one pair
/// and never a dangling top.
pub fn validate_horizon_pairs(field_name: &str, files: &[String]) -> Result<()> {
    if files.len() < 2 {
        return Err(ThicknessError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: files.len().to_string(),
            reason: "Need at least two horizon files (one top and one bottom)".to_string(),
        });
    }

    if files.len() % 2 != 0 {
        return Err(ThicknessError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: files.len().to_string(),
            reason: "Need an even number of horizon files".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| ThicknessError::MissingConfigError {
            field: field_name.to_string(),
        })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ThicknessError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}
