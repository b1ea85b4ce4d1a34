use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("database error: {0}")]
    Db(String),
}

impl From<sea_orm::DbErr> for ModelError {
    fn from(e: sea_orm::DbErr) -> Self { Self::Db(e.to_string()) }
}

/// Required text field: non-blank and at most `max` characters.
pub fn require_text(field: &str, value: &str, max: usize) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} required")));
    }
    if value.chars().count() > max {
        return Err(ModelError::Validation(format!("{field} must be at most {max} characters")));
    }
    Ok(())
}

/// Optional link field: blank is treated as absent, otherwise must be an http(s) URL.
pub fn optional_url(field: &str, value: Option<&str>) -> Result<Option<String>, ModelError> {
    let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) else { return Ok(None) };
    if !(v.starts_with("http://") || v.starts_with("https://")) {
        return Err(ModelError::Validation(format!("{field} must start with http(s)")));
    }
    if v.chars().count() > 200 {
        return Err(ModelError::Validation(format!("{field} must be at most 200 characters")));
    }
    Ok(Some(v.to_string()))
}
