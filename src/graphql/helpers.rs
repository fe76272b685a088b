use async_graphql::ID;

use crate::errors::{AppError, AppResult};

/// Ids are opaque strings; only blank ones are rejected.
pub fn parse_id(id: &ID) -> AppResult<String> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError("id cannot be empty".to_string()));
    }
    Ok(trimmed.to_string())
}
