//! Input validation utilities for Vantage API
//!
//! Requests are validated before dispatch so malformed input fails fast
//! without a round trip.

use validator::ValidationError;

/// Maximum length for an order identifier
pub const MAX_ORDER_ID_LENGTH: usize = 64;

/// Maximum length for a free-text keyword filter
pub const MAX_KEYWORD_LENGTH: usize = 128;

/// Maximum length for a permission identifier
pub const MAX_PERMISSION_LENGTH: usize = 128;

/// Maximum number of identifiers in one export request
pub const MAX_EXPORT_IDS: usize = 5000;

/// Validate an order identifier
///
/// Order IDs must:
/// - Not be empty
/// - Not exceed MAX_ORDER_ID_LENGTH characters
/// - Not contain whitespace, path separators, or percent escapes
/// - Not be a dot segment (`.` or `..`)
pub fn validate_order_id(id: &str) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::new("order_id_empty"));
    }
    if id.len() > MAX_ORDER_ID_LENGTH {
        return Err(ValidationError::new("order_id_too_long"));
    }
    if id
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '/' | '\\' | '?' | '#' | '%'))
    {
        return Err(ValidationError::new("order_id_invalid_chars"));
    }
    if id == "." || id == ".." {
        return Err(ValidationError::new("order_id_dot_segment"));
    }
    Ok(())
}

/// Validate paging bounds (both 1-based)
pub fn validate_page(page: u32, page_size: u32) -> Result<(), ValidationError> {
    if page == 0 {
        return Err(ValidationError::new("page_out_of_range"));
    }
    if page_size == 0 {
        return Err(ValidationError::new("page_size_out_of_range"));
    }
    Ok(())
}

/// Validate a keyword filter
pub fn validate_keyword(keyword: &str) -> Result<(), ValidationError> {
    if keyword.chars().count() > MAX_KEYWORD_LENGTH {
        return Err(ValidationError::new("keyword_too_long"));
    }
    Ok(())
}

/// Validate a permission identifier such as `order:view`
pub fn validate_permission(permission: &str) -> Result<(), ValidationError> {
    if permission.is_empty() {
        return Err(ValidationError::new("permission_empty"));
    }
    if permission.len() > MAX_PERMISSION_LENGTH {
        return Err(ValidationError::new("permission_too_long"));
    }
    if permission.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ValidationError::new("permission_invalid_chars"));
    }
    Ok(())
}
