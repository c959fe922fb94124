//! Container and item name validation.
//!
//! Container names follow blob-service conventions:
//! - 3 to 63 characters
//! - Lowercase ASCII letters, digits, and hyphens only
//! - Must start and end with a letter or digit
//! - Must not contain consecutive hyphens (`--`)
//!
//! Item names are looser, but every backend maps them onto paths, so:
//! - 1 to 1024 characters
//! - Must not start or end with `/`
//! - Must not contain `\`, NUL, or empty path segments (`//`)
//! - Segments must not be `.` or `..`

use crate::error::{StoreError, StoreResult};

/// Maximum length of a container name.
pub const MAX_CONTAINER_NAME_LEN: usize = 63;

/// Minimum length of a container name.
pub const MIN_CONTAINER_NAME_LEN: usize = 3;

/// Maximum length of an item name.
pub const MAX_ITEM_NAME_LEN: usize = 1024;

fn invalid(name: &str, reason: impl Into<String>) -> StoreError {
    StoreError::InvalidName {
        name: name.to_string(),
        reason: reason.into(),
    }
}

/// Validate a container name, returning `Ok(())` if valid.
///
/// # Examples
///
/// ```
/// use blobdoc_store::names::validate_container_name;
///
/// assert!(validate_container_name("invoices").is_ok());
/// assert!(validate_container_name("team-42").is_ok());
/// assert!(validate_container_name("ab").is_err());
/// assert!(validate_container_name("Invoices").is_err());
/// assert!(validate_container_name("bad--name").is_err());
/// ```
pub fn validate_container_name(name: &str) -> StoreResult<()> {
    let len = name.len();
    if !(MIN_CONTAINER_NAME_LEN..=MAX_CONTAINER_NAME_LEN).contains(&len) {
        let (min, max) = (MIN_CONTAINER_NAME_LEN, MAX_CONTAINER_NAME_LEN);
        return Err(invalid(
            name,
            format!("container name must be {min}-{max} characters, got {len}"),
        ));
    }

    if let Some(ch) = name
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
    {
        return Err(invalid(name, format!("contains forbidden character: {ch:?}")));
    }

    if name.starts_with('-') || name.ends_with('-') {
        return Err(invalid(name, "must start and end with a letter or digit"));
    }

    if name.contains("--") {
        return Err(invalid(name, "must not contain consecutive hyphens"));
    }

    Ok(())
}

/// Validate an item name, returning `Ok(())` if valid.
///
/// # Examples
///
/// ```
/// use blobdoc_store::names::validate_item_name;
///
/// assert!(validate_item_name("3f2a.json").is_ok());
/// assert!(validate_item_name("reports/2024/q1.json").is_ok());
/// assert!(validate_item_name("").is_err());
/// assert!(validate_item_name("../escape.json").is_err());
/// ```
pub fn validate_item_name(name: &str) -> StoreResult<()> {
    if name.is_empty() {
        return Err(invalid(name, "item name must not be empty"));
    }

    if name.len() > MAX_ITEM_NAME_LEN {
        return Err(invalid(
            name,
            format!("item name exceeds {MAX_ITEM_NAME_LEN} characters"),
        ));
    }

    if name.contains('\\') || name.contains('\0') {
        return Err(invalid(name, "must not contain '\\' or NUL"));
    }

    if name.starts_with('/') || name.ends_with('/') {
        return Err(invalid(name, "must not start or end with '/'"));
    }

    for segment in name.split('/') {
        match segment {
            "" => return Err(invalid(name, "path segments must not be empty")),
            "." | ".." => {
                return Err(invalid(name, format!("segment {segment:?} is not allowed")))
            }
            _ => {}
        }
    }

    Ok(())
}
