//! Input validation for user-supplied fields.

use crate::errors::{AuthError, Result};

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 32;

/// Validate a username.
///
/// Usernames are 3 to 32 ASCII letters, digits or underscores.
pub fn validate_username(username: &str) -> Result<()> {
    if username.len() < USERNAME_MIN_LEN || username.len() > USERNAME_MAX_LEN {
        return Err(AuthError::InvalidUsername(format!(
            "must be {}-{} characters",
            USERNAME_MIN_LEN, USERNAME_MAX_LEN
        )));
    }

    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(AuthError::InvalidUsername(
            "only letters, digits and underscores are allowed".to_string(),
        ));
    }

    Ok(())
}
