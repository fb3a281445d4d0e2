use crate::error::ApiError;

/// Exact comparison of the secret sent by the bot with the configured one.
pub fn secret_matches(supplied: &str, configured: &str) -> bool {
    supplied == configured
}

/// Guard run before any mutating operation touches the store.
pub fn authorize(supplied: &str, configured: &str) -> Result<(), ApiError> {
    if secret_matches(supplied, configured) {
        Ok(())
    } else {
        Err(ApiError::Unauthorized)
    }
}
