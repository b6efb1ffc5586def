//! API-key verification for the moderation surface.
//!
//! The expected key is injected from configuration at startup; nothing here
//! reads the environment or stores user credentials.

/// Authentication failures, mapped to HTTP statuses at the REST boundary.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No admin key was configured; the moderation surface is disabled.
    #[error("admin API key is not configured")]
    NotConfigured,
    /// The caller's key was missing or did not match.
    #[error("invalid API key")]
    InvalidKey,
}

/// Validates the caller-provided API key against the configured key.
///
/// Returns `Ok(())` only when a key is configured and the caller supplied a
/// matching one.
pub fn validate_api_key(provided: Option<&str>, expected: Option<&str>) -> Result<(), AuthError> {
    let expected = expected.ok_or(AuthError::NotConfigured)?;

    match provided {
        Some(key) if key == expected => Ok(()),
        _ => Err(AuthError::InvalidKey),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_matching_key() {
        assert!(validate_api_key(Some("secret"), Some("secret")).is_ok());
    }

    #[test]
    fn rejects_missing_or_wrong_key() {
        assert!(matches!(
            validate_api_key(None, Some("secret")),
            Err(AuthError::InvalidKey)
        ));
        assert!(matches!(
            validate_api_key(Some("nope"), Some("secret")),
            Err(AuthError::InvalidKey)
        ));
    }

    #[test]
    fn rejects_when_unconfigured() {
        assert!(matches!(
            validate_api_key(Some("anything"), None),
            Err(AuthError::NotConfigured)
        ));
    }
}
