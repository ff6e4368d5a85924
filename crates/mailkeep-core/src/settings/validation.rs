//! Source configuration validation.

use super::model::SourceConfig;

/// Validation error for mail source configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Server hostname is empty.
    EmptyHost,
    /// Server port is invalid.
    InvalidPort,
    /// Username is empty.
    EmptyUsername,
    /// Password is empty.
    EmptyPassword,
}

impl ValidationError {
    /// Get human-readable error message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::EmptyHost => "Mail server is required",
            Self::InvalidPort => "Mail server port must be 1-65535",
            Self::EmptyUsername => "Mail server username is required",
            Self::EmptyPassword => "Mail server password is required",
        }
    }

    /// Get the field name this error relates to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyHost => "host",
            Self::InvalidPort => "port",
            Self::EmptyUsername => "username",
            Self::EmptyPassword => "password",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Result of validating a source configuration.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// Validate a mail source configuration.
///
/// Returns `Ok(())` if valid, or `Err(Vec<ValidationError>)` with all errors.
///
/// # Errors
///
/// Returns a vector of `ValidationError` if any fields are invalid.
pub fn validate_source_config(config: &SourceConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }

    if config.port == 0 {
        errors.push(ValidationError::InvalidPort);
    }

    if config.username.trim().is_empty() {
        errors.push(ValidationError::EmptyUsername);
    }

    if config.password.is_empty() {
        errors.push(ValidationError::EmptyPassword);
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::settings::Security;

    fn valid_config() -> SourceConfig {
        SourceConfig {
            host: "pop.example.com".to_string(),
            port: 995,
            security: Security::Tls,
            username: "inbox@example.com".to_string(),
            password: "secret".to_string(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_source_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_all_errors_are_collected() {
        let config = SourceConfig::default();
        let errors = validate_source_config(&config).unwrap_err();

        assert!(errors.contains(&ValidationError::EmptyHost));
        assert!(errors.contains(&ValidationError::InvalidPort));
        assert!(errors.contains(&ValidationError::EmptyUsername));
        assert!(errors.contains(&ValidationError::EmptyPassword));
    }

    #[test]
    fn test_blank_host_is_rejected() {
        let mut config = valid_config();
        config.host = "   ".to_string();

        let errors = validate_source_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::EmptyHost]);
    }
}
