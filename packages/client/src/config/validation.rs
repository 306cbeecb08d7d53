//! Configuration validation

use std::time::Duration;

use super::types::ClientConfig;

/// Configuration validation result type
pub type ConfigResult<T> = Result<T, ConfigurationError>;

/// Configuration error types
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Invalid timeout value: {0}")]
    InvalidTimeout(String),

    #[error("Invalid configuration parameter: {0}")]
    InvalidParameter(String),
}

/// Configuration validation trait
pub trait Validator {
    /// Validates the configuration settings
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` naming the first invalid setting.
    fn validate(&self) -> ConfigResult<()>;
}

/// Common configuration validation utilities
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate timeout duration
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidTimeout` if the timeout is zero
    /// or exceeds 1 hour.
    pub fn validate_timeout(timeout: Duration, name: &str) -> ConfigResult<()> {
        if timeout.is_zero() {
            return Err(ConfigurationError::InvalidTimeout(format!(
                "{name} cannot be zero"
            )));
        }

        if timeout.as_secs() > 3600 {
            return Err(ConfigurationError::InvalidTimeout(format!(
                "{name} cannot exceed 1 hour"
            )));
        }

        Ok(())
    }
}

/// Upper bound on configured redirect hops.
pub const MAX_REDIRECT_BUDGET: u32 = 100;

impl Validator for ClientConfig {
    fn validate(&self) -> ConfigResult<()> {
        if let Some(timeout) = self.read_timeout() {
            ConfigValidator::validate_timeout(timeout, "read timeout")?;
        }

        if self.max_redirects > MAX_REDIRECT_BUDGET {
            return Err(ConfigurationError::InvalidParameter(format!(
                "max redirects must not exceed {MAX_REDIRECT_BUDGET}"
            )));
        }

        if let Some(user_agent) = &self.user_agent {
            if user_agent.is_empty() {
                return Err(ConfigurationError::InvalidParameter(
                    "user agent cannot be empty".to_string(),
                ));
            }
            if http::HeaderValue::from_str(user_agent).is_err() {
                return Err(ConfigurationError::InvalidParameter(
                    "user agent is not a valid header value".to_string(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_validate() {
        assert_eq!(ClientConfig::default().validate(), Ok(()));
        assert_eq!(ClientConfig::no_redirects().validate(), Ok(()));
        assert_eq!(ClientConfig::browser_like().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_values() {
        let zero_timeout = ClientConfig {
            read_timeout_ms: Some(0),
            ..ClientConfig::default()
        };
        assert!(matches!(
            zero_timeout.validate(),
            Err(ConfigurationError::InvalidTimeout(_))
        ));

        let huge_budget = ClientConfig {
            max_redirects: 1_000,
            ..ClientConfig::default()
        };
        assert!(huge_budget.validate().is_err());

        let bad_agent = ClientConfig {
            user_agent: Some("line\nbreak".to_string()),
            ..ClientConfig::default()
        };
        assert!(bad_agent.validate().is_err());
    }

    #[test]
    fn loads_from_json_with_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"follow_redirects": true, "version": "HTTP/1.0"}"#).unwrap();

        assert!(config.follow_redirects);
        assert_eq!(config.max_redirects, super::super::DEFAULT_MAX_REDIRECTS);
        assert_eq!(http::Version::from(config.version), http::Version::HTTP_10);
        assert!(config.strip_sensitive_headers_on_redirect);
    }
}
