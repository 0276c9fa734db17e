//! Service configuration read from the environment.
//!
//! ```bash
//! API_KEY=...                # generative text service credential
//! SENDGRID_API_KEY=SG....    # email delivery credential
//! SENDER_EMAIL=donations@hope.org
//!
//! # Optional endpoint overrides
//! GEMINI_API_BASE=https://generativelanguage.googleapis.com
//! SENDGRID_API_BASE=https://api.sendgrid.com
//! ```

use crate::error::{DonationError, Result};
use std::env;

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_SENDGRID_API_BASE: &str = "https://api.sendgrid.com";

#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    pub ai_api_key: Option<String>,
    pub sendgrid_api_key: Option<String>,
    pub sender_email: Option<String>,
    pub gemini_api_base: String,
    pub sendgrid_api_base: String,
}

/// The credentials the confirmation service cannot run without.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub ai_api_key: String,
    pub sendgrid_api_key: String,
    pub sender_email: String,
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Blank values count as absent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            ai_api_key: read("API_KEY"),
            sendgrid_api_key: read("SENDGRID_API_KEY"),
            sender_email: read("SENDER_EMAIL"),
            gemini_api_base: read("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
            sendgrid_api_base: read("SENDGRID_API_BASE")
                .unwrap_or_else(|| DEFAULT_SENDGRID_API_BASE.to_string()),
        }
    }

    pub fn credentials(&self) -> Result<Credentials> {
        let mut missing = Vec::new();
        if self.ai_api_key.is_none() {
            missing.push("API_KEY");
        }
        if self.sendgrid_api_key.is_none() {
            missing.push("SENDGRID_API_KEY");
        }
        if self.sender_email.is_none() {
            missing.push("SENDER_EMAIL");
        }

        match (&self.ai_api_key, &self.sendgrid_api_key, &self.sender_email) {
            (Some(ai), Some(sendgrid), Some(sender)) => Ok(Credentials {
                ai_api_key: ai.clone(),
                sendgrid_api_key: sendgrid.clone(),
                sender_email: sender.clone(),
            }),
            _ => Err(DonationError::ConfigurationError(format!(
                "missing {}",
                missing.join(", ")
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServiceConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServiceConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_complete_configuration() {
        let config = config_from(&[
            ("API_KEY", "ai"),
            ("SENDGRID_API_KEY", "sg"),
            ("SENDER_EMAIL", "donations@hope.org"),
        ]);
        let credentials = config.credentials().unwrap();
        assert_eq!(credentials.sender_email, "donations@hope.org");
        assert_eq!(config.gemini_api_base, DEFAULT_GEMINI_API_BASE);
        assert_eq!(config.sendgrid_api_base, DEFAULT_SENDGRID_API_BASE);
    }

    #[test]
    fn test_missing_sender_is_configuration_fault() {
        let config = config_from(&[("API_KEY", "ai"), ("SENDGRID_API_KEY", "sg")]);
        let err = config.credentials().unwrap_err();
        assert!(matches!(err, DonationError::ConfigurationError(_)));
        assert!(err.to_string().contains("SENDER_EMAIL"));
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        let config = config_from(&[
            ("API_KEY", "   "),
            ("SENDGRID_API_KEY", "sg"),
            ("SENDER_EMAIL", "donations@hope.org"),
            ("GEMINI_API_BASE", "http://127.0.0.1:9000"),
        ]);
        assert!(config.ai_api_key.is_none());
        assert_eq!(config.gemini_api_base, "http://127.0.0.1:9000");
        assert!(config.credentials().is_err());
    }
}
