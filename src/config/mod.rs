#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AdapterError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_resolved, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::env;

pub const BASE_URL_ENV: &str = "APPER_BASE_URL";
pub const PROJECT_ID_ENV: &str = "APPER_PROJECT_ID";
pub const PUBLIC_KEY_ENV: &str = "APPER_PUBLIC_KEY";

/// Connection settings for the record service.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    pub project_id: String,
    pub public_key: String,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("project_id", &self.project_id)
            .field("public_key", &"***")
            .finish()
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            base_url: required_env(BASE_URL_ENV)?,
            project_id: required_env(PROJECT_ID_ENV)?,
            public_key: required_env(PUBLIC_KEY_ENV)?,
        })
    }
}

fn required_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| AdapterError::MissingConfig {
        field: name.to_string(),
    })
}

impl ConfigProvider for ClientConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn project_id(&self) -> &str {
        &self.project_id
    }

    fn public_key(&self) -> &str {
        &self.public_key
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        for value in [&self.base_url, &self.project_id, &self.public_key] {
            validate_resolved(value)?;
        }
        validate_url("base_url", &self.base_url)?;
        validate_non_empty_string("project_id", &self.project_id)?;
        validate_non_empty_string("public_key", &self.public_key)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_blank_key() {
        let config = ClientConfig {
            base_url: "https://records.example.com".to_string(),
            project_id: "proj-1".to_string(),
            public_key: " ".to_string(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unresolved_placeholder() {
        let config = ClientConfig {
            base_url: "https://records.example.com".to_string(),
            project_id: "proj-1".to_string(),
            public_key: "${APPER_PUBLIC_KEY}".to_string(),
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, AdapterError::MissingConfig { ref field } if field == "APPER_PUBLIC_KEY"));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_debug_hides_public_key() {
        let config = ClientConfig {
            base_url: "https://records.example.com".to_string(),
            project_id: "proj-1".to_string(),
            public_key: "pk_live_secret".to_string(),
        };
        let printed = format!("{:?}", config);
        assert!(printed.contains("proj-1"));
        assert!(!printed.contains("pk_live_secret"));
    }

    #[test]
    fn test_from_env() {
        std::env::set_var(BASE_URL_ENV, "http://localhost:9000");
        std::env::set_var(PROJECT_ID_ENV, "proj-env");
        std::env::set_var(PUBLIC_KEY_ENV, "pk_env");

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.base_url(), "http://localhost:9000");
        assert_eq!(config.project_id(), "proj-env");
        assert_eq!(config.public_key(), "pk_env");

        std::env::remove_var(PUBLIC_KEY_ENV);
        let err = ClientConfig::from_env().unwrap_err();
        assert!(matches!(err, AdapterError::MissingConfig { ref field } if field == PUBLIC_KEY_ENV));

        std::env::remove_var(BASE_URL_ENV);
        std::env::remove_var(PROJECT_ID_ENV);
    }
}
