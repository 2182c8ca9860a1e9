//! Application configuration loaded from environment variables.

use event_dispatcher::{DeliveryPolicy, InvalidDeliveryPolicy};

/// Shop configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `DATABASE_URL`: PostgreSQL connection string; in-memory storage when unset
/// - `DELIVERY_POLICY`: `"fail-fast"` or `"isolate"` (default: `"fail-fast"`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_level: String,
    pub database_url: Option<String>,
    pub delivery_policy: DeliveryPolicy,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, InvalidDeliveryPolicy> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from any key lookup.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, InvalidDeliveryPolicy> {
        let defaults = Self::default();

        let delivery_policy = match lookup("DELIVERY_POLICY") {
            Some(value) if !value.trim().is_empty() => value.parse()?,
            _ => defaults.delivery_policy,
        };

        Ok(Self {
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            delivery_policy,
        })
    }

    /// Returns true if the PostgreSQL repositories should be used.
    pub fn uses_database(&self) -> bool {
        self.database_url.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            database_url: None,
            delivery_policy: DeliveryPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.database_url, None);
        assert_eq!(config.delivery_policy, DeliveryPolicy::FailFast);
        assert!(!config.uses_database());
    }

    #[test]
    fn test_empty_environment_gives_defaults() {
        assert_eq!(Config::from_lookup(lookup(&[])).unwrap(), Config::default());
    }

    #[test]
    fn test_reads_every_variable() {
        let config = Config::from_lookup(lookup(&[
            ("RUST_LOG", "debug"),
            ("DATABASE_URL", "postgres://localhost/shop"),
            ("DELIVERY_POLICY", "isolate"),
        ]))
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/shop")
        );
        assert_eq!(config.delivery_policy, DeliveryPolicy::Isolate);
        assert!(config.uses_database());
    }

    #[test]
    fn test_blank_database_url_means_in_memory() {
        let config = Config::from_lookup(lookup(&[("DATABASE_URL", "  ")])).unwrap();
        assert!(!config.uses_database());
    }

    #[test]
    fn test_unknown_delivery_policy_is_rejected() {
        let err = Config::from_lookup(lookup(&[("DELIVERY_POLICY", "sometimes")])).unwrap_err();
        assert!(err.to_string().contains("sometimes"));
    }
}
