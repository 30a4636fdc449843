//! Trip service configuration.

use splitledger_common::parse_amount;
use splitledger_ledger::NettingPolicy;

/// Main service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Netting policy handed to the ledger engine.
    pub netting: NettingPolicy,
    /// Refuse to net trips holding more events than this.
    pub max_events_per_trip: usize,
    /// Log level.
    pub log_level: String,
    /// Emit logs as JSON lines.
    pub log_json: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            netting: NettingPolicy::default(),
            max_events_per_trip: 10_000,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup. Unparsable values
    /// keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(epsilon) = lookup("SPLITLEDGER_EPSILON") {
            if let Ok(epsilon) = parse_amount(&epsilon) {
                config.netting.epsilon = epsilon;
            }
        }

        if let Some(places) = lookup("SPLITLEDGER_DECIMAL_PLACES") {
            if let Ok(places) = places.trim().parse() {
                config.netting.decimal_places = places;
            }
        }

        if let Some(max) = lookup("SPLITLEDGER_MAX_EVENTS") {
            if let Ok(max) = max.trim().parse() {
                config.max_events_per_trip = max;
            }
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            config.log_level = level;
        }

        if let Some(json) = lookup("SPLITLEDGER_LOG_JSON") {
            config.log_json = matches!(json.trim(), "1" | "true" | "yes");
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.netting.validate()?;

        if self.max_events_per_trip == 0 {
            return Err("Max events per trip cannot be 0".to_string());
        }

        if self.log_level.is_empty() {
            return Err("Log level cannot be empty".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        let mut config = ServiceConfig::default();
        config.max_events_per_trip = 0;
        assert!(config.validate().is_err());

        let mut config = ServiceConfig::default();
        config.netting.epsilon = dec!(-1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_lookup() {
        let vars = HashMap::from([
            ("SPLITLEDGER_EPSILON", "0.0049"),
            ("SPLITLEDGER_DECIMAL_PLACES", "3"),
            ("SPLITLEDGER_MAX_EVENTS", "oops"),
            ("SPLITLEDGER_LOG_JSON", "true"),
        ]);
        let config = ServiceConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.netting.epsilon, dec!(0.0049));
        assert_eq!(config.netting.decimal_places, 3);
        assert_eq!(config.max_events_per_trip, 10_000);
        assert!(config.log_json);
        assert_eq!(config.log_level, "info");
    }
}
