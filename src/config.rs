use std::env;
use std::str::FromStr;

use thiserror::Error;

use crate::domain::money::DEFAULT_CURRENCY;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
    #[error("GATEWAY_SUCCESS_RATE must be between 0.0 and 1.0, got {0}")]
    SuccessRateOutOfRange(f64),
}

/// Runtime settings, read from the process environment (and `.env`).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub gateway_success_rate: f64,
    pub gateway_simulate_failure: bool,
    pub default_currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gateway_success_rate: 1.0,
            gateway_simulate_failure: false,
            default_currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let gateway_success_rate =
            parse_or(&lookup, "GATEWAY_SUCCESS_RATE", defaults.gateway_success_rate)?;
        if !(0.0..=1.0).contains(&gateway_success_rate) {
            return Err(ConfigError::SuccessRateOutOfRange(gateway_success_rate));
        }

        Ok(Self {
            gateway_success_rate,
            gateway_simulate_failure: parse_or(
                &lookup,
                "GATEWAY_SIMULATE_FAILURE",
                defaults.gateway_simulate_failure,
            )?,
            default_currency: lookup("DEFAULT_CURRENCY")
                .filter(|c| !c.trim().is_empty())
                .map(|c| c.trim().to_uppercase())
                .unwrap_or(defaults.default_currency),
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(config_from(&[]).unwrap(), Config::default());
    }

    #[test]
    fn reads_all_keys() {
        let config = config_from(&[
            ("GATEWAY_SUCCESS_RATE", "0.25"),
            ("GATEWAY_SIMULATE_FAILURE", "true"),
            ("DEFAULT_CURRENCY", "eur"),
        ])
        .unwrap();
        assert_eq!(config.gateway_success_rate, 0.25);
        assert!(config.gateway_simulate_failure);
        assert_eq!(config.default_currency, "EUR");
    }

    #[test]
    fn rejects_malformed_bool() {
        assert_eq!(
            config_from(&[("GATEWAY_SIMULATE_FAILURE", "sometimes")]).unwrap_err(),
            ConfigError::Invalid {
                name: "GATEWAY_SIMULATE_FAILURE",
                value: "sometimes".to_string()
            }
        );
    }

    #[test]
    fn rejects_rate_out_of_range() {
        assert_eq!(
            config_from(&[("GATEWAY_SUCCESS_RATE", "1.5")]).unwrap_err(),
            ConfigError::SuccessRateOutOfRange(1.5)
        );
    }
}
