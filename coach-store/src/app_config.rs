use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub business_rules: BusinessRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// Where the ticketing backend lives
#[derive(Debug, Deserialize, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRules {
    #[serde(default = "default_seat_limit")]
    pub max_seats_per_booking: usize,
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for BusinessRules {
    fn default() -> Self {
        Self { max_seats_per_booking: default_seat_limit(), currency: default_currency() }
    }
}

fn default_timeout() -> u64 { 10 }
fn default_seat_limit() -> usize { 4 }
fn default_currency() -> String { "TRY".to_string() }

/// `COACH_<SECTION>__<KEY>`, e.g. `COACH_GATEWAY__BASE_URL`
fn env_source() -> config::Environment {
    config::Environment::with_prefix("COACH").prefix_separator("_").separator("__")
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(env_source())
            .build()?;

        s.try_deserialize()
    }

    /// Build from an inline TOML document. Environment overrides still apply.
    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_rules_fall_back_to_defaults() {
        let config = Config::from_toml(
            r#"
            [server]
            port = 3000

            [gateway]
            base_url = "http://localhost:4000"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.gateway.timeout_seconds, 10);
        assert_eq!(config.business_rules.max_seats_per_booking, 4);
        assert_eq!(config.business_rules.currency, "TRY");
    }

    #[test]
    fn test_explicit_rules_win() {
        let config = Config::from_toml(
            r#"
            [server]
            port = 8080

            [gateway]
            base_url = "http://backend"
            timeout_seconds = 3

            [business_rules]
            max_seats_per_booking = 6
            currency = "EUR"
            "#,
        )
        .unwrap();

        assert_eq!(config.gateway.timeout_seconds, 3);
        assert_eq!(config.business_rules.max_seats_per_booking, 6);
        assert_eq!(config.business_rules.currency, "EUR");
    }

    #[test]
    fn test_env_overrides_use_single_underscore_after_prefix() {
        // Other tests here never assert on base_url, so they are unaffected
        std::env::set_var("COACH_GATEWAY__BASE_URL", "http://from-env:4000");
        let config = Config::from_toml(
            r#"
            [server]
            port = 3000

            [gateway]
            base_url = "http://from-file"
            "#,
        );
        std::env::remove_var("COACH_GATEWAY__BASE_URL");

        assert_eq!(config.unwrap().gateway.base_url, "http://from-env:4000");
    }

    #[test]
    fn test_missing_gateway_is_an_error() {
        assert!(Config::from_toml("[server]\nport = 3000\n").is_err());
    }
}
