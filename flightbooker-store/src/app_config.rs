use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub booking: BookingConfig,
    pub retrieval: RetrievalConfig,
    pub results: ResultsConfig,
    pub pricing: PricingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingConfig {
    /// Simulated latency of the booking API.
    pub submit_delay_ms: u64,
    /// Flight offered when the wizard is opened without a `flightId`.
    #[serde(default = "default_flight_id")]
    pub default_flight_id: String,
    /// Idle time after which an open booking session is dropped.
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
    /// How long an unread confirmation handoff is kept.
    #[serde(default = "default_handoff_ttl_secs")]
    pub handoff_ttl_secs: u64,
}

impl BookingConfig {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn handoff_ttl(&self) -> Duration {
        Duration::from_secs(self.handoff_ttl_secs)
    }
}

fn default_flight_id() -> String {
    "FR001".to_string()
}

fn default_session_ttl_secs() -> u64 {
    1800
}

fn default_handoff_ttl_secs() -> u64 {
    300
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    pub delay_ms: u64,
}

impl RetrievalConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResultsConfig {
    pub page_size: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PricingSettings {
    pub extra_baggage: u32,
    pub travel_insurance: u32,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Optional per-environment overrides
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `FLIGHTBOOKER__BOOKING__SUBMIT_DELAY_MS=0`
            .add_source(config::Environment::with_prefix("FLIGHTBOOKER").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Built-in values matching `config/default.toml`, with no waiting.
    pub fn instant() -> Self {
        Self {
            server: ServerConfig { port: 3000 },
            booking: BookingConfig {
                submit_delay_ms: 0,
                default_flight_id: default_flight_id(),
                session_ttl_secs: default_session_ttl_secs(),
                handoff_ttl_secs: default_handoff_ttl_secs(),
            },
            retrieval: RetrievalConfig { delay_ms: 0 },
            results: ResultsConfig { page_size: 5 },
            pricing: PricingSettings {
                extra_baggage: 50,
                travel_insurance: 25,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_overrides_nested_keys() {
        let s = config::Config::builder()
            .set_default("server.port", 3000)
            .unwrap()
            .set_default("booking.submit_delay_ms", 1500)
            .unwrap()
            .set_default("retrieval.delay_ms", 1000)
            .unwrap()
            .set_default("results.page_size", 5)
            .unwrap()
            .set_default("pricing.extra_baggage", 50)
            .unwrap()
            .set_default("pricing.travel_insurance", 25)
            .unwrap()
            .set_override("booking.submit_delay_ms", 0)
            .unwrap()
            .build()
            .unwrap();

        let config: Config = s.try_deserialize().unwrap();
        assert_eq!(config.booking.submit_delay(), Duration::ZERO);
        assert_eq!(config.booking.default_flight_id, "FR001");
        assert_eq!(config.booking.session_ttl(), Duration::from_secs(1800));
        assert_eq!(config.booking.handoff_ttl(), Duration::from_secs(300));
        assert_eq!(config.retrieval.delay(), Duration::from_millis(1000));
        assert_eq!(config.pricing.extra_baggage, 50);
    }
}
