use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::time::Duration;

use crate::error::Error;

/// Path under the tracking URI where the MLflow REST API is mounted.
const API_PREFIX: &str = "api/2.0/mlflow";

/// Resolved once at startup and passed explicitly into clients and
/// scenarios; never read from ambient process state after that.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the tracking server under test. Required, no default.
    pub tracking_uri: String,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Page-size cap sent with every search request.
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    /// Experiments targeted by the run-search scenario.
    #[serde(default = "default_experiment_ids")]
    pub experiment_ids: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            experiment_ids: default_experiment_ids(),
        }
    }
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_results() -> u32 {
    1000
}

// Experiment 37 held the largest run count (23525) in the reference
// database. Found using:
//   SELECT experiment_id, count(experiment_id) AS count
//   FROM runs GROUP BY experiment_id ORDER BY count DESC;
fn default_experiment_ids() -> Vec<String> {
    vec!["37".to_string()]
}

impl Config {
    /// Load configuration from `config/default.toml` (optional) and
    /// `MLFLOW_`-prefixed environment variables, with `.env` honoured.
    /// The tracking URI comes from `MLFLOW_TRACKING_URI`.
    pub fn load() -> Result<Self, Error> {
        let _ = dotenvy::dotenv();
        let figment = Figment::new()
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("MLFLOW_").split("__"));
        let config: Config = figment
            .extract()
            .map_err(|e| Error::Config(format!("failed to resolve configuration (is MLFLOW_TRACKING_URI set?): {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Build a configuration directly from a tracking URI, with default
    /// HTTP and search settings.
    pub fn new(tracking_uri: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            tracking_uri: tracking_uri.into(),
            http: HttpConfig::default(),
            search: SearchConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !(self.tracking_uri.starts_with("http://")
            || self.tracking_uri.starts_with("https://"))
        {
            return Err(Error::Config(format!(
                "tracking URI must be a valid URL, starting with http(s), got {:?}",
                self.tracking_uri
            )));
        }
        Ok(())
    }

    /// Root of the MLflow REST API on the configured server.
    pub fn api_base(&self) -> String {
        format!("{}/{}", self.tracking_uri.trim_end_matches('/'), API_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_http_uri() {
        for uri in ["ftp://example.com", "example.com:5000", "", "httpx://x"] {
            let err = Config::new(uri).unwrap_err();
            assert!(err.is_fatal(), "{uri} should be a fatal config error");
            assert!(err.to_string().contains("http(s)"), "{uri}: {err}");
        }
    }

    #[test]
    fn accepts_http_and_https() {
        assert!(Config::new("http://localhost:5000").is_ok());
        assert!(Config::new("https://tracking.example.com").is_ok());
    }

    #[test]
    fn api_base_joins_prefix() {
        let config = Config::new("https://example.com").unwrap();
        assert_eq!(config.api_base(), "https://example.com/api/2.0/mlflow");
    }

    #[test]
    fn api_base_tolerates_trailing_slash() {
        let config = Config::new("https://example.com/").unwrap();
        assert_eq!(config.api_base(), "https://example.com/api/2.0/mlflow");
    }

    #[test]
    fn defaults_match_reference_scenario() {
        let config = Config::new("http://localhost:5000").unwrap();
        assert_eq!(config.search.max_results, 1000);
        assert_eq!(config.search.experiment_ids, vec!["37".to_string()]);
        assert_eq!(config.http.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn loads_from_environment() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("MLFLOW_TRACKING_URI", "http://localhost:5000");
            jail.set_env("MLFLOW_SEARCH__MAX_RESULTS", "50");
            let config = Config::load().expect("config should load");
            assert_eq!(config.tracking_uri, "http://localhost:5000");
            assert_eq!(config.search.max_results, 50);
            assert_eq!(config.search.experiment_ids, vec!["37".to_string()]);
            Ok(())
        });
    }

    #[test]
    fn missing_tracking_uri_is_fatal() {
        let figment = Figment::new().merge(Env::prefixed("MLFLOW_LOADGEN_UNSET_"));
        let err = figment
            .extract::<Config>()
            .map_err(|e| Error::Config(e.to_string()))
            .unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn malformed_tracking_uri_is_fatal() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("MLFLOW_TRACKING_URI", "localhost:5000");
            let err = Config::load().unwrap_err();
            assert!(err.is_fatal());
            Ok(())
        });
    }
}
