use serde::Deserialize;
use solo_score::{ACCURACY_THRESHOLD, accuracy::DEFAULT_MATCH_THRESHOLD};

/// Prefix of every environment variable read by [`ApiConfig`].
pub const ENV_PREFIX: &str = "SOLO_";

/// Deployment environment
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Service configuration, read from `SOLO_*` environment variables.
///
/// | Variable | Default |
/// |---|---|
/// | `SOLO_ENV` | `development` |
/// | `SOLO_HOST` | `0.0.0.0` |
/// | `SOLO_PORT` | `3000` |
/// | `SOLO_ALLOWED_ORIGINS` | `http://localhost:8080` (comma-separated) |
/// | `SOLO_PASS_THRESHOLD` | `75` |
/// | `SOLO_MATCH_THRESHOLD` | `60` |
/// | `SOLO_RATE_LIMIT_PER_SECOND` | `10` |
/// | `SOLO_RATE_LIMIT_BURST` | `20` |
#[derive(Clone, Debug, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub env: Environment,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_pass_threshold")]
    pub pass_threshold: u8,
    #[serde(default = "default_match_threshold")]
    pub match_threshold: u8,
    /// Requests replenished per second for each client IP
    #[serde(default = "default_rate_limit_per_second")]
    pub rate_limit_per_second: u64,
    #[serde(default = "default_rate_limit_burst")]
    pub rate_limit_burst: u32,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(std::env::vars())
    }

    /// Build the configuration from an explicit list of variables.
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Self = envy::prefixed(ENV_PREFIX).from_iter(vars)?;

        anyhow::ensure!(
            config.pass_threshold <= 100,
            "SOLO_PASS_THRESHOLD must be between 0 and 100, got {}",
            config.pass_threshold
        );
        anyhow::ensure!(
            config.match_threshold <= 100,
            "SOLO_MATCH_THRESHOLD must be between 0 and 100, got {}",
            config.match_threshold
        );

        anyhow::ensure!(
            config.rate_limit_per_second > 0 && config.rate_limit_burst > 0,
            "rate limit settings must be positive"
        );

        Ok(config)
    }

    /// Socket address the server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:8080".to_string()]
}

const fn default_pass_threshold() -> u8 {
    ACCURACY_THRESHOLD
}

const fn default_match_threshold() -> u8 {
    DEFAULT_MATCH_THRESHOLD
}

const fn default_rate_limit_per_second() -> u64 {
    10
}

const fn default_rate_limit_burst() -> u32 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_vars(vars(&[("PATH", "/usr/bin")])).unwrap();
        assert_eq!(config.env, Environment::Development);
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.allowed_origins, vec!["http://localhost:8080"]);
        assert_eq!(config.pass_threshold, 75);
        assert_eq!(config.match_threshold, 60);
        assert_eq!(config.rate_limit_per_second, 10);
        assert_eq!(config.rate_limit_burst, 20);
    }

    #[test]
    fn test_overrides() {
        let config = ApiConfig::from_vars(vars(&[
            ("SOLO_ENV", "production"),
            ("SOLO_PORT", "8081"),
            ("SOLO_ALLOWED_ORIGINS", "https://a.example,https://b.example"),
            ("SOLO_PASS_THRESHOLD", "80"),
        ]))
        .unwrap();
        assert!(config.env.is_production());
        assert_eq!(config.port, 8081);
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(config.pass_threshold, 80);
    }

    #[test]
    fn test_invalid_values() {
        assert!(ApiConfig::from_vars(vars(&[("SOLO_PASS_THRESHOLD", "101")])).is_err());
        assert!(ApiConfig::from_vars(vars(&[("SOLO_PORT", "not-a-port")])).is_err());
        assert!(ApiConfig::from_vars(vars(&[("SOLO_ENV", "staging")])).is_err());
        assert!(ApiConfig::from_vars(vars(&[("SOLO_RATE_LIMIT_BURST", "0")])).is_err());
    }
}
