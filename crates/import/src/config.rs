//! Import service configuration.

use std::env;
use std::time::Duration;

/// Default extraction endpoint, served next to the editor.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/api/parse-slides";
/// Environment variable overriding the endpoint.
pub const ENV_IMPORT_URL: &str = "PYRAMID_IMPORT_URL";

/// Where and how to reach the extraction service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    /// Full URL of the extraction endpoint.
    pub endpoint: String,
    /// Request timeout. `None` waits as long as the service takes.
    pub timeout: Option<Duration>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
        }
    }
}

impl ImportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, with the endpoint taken from `PYRAMID_IMPORT_URL` when set.
    pub fn from_env() -> Self {
        match env::var(ENV_IMPORT_URL) {
            Ok(url) if !url.trim().is_empty() => Self::default().with_endpoint(url),
            _ => Self::default(),
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ImportConfig::new();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_from_env_reads_endpoint() {
        env::set_var(ENV_IMPORT_URL, "http://env.test/parse");
        assert_eq!(ImportConfig::from_env().endpoint, "http://env.test/parse");

        env::set_var(ENV_IMPORT_URL, "  ");
        assert_eq!(ImportConfig::from_env().endpoint, DEFAULT_ENDPOINT);

        env::remove_var(ENV_IMPORT_URL);
        assert_eq!(ImportConfig::from_env(), ImportConfig::default());
    }

    #[test]
    fn test_builders() {
        let config = ImportConfig::new()
            .with_endpoint("http://example.test/parse")
            .with_timeout(Duration::from_secs(30));
        assert_eq!(config.endpoint, "http://example.test/parse");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }
}
