/// Connection settings for the remote backend.
///
/// The base URL is deployment configuration, not code: it is read from the
/// environment with a local-development fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the backend, without a trailing slash
    /// (e.g., "https://api.mtaahustle.app").
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// Fallback base URL used when `MTAA_API_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Read settings from `MTAA_API_URL` and `MTAA_API_TIMEOUT_SECS`.
    /// Missing or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let base_url = std::env::var("MTAA_API_URL")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = std::env::var("MTAA_API_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            base_url,
            timeout_secs,
        }
    }
}
