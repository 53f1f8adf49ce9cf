use std::fmt;
use std::time::Duration;
use url::Url;
use crate::{Error, Result};

pub const DEFAULT_LLM_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_LLM_MODEL: &str = "llama-3.3-70b-specdec";
pub const DEFAULT_NEWS_BASE_URL: &str = "https://newsapi.org/v2";
pub const DEFAULT_ASTROLOGY_BASE_URL: &str = "https://json.astrologyapi.com/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for one upstream API.
#[derive(Clone)]
pub struct ServiceConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl ServiceConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("invalid base URL '{}': {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "base URL '{}' must use http or https",
                base_url
            )));
        }
        Ok(Self {
            api_key: None,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.trim().is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Join `path` onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn require_api_key(&self, service: &str) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| Error::Config(format!("{} API key is required", service)))
    }

    pub fn http_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))
    }
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Process-wide settings, built once at startup and handed to each client.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm: ServiceConfig,
    pub llm_model: String,
    pub news: ServiceConfig,
    pub astrology: ServiceConfig,
}

impl Config {
    /// Apply one timeout to every upstream.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.llm.timeout = timeout;
        self.news.timeout = timeout;
        self.astrology.timeout = timeout;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        let service = |url: &str| ServiceConfig {
            api_key: None,
            base_url: url.to_string(),
            timeout: DEFAULT_TIMEOUT,
        };
        Self {
            llm: service(DEFAULT_LLM_BASE_URL),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            news: service(DEFAULT_NEWS_BASE_URL),
            astrology: service(DEFAULT_ASTROLOGY_BASE_URL),
        }
    }
}
