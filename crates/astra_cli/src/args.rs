use clap::{Args, Parser, Subcommand};
use std::time::Duration;
use astra_core::config::{
    DEFAULT_ASTROLOGY_BASE_URL, DEFAULT_LLM_BASE_URL, DEFAULT_LLM_MODEL, DEFAULT_NEWS_BASE_URL,
};
use astra_core::{Config, Result, ServiceConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "News digests, chat completions and Kundli readings over HTTP", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigArgs,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// API key for the chat-completion service
    #[arg(long, env = "ASTRA_LLM_API_KEY", hide_env_values = true, global = true)]
    pub llm_api_key: Option<String>,
    #[arg(long, env = "ASTRA_LLM_BASE_URL", default_value = DEFAULT_LLM_BASE_URL, global = true)]
    pub llm_base_url: String,
    /// Model id sent upstream; "dummy" answers offline
    #[arg(long, env = "ASTRA_LLM_MODEL", default_value = DEFAULT_LLM_MODEL, global = true)]
    pub llm_model: String,
    /// API key for newsapi.org
    #[arg(long, env = "ASTRA_NEWS_API_KEY", hide_env_values = true, global = true)]
    pub news_api_key: Option<String>,
    #[arg(long, env = "ASTRA_NEWS_BASE_URL", default_value = DEFAULT_NEWS_BASE_URL, global = true)]
    pub news_base_url: String,
    /// API key for astrologyapi.com, sent as the Basic credential
    #[arg(long, env = "ASTRA_ASTROLOGY_API_KEY", hide_env_values = true, global = true)]
    pub astrology_api_key: Option<String>,
    #[arg(long, env = "ASTRA_ASTROLOGY_BASE_URL", default_value = DEFAULT_ASTROLOGY_BASE_URL, global = true)]
    pub astrology_base_url: String,
    /// Per-request timeout for every upstream call
    #[arg(long, env = "ASTRA_TIMEOUT_SECS", default_value_t = 30, global = true)]
    pub timeout_secs: u64,
}

impl ConfigArgs {
    pub fn into_config(self) -> Result<Config> {
        let config = Config {
            llm: ServiceConfig::new(&self.llm_base_url)?.with_api_key(self.llm_api_key),
            llm_model: self.llm_model,
            news: ServiceConfig::new(&self.news_base_url)?.with_api_key(self.news_api_key),
            astrology: ServiceConfig::new(&self.astrology_base_url)?
                .with_api_key(self.astrology_api_key),
        };
        Ok(config.with_timeout(Duration::from_secs(self.timeout_secs)))
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the HTTP API
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, default_value_t = 5000)]
        port: u16,
    },
    /// Send one prompt to the chat model
    Ask {
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// List articles for a query (defaults to "latest")
    News { query: Vec<String> },
    /// Summarize articles for a query (defaults to "latest")
    Summary { query: Vec<String> },
    /// Birth-chart reading from free text, e.g. "12 Jan 2000, 10:30 AM, Mumbai"
    Kundli { text: Vec<String> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["astra", "news"]).unwrap();
        let config = cli.config.into_config().unwrap();
        assert_eq!(config.news.base_url, DEFAULT_NEWS_BASE_URL);
        assert_eq!(config.llm.timeout, Duration::from_secs(30));
        assert!(matches!(cli.command, Commands::News { ref query } if query.is_empty()));
    }

    #[test]
    fn test_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "astra", "serve", "--port", "8080", "--llm-model", "dummy", "--timeout-secs", "5",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Serve { port: 8080, .. }));
        let config = cli.config.into_config().unwrap();
        assert_eq!(config.llm_model, "dummy");
        assert_eq!(config.astrology.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_ask_requires_query() {
        assert!(Cli::try_parse_from(["astra", "ask"]).is_err());
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let cli = Cli::try_parse_from(["astra", "news", "--news-base-url", "newsapi"]).unwrap();
        assert!(cli.config.into_config().is_err());
    }
}
