use serde::Deserialize;
use std::time::Duration;

/// Default DCA license search endpoint.
pub const DEFAULT_SEARCH_URL: &str = "https://search.dca.ca.gov/results";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub verifier: VerifierConfig,
}

/// Settings for the outbound registry client.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifierConfig {
    pub search_url: String,
    /// Bound on DNS resolution plus connection setup.
    pub connect_timeout: Duration,
    /// Bound on the whole request/response exchange.
    pub read_timeout: Duration,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            database_url: std::env::var("DB_URL")
                .or_else(|_| std::env::var("DATABASE_URL"))
                .map_err(|_| {
                    anyhow::anyhow!("DB_URL or DATABASE_URL environment variable required")
                })
                .and_then(|url| {
                    if url.trim().is_empty() {
                        anyhow::bail!("DB_URL cannot be empty");
                    }
                    if !url.starts_with("postgresql://") && !url.starts_with("postgres://") {
                        anyhow::bail!("DB_URL must start with postgresql:// or postgres://");
                    }
                    Ok(url)
                })?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            verifier: VerifierConfig {
                search_url: parse_search_url(
                    std::env::var("DCA_SEARCH_URL")
                        .ok()
                        .filter(|s| !s.trim().is_empty())
                        .as_deref(),
                )?,
                connect_timeout: parse_timeout_secs(
                    "DCA_CONNECT_TIMEOUT_SECS",
                    std::env::var("DCA_CONNECT_TIMEOUT_SECS").ok().as_deref(),
                    10,
                )?,
                read_timeout: parse_timeout_secs(
                    "DCA_READ_TIMEOUT_SECS",
                    std::env::var("DCA_READ_TIMEOUT_SECS").ok().as_deref(),
                    30,
                )?,
            },
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Database: {}", database_log_target(&config.database_url));
        tracing::debug!("DCA search URL: {}", config.verifier.search_url);
        tracing::debug!(
            "DCA timeouts: connect {:?}, read {:?}",
            config.verifier.connect_timeout,
            config.verifier.read_timeout
        );
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}

/// Scheme and host of the database URL, leaving credentials and path out of logs.
fn database_log_target(database_url: &str) -> String {
    match url::Url::parse(database_url) {
        Ok(url) => format!("{}://{}", url.scheme(), url.host_str().unwrap_or("localhost")),
        Err(_) => "<unparseable url>".to_string(),
    }
}

fn parse_search_url(raw: Option<&str>) -> anyhow::Result<String> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_SEARCH_URL.to_string());
    };
    let url = url::Url::parse(raw.trim())
        .map_err(|e| anyhow::anyhow!("DCA_SEARCH_URL is not a valid URL: {}", e))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        anyhow::bail!("DCA_SEARCH_URL must start with http:// or https://");
    }
    Ok(url.to_string())
}

fn parse_timeout_secs(name: &str, raw: Option<&str>, default: u64) -> anyhow::Result<Duration> {
    let secs = match raw {
        None => default,
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map_err(|_| anyhow::anyhow!("{} must be a whole number of seconds", name))?,
    };
    if secs == 0 {
        anyhow::bail!("{} must be greater than zero", name);
    }
    Ok(Duration::from_secs(secs))
}
