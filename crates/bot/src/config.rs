/// Bot configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Bot API token from BotFather.
    pub token: String,
    /// Bot API base URL (default: `https://api.telegram.org`).
    pub api_url: String,
    /// Long-poll timeout in seconds (default: `30`).
    pub poll_timeout_secs: u64,
}

/// Errors raised while reading bot configuration.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;

impl BotConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var             | Default                    |
    /// |---------------------|----------------------------|
    /// | `TELEGRAM_TOKEN`    | required                   |
    /// | `TELEGRAM_API_URL`  | `https://api.telegram.org` |
    /// | `POLL_TIMEOUT_SECS` | `30`                       |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup("TELEGRAM_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::Missing("TELEGRAM_TOKEN"))?;

        let api_url = lookup("TELEGRAM_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let poll_timeout_secs = match lookup("POLL_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
                name: "POLL_TIMEOUT_SECS",
                reason: e.to_string(),
            })?,
            None => DEFAULT_POLL_TIMEOUT_SECS,
        };

        Ok(Self {
            token,
            api_url,
            poll_timeout_secs,
        })
    }
}
