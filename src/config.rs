use anyhow::{bail, Context, Result};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Process configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bot token used to authenticate outbound sends.
    pub bot_token: String,
    /// Webhook listen address.
    pub bind_addr: String,
}

impl Config {
    /// Reads `BOT_TOKEN` (required) and `BIND_ADDR` (optional).
    pub fn from_env() -> Result<Self> {
        Self::from_vars(
            std::env::var("BOT_TOKEN").ok(),
            std::env::var("BIND_ADDR").ok(),
        )
    }

    /// Pure assembly step, extracted so it can be unit-tested.
    fn from_vars(bot_token: Option<String>, bind_addr: Option<String>) -> Result<Self> {
        let bot_token = bot_token.context("BOT_TOKEN environment variable is not set")?;
        if bot_token.trim().is_empty() {
            bail!("BOT_TOKEN environment variable is empty");
        }
        let bind_addr = bind_addr.unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        Ok(Self {
            bot_token,
            bind_addr,
        })
    }
}
