use anyhow::{anyhow, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_DATA_FILE: &str = "data.json";
const DEFAULT_MAIN_BOT_USERNAME: &str = "AniCreatorBot";
const DEFAULT_API_URL: &str = "https://api.telegram.org";

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub data_file: PathBuf,
    pub main_bot_username: String,
    pub telegram_api_url: String,
    pub token_check_timeout: Duration,
    pub http_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("BOT_TOKEN")
            .map_err(|_| anyhow!("BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("BOT_TOKEN must be set"));
        }

        let main_bot_username = non_empty_var("MAIN_BOT_USERNAME")
            .map(|name| name.trim_start_matches('@').to_string())
            .unwrap_or_else(|| DEFAULT_MAIN_BOT_USERNAME.to_string());

        let telegram_api_url = non_empty_var("TELEGRAM_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout_str = env::var("TOKEN_CHECK_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string());
        let timeout_secs: u64 = timeout_str.trim()
            .parse()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| anyhow!("Invalid TOKEN_CHECK_TIMEOUT_SECS"))?;

        let port_str = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "3000".to_string());
        let http_port = port_str.trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        Ok(Config {
            bot_token: token,
            data_file: Self::data_file_from_env(),
            main_bot_username,
            telegram_api_url,
            token_check_timeout: Duration::from_secs(timeout_secs),
            http_port,
        })
    }

    /// `DATA_FILE`, falling back to `data.json`. Does not require a bot token.
    pub fn data_file_from_env() -> PathBuf {
        PathBuf::from(non_empty_var("DATA_FILE").unwrap_or_else(|| DEFAULT_DATA_FILE.to_string()))
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
