use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::utils::logging::{log_timeout, mask_token};

/// Public identity of a bot, as reported by `getMe`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotIdentity {
    pub id: u64,
    pub username: String,
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("token rejected by the Bot API")]
    Rejected,
    #[error("token check failed: {0}")]
    Network(String),
}

/// Confirms that a bot token is alive and resolves the bot's username.
#[async_trait]
pub trait TokenValidator: Send + Sync {
    async fn check(&self, token: &str) -> Result<BotIdentity, ValidationError>;
}

#[derive(Debug, Deserialize)]
struct GetMeResponse {
    ok: bool,
    result: Option<GetMeUser>,
}

#[derive(Debug, Deserialize)]
struct GetMeUser {
    #[serde(default)]
    id: u64,
    username: Option<String>,
}

/// Calls `{api_url}/bot{token}/getMe` over HTTP.
#[derive(Debug, Clone)]
pub struct TelegramTokenValidator {
    client: reqwest::Client,
    api_url: String,
    timeout: Duration,
}

impl TelegramTokenValidator {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, ValidationError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ValidationError::Network(e.to_string()))?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            timeout,
        })
    }
}

#[async_trait]
impl TokenValidator for TelegramTokenValidator {
    async fn check(&self, token: &str) -> Result<BotIdentity, ValidationError> {
        let url = format!("{}/bot{}/getMe", self.api_url, token);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                log_timeout("getMe", self.timeout.as_secs(), Some(mask_token(token).as_str()));
            }
            // reqwest errors embed the URL, which carries the token
            ValidationError::Network(e.without_url().to_string())
        })?;

        // Telegram answers bad tokens with 401 and an `ok: false` body, so the
        // body decides, not the status code. A body that is not a Bot API
        // reply at all (proxy error pages) means the check did not complete.
        let status = response.status();
        let body: GetMeResponse = response.json().await.map_err(|e| {
            ValidationError::Network(format!("unreadable getMe reply ({status}): {}", e.without_url()))
        })?;

        if !body.ok {
            return Err(ValidationError::Rejected);
        }

        match body.result {
            Some(GetMeUser { id, username: Some(username) }) if !username.is_empty() => {
                Ok(BotIdentity { id, username })
            }
            _ => Err(ValidationError::Rejected),
        }
    }
}
