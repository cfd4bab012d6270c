use serde::{Deserialize, Serialize};

/// The single bot a user has registered on the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBotRecord {
    pub bot_token: String,
    pub bot_username: String,
    pub created_at: i64, // epoch seconds
}

/// Entry of the `bots` index, keyed by bot username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotIndexEntry {
    pub owner_id: u64,
    pub bot_token: String,
    pub created_at: i64,
}

/// One line of the append-only creation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedBot {
    pub owner_id: u64,
    pub bot_username: String,
    pub created_at: i64,
    #[serde(default)]
    pub bot_token: String,
}

impl UserBotRecord {
    pub fn index_entry(&self, owner_id: u64) -> BotIndexEntry {
        BotIndexEntry {
            owner_id,
            bot_token: self.bot_token.clone(),
            created_at: self.created_at,
        }
    }
}
