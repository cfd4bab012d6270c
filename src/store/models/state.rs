use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::user_bot::{BotIndexEntry, CreatedBot, UserBotRecord};

/// The whole persisted document.
///
/// `users` is authoritative; `bots` mirrors it keyed by bot username and can
/// always be rebuilt with [`PlatformState::reindex`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformState {
    #[serde(default)]
    pub owners: Vec<u64>,
    #[serde(default)]
    pub users: BTreeMap<u64, UserBotRecord>,
    #[serde(default)]
    pub bots: BTreeMap<String, BotIndexEntry>,
    #[serde(default)]
    pub stats: Stats,
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub created_bots: Vec<CreatedBot>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Reserved for mandatory channel subscriptions.
    #[serde(default)]
    pub force_sub: Vec<serde_json::Value>,
}

/// Why a registration could not be committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterConflict {
    /// The user already owns a bot.
    UserHasBot { bot_username: String },
    /// The bot is registered to somebody else.
    BotClaimed { owner_id: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSummary {
    pub created_total: usize,
    pub users_total: usize,
    pub bots_total: usize,
    pub owners_total: usize,
}

impl PlatformState {
    /// Makes `user_id` the owner if nobody has claimed the platform yet.
    pub fn claim_owner(&mut self, user_id: u64) -> bool {
        if !self.owners.is_empty() {
            return false;
        }
        self.owners.push(user_id);
        true
    }

    pub fn is_owner(&self, user_id: u64) -> bool {
        self.owners.contains(&user_id)
    }

    pub fn user_bot(&self, user_id: u64) -> Option<&UserBotRecord> {
        self.users.get(&user_id)
    }

    /// Records a new bot for `user_id`, mirrors it into the `bots` index and
    /// appends it to the creation log. Nothing changes on conflict.
    pub fn set_user_bot(
        &mut self,
        user_id: u64,
        token: &str,
        username: &str,
        now: i64,
    ) -> Result<&UserBotRecord, RegisterConflict> {
        if let Some(existing) = self.users.get(&user_id) {
            return Err(RegisterConflict::UserHasBot {
                bot_username: existing.bot_username.clone(),
            });
        }
        if let Some(entry) = self.bots.get(username) {
            return Err(RegisterConflict::BotClaimed { owner_id: entry.owner_id });
        }

        let record = UserBotRecord {
            bot_token: token.to_string(),
            bot_username: username.to_string(),
            created_at: now,
        };
        self.bots.insert(username.to_string(), record.index_entry(user_id));
        self.stats.created_bots.push(CreatedBot {
            owner_id: user_id,
            bot_username: username.to_string(),
            created_at: now,
            bot_token: token.to_string(),
        });

        Ok(&*self.users.entry(user_id).or_insert(record))
    }

    /// Removes the user's bot from `users` and `bots`. The creation log is
    /// left untouched.
    pub fn delete_user_bot(&mut self, user_id: u64) -> Option<UserBotRecord> {
        let record = self.users.remove(&user_id)?;
        self.bots.remove(&record.bot_username);
        Some(record)
    }

    /// The last `n` entries of the creation log, oldest first.
    pub fn recent_created(&self, n: usize) -> &[CreatedBot] {
        let log = &self.stats.created_bots;
        &log[log.len().saturating_sub(n)..]
    }

    pub fn stats_summary(&self) -> StatsSummary {
        StatsSummary {
            created_total: self.stats.created_bots.len(),
            users_total: self.users.len(),
            bots_total: self.bots.len(),
            owners_total: self.owners.len(),
        }
    }

    /// Describes every way `bots` has drifted from `users`. Empty when the
    /// index is consistent.
    pub fn check_consistency(&self) -> Vec<String> {
        let mut problems = Vec::new();

        for (user_id, record) in &self.users {
            match self.bots.get(&record.bot_username) {
                None => problems.push(format!(
                    "user {user_id} owns @{} but the bot is not indexed",
                    record.bot_username
                )),
                Some(entry) if entry.owner_id != *user_id => problems.push(format!(
                    "@{} is indexed for {} but owned by {user_id}",
                    record.bot_username, entry.owner_id
                )),
                Some(entry) if entry.bot_token != record.bot_token => problems.push(format!(
                    "@{} has a stale token in the index",
                    record.bot_username
                )),
                Some(_) => {}
            }
        }

        for (username, entry) in &self.bots {
            let mirrored = self
                .users
                .get(&entry.owner_id)
                .is_some_and(|record| &record.bot_username == username);
            if !mirrored {
                problems.push(format!("@{username} is indexed without an owning user"));
            }
        }

        problems
    }

    /// Rebuilds the `bots` index from `users`.
    pub fn reindex(&mut self) {
        self.bots = self
            .users
            .iter()
            .map(|(user_id, record)| (record.bot_username.clone(), record.index_entry(*user_id)))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_owner_wins() {
        let mut state = PlatformState::default();
        assert!(state.claim_owner(1));
        assert!(!state.claim_owner(2));
        assert_eq!(state.owners, vec![1]);
        assert!(state.is_owner(1));
        assert!(!state.is_owner(2));
    }

    #[test]
    fn test_set_user_bot_mirrors_index_and_log() {
        let mut state = PlatformState::default();
        state.set_user_bot(7, "111:AAA", "fooBot", 100).unwrap();

        assert_eq!(state.user_bot(7).unwrap().bot_username, "fooBot");
        assert_eq!(state.bots["fooBot"].owner_id, 7);
        assert_eq!(state.stats.created_bots.len(), 1);
        assert!(state.check_consistency().is_empty());
    }

    #[test]
    fn test_second_bot_for_same_user_is_rejected() {
        let mut state = PlatformState::default();
        state.set_user_bot(7, "111:AAA", "fooBot", 100).unwrap();

        let err = state.set_user_bot(7, "222:BBB", "barBot", 200).unwrap_err();
        assert_eq!(err, RegisterConflict::UserHasBot { bot_username: "fooBot".to_string() });
        assert_eq!(state.users.len(), 1);
        assert!(!state.bots.contains_key("barBot"));
        assert_eq!(state.stats.created_bots.len(), 1);
    }

    #[test]
    fn test_bot_claimed_by_someone_else() {
        let mut state = PlatformState::default();
        state.set_user_bot(7, "111:AAA", "fooBot", 100).unwrap();

        let err = state.set_user_bot(8, "111:AAA", "fooBot", 200).unwrap_err();
        assert_eq!(err, RegisterConflict::BotClaimed { owner_id: 7 });
        assert!(state.user_bot(8).is_none());
    }

    #[test]
    fn test_delete_keeps_creation_log() {
        let mut state = PlatformState::default();
        state.set_user_bot(7, "111:AAA", "fooBot", 100).unwrap();

        let removed = state.delete_user_bot(7).unwrap();
        assert_eq!(removed.bot_username, "fooBot");
        assert!(state.users.is_empty());
        assert!(state.bots.is_empty());
        assert_eq!(state.stats.created_bots.len(), 1);

        assert!(state.delete_user_bot(7).is_none());
    }

    #[test]
    fn test_recent_created_takes_tail() {
        let mut state = PlatformState::default();
        for i in 0..12u64 {
            state.set_user_bot(i, &format!("{i}:T"), &format!("bot{i}"), i as i64).unwrap();
        }

        let recent = state.recent_created(10);
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].bot_username, "bot2");
        assert_eq!(recent[9].bot_username, "bot11");
        assert!(PlatformState::default().recent_created(10).is_empty());
    }

    #[test]
    fn test_reindex_repairs_drift() {
        let mut state = PlatformState::default();
        state.set_user_bot(7, "111:AAA", "fooBot", 100).unwrap();
        state.bots.clear();
        state.bots.insert(
            "ghostBot".to_string(),
            BotIndexEntry { owner_id: 9, bot_token: "9:X".to_string(), created_at: 1 },
        );

        assert_eq!(state.check_consistency().len(), 2);
        state.reindex();
        assert!(state.check_consistency().is_empty());
        assert_eq!(state.bots.len(), 1);
    }

    #[test]
    fn test_document_shape() {
        let mut state = PlatformState::default();
        state.claim_owner(42);
        state.set_user_bot(42, "111:AAA", "fooBot", 100).unwrap();

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["owners"], serde_json::json!([42]));
        assert_eq!(json["users"]["42"]["bot_username"], "fooBot");
        assert_eq!(json["bots"]["fooBot"]["owner_id"], 42);
        assert_eq!(json["stats"]["created_bots"][0]["bot_token"], "111:AAA");
        assert_eq!(json["settings"]["force_sub"], serde_json::json!([]));
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let state: PlatformState = serde_json::from_str(r#"{"owners": [5]}"#).unwrap();
        assert_eq!(state.owners, vec![5]);
        assert!(state.users.is_empty());
        assert!(state.stats.created_bots.is_empty());
    }
}
