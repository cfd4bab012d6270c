//! # Bot registration
//!
//! Drives a user from "create bot" to a stored [`UserBotRecord`]:
//! `Idle -> AwaitingToken -> Idle`. The awaiting state lives in
//! [`PendingRegistrations`]; the record itself is committed to the
//! [`JsonStore`] in one mutation.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::services::pending::PendingRegistrations;
use crate::services::token_validator::{TokenValidator, ValidationError};
use crate::store::models::{RegisterConflict, UserBotRecord};
use crate::store::{JsonStore, StoreError};
use crate::utils::datetime::now_timestamp;
use crate::utils::logging::mask_token;

/// Result of pressing "create bot".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeginOutcome {
    /// The user is now expected to send a token.
    AwaitingToken,
    /// The user already owns a bot; nothing changed.
    AlreadyRegistered(UserBotRecord),
}

/// Result of a free-text message sent while registering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The user is not registering; the message is not for us.
    NotPending,
    /// Text does not look like a token. Still awaiting.
    MalformedToken,
    /// The user owns a bot already. Pending state cleared.
    AlreadyRegistered { bot_username: String },
    /// The Bot API rejected the token. Still awaiting.
    InvalidToken,
    /// The Bot API could not be reached. Still awaiting.
    CheckFailed,
    /// Token is valid but the bot belongs to another user. Still awaiting.
    BotClaimed { bot_username: String },
    /// Stored; pending state cleared.
    Registered(UserBotRecord),
}

#[derive(Clone)]
pub struct RegistrationService {
    store: JsonStore,
    validator: Arc<dyn TokenValidator>,
    pending: PendingRegistrations,
}

impl RegistrationService {
    pub fn new(store: JsonStore, validator: Arc<dyn TokenValidator>, pending: PendingRegistrations) -> Self {
        Self { store, validator, pending }
    }

    pub fn pending(&self) -> &PendingRegistrations {
        &self.pending
    }

    pub fn is_pending(&self, user_id: u64) -> bool {
        self.pending.is_pending(user_id)
    }

    pub async fn begin(&self, user_id: u64) -> BeginOutcome {
        if let Some(record) = self.store.read(|s| s.user_bot(user_id).cloned()).await {
            debug!("User {} asked to create a bot but owns @{}", user_id, record.bot_username);
            return BeginOutcome::AlreadyRegistered(record);
        }

        self.pending.begin(user_id);
        info!("User {} is now awaiting a bot token", user_id);
        BeginOutcome::AwaitingToken
    }

    pub async fn submit(&self, user_id: u64, text: &str) -> Result<SubmitOutcome, StoreError> {
        if !self.pending.is_pending(user_id) {
            return Ok(SubmitOutcome::NotPending);
        }

        let token = text.trim();
        if !looks_like_token(token) {
            return Ok(SubmitOutcome::MalformedToken);
        }

        if let Some(record) = self.store.read(|s| s.user_bot(user_id).cloned()).await {
            self.pending.clear(user_id);
            return Ok(SubmitOutcome::AlreadyRegistered {
                bot_username: record.bot_username,
            });
        }

        let identity = match self.validator.check(token).await {
            Ok(identity) => identity,
            Err(ValidationError::Rejected) => return Ok(SubmitOutcome::InvalidToken),
            Err(ValidationError::Network(reason)) => {
                info!("Token check for user {} ({}) failed: {}", user_id, mask_token(token), reason);
                return Ok(SubmitOutcome::CheckFailed);
            }
        };

        let now = now_timestamp();
        let committed = self
            .store
            .mutate("set_user_bot", |s| {
                s.set_user_bot(user_id, token, &identity.username, now).cloned()
            })
            .await?;

        match committed {
            Ok(record) => {
                let waited = self
                    .pending
                    .since(user_id)
                    .map(|started| (Utc::now() - started).num_seconds())
                    .unwrap_or_default();
                self.pending.clear(user_id);
                info!(
                    "User {} registered @{} (bot id {}) after {}s",
                    user_id, record.bot_username, identity.id, waited
                );
                Ok(SubmitOutcome::Registered(record))
            }
            Err(RegisterConflict::UserHasBot { bot_username }) => {
                self.pending.clear(user_id);
                Ok(SubmitOutcome::AlreadyRegistered { bot_username })
            }
            Err(RegisterConflict::BotClaimed { owner_id }) => {
                info!("User {} submitted @{} which belongs to {}", user_id, identity.username, owner_id);
                Ok(SubmitOutcome::BotClaimed {
                    bot_username: identity.username,
                })
            }
        }
    }
}

/// Bot tokens are `<bot id>:<secret>` drawn from `[0-9A-Za-z_:-]`. Anything
/// else is rejected before calling the Bot API, since the token becomes part
/// of the request path.
pub fn looks_like_token(text: &str) -> bool {
    text.contains(':')
        && text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '-'))
}
