//! # Menu and panel dispatch
//!
//! Decides what a user sees for `/start`, `/admin` and every inline button,
//! based on their role and whether they own a bot.

use crate::bot::callbacks::{CallbackAction, ManageAction};
use crate::bot::menu::{self, Screen};
use crate::services::registration::{BeginOutcome, RegistrationService};
use crate::store::models::UserBotRecord;
use crate::store::{JsonStore, StoreError};

/// What the transport should do with a button press.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelReply {
    /// Replace the pressed message with this screen.
    Show(Screen),
    /// Short notice on the button itself; the message stays.
    Toast(String),
    /// Owner-only surface reached by someone else.
    Denied,
}

#[derive(Clone)]
pub struct PanelService {
    store: JsonStore,
    registration: RegistrationService,
    main_bot_username: String,
}

impl PanelService {
    pub fn new(store: JsonStore, registration: RegistrationService, main_bot_username: impl Into<String>) -> Self {
        Self {
            store,
            registration,
            main_bot_username: main_bot_username.into(),
        }
    }

    pub fn registration(&self) -> &RegistrationService {
        &self.registration
    }

    /// `/start`: the first caller ever becomes the owner.
    pub async fn start(&self, user_id: u64) -> Result<Screen, StoreError> {
        let claimed = self.store.mutate("claim_owner", |s| s.claim_owner(user_id)).await?;
        if claimed {
            tracing::info!("User {} claimed platform ownership", user_id);
        }

        let (is_owner, has_bot) = self
            .store
            .read(|s| (s.is_owner(user_id), s.user_bot(user_id).is_some()))
            .await;
        Ok(menu::start_screen(is_owner, has_bot, &self.main_bot_username))
    }

    /// `/admin`
    pub async fn admin(&self, user_id: u64) -> PanelReply {
        if self.store.read(|s| s.is_owner(user_id)).await {
            PanelReply::Show(menu::admin_panel())
        } else {
            PanelReply::Denied
        }
    }

    pub async fn handle(&self, user_id: u64, action: &CallbackAction) -> Result<PanelReply, StoreError> {
        let reply = match action {
            CallbackAction::About => PanelReply::Show(menu::about_screen(&self.main_bot_username)),
            CallbackAction::CreateBot => match self.registration.begin(user_id).await {
                BeginOutcome::AwaitingToken => {
                    PanelReply::Show(menu::create_prompt(&self.main_bot_username))
                }
                BeginOutcome::AlreadyRegistered(record) => PanelReply::Show(menu::limit_reached(&record)),
            },
            CallbackAction::MyBot => self.with_record(user_id, menu::manage_menu).await,
            CallbackAction::Manage(ManageAction::Delete) => {
                let removed = self
                    .store
                    .mutate("delete_user_bot", |s| s.delete_user_bot(user_id))
                    .await?;
                if let Some(record) = &removed {
                    tracing::info!("User {} deleted @{}", user_id, record.bot_username);
                }
                PanelReply::Show(menu::bot_deleted(removed.as_ref()))
            }
            CallbackAction::Manage(ManageAction::Status) => {
                self.with_record(user_id, menu::bot_status).await
            }
            CallbackAction::Manage(ManageAction::Broadcast) => {
                self.with_record(user_id, menu::bot_broadcast).await
            }
            CallbackAction::Admin(section) => {
                let screen = self
                    .store
                    .read(|s| s.is_owner(user_id).then(|| menu::admin_section(section, s)))
                    .await;
                match screen {
                    Some(screen) => PanelReply::Show(screen),
                    None => PanelReply::Denied,
                }
            }
        };
        Ok(reply)
    }

    /// Renders a screen about the user's bot, or tells them they have none.
    async fn with_record(&self, user_id: u64, render: fn(&UserBotRecord) -> Screen) -> PanelReply {
        match self.store.read(|s| s.user_bot(user_id).cloned()).await {
            Some(record) => PanelReply::Show(render(&record)),
            None => PanelReply::Toast(menu::NO_BOT_YET.to_string()),
        }
    }
}
