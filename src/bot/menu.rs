//! # Menus and replies
//!
//! Every text and keyboard the bot shows. Nothing here touches the network
//! or the store; callers pass in whatever state the screen depends on.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use teloxide::utils::html;

use crate::bot::callbacks::{AdminSection, CallbackAction, ManageAction};
use crate::services::registration::SubmitOutcome;
use crate::store::models::{PlatformState, UserBotRecord};
use crate::utils::datetime::format_timestamp;

/// How many creation-log entries the admin bot list shows.
pub const RECENT_BOTS_LIMIT: usize = 10;

pub const NO_BOT_YET: &str = "You don't have a bot yet.";
pub const OWNER_ONLY: &str = "This section is for the owner only.";
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again later.";

/// A message body plus its optional inline keyboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub text: String,
    pub keyboard: Option<InlineKeyboardMarkup>,
}

impl Screen {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into(), keyboard: None }
    }

    pub fn with_keyboard(text: impl Into<String>, keyboard: InlineKeyboardMarkup) -> Self {
        Self { text: text.into(), keyboard: Some(keyboard) }
    }
}

fn button(label: &str, action: CallbackAction) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(label, action.data())
}

pub fn main_menu_keyboard(has_bot: bool) -> InlineKeyboardMarkup {
    let entry = if has_bot {
        button("🤖 My bot", CallbackAction::MyBot)
    } else {
        button("🆕 Create bot", CallbackAction::CreateBot)
    };

    InlineKeyboardMarkup::new(vec![
        vec![button("ℹ️ About", CallbackAction::About)],
        vec![entry],
    ])
}

pub fn manage_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            button("🟢 Bot status", CallbackAction::Manage(ManageAction::Status)),
            button("🗑 Delete", CallbackAction::Manage(ManageAction::Delete)),
        ],
        vec![button("📤 Send message", CallbackAction::Manage(ManageAction::Broadcast))],
    ])
}

pub fn admin_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![button("1️⃣ Add message", CallbackAction::Admin(AdminSection::AddMedia))],
        vec![
            button("2️⃣ Send message", CallbackAction::Admin(AdminSection::Send)),
            button("3️⃣ Created bots", CallbackAction::Admin(AdminSection::Bots)),
        ],
        vec![
            button("4️⃣ Statistics", CallbackAction::Admin(AdminSection::Stats)),
            button("5️⃣ System settings", CallbackAction::Admin(AdminSection::Settings)),
        ],
    ])
}

pub fn start_screen(is_owner: bool, has_bot: bool, main_bot: &str) -> Screen {
    let text = if is_owner {
        format!(
            "Hello, owner!\n\n\
            You own the {} platform.\n\
            Use /admin to manage it.",
            html::bold(&format!("@{main_bot}"))
        )
    } else {
        format!(
            "This bot creates {} for channels.\n\n\
            You can open a downloader bot of your own too.",
            html::bold("personal downloader bots")
        )
    };
    Screen::with_keyboard(text, main_menu_keyboard(has_bot))
}

pub fn about_screen(main_bot: &str) -> Screen {
    Screen::text(format!(
        "{} is a platform for creating anime and media downloader bots.\n\n\
        Open your own downloader bot here and share media with your channels and users.",
        html::bold(&format!("@{main_bot}"))
    ))
}

pub fn create_prompt(main_bot: &str) -> Screen {
    Screen::text(format!(
        "Hello!\n\n\
        Go to @BotFather and create your bot with the {} command.\n\n\
        Once you have the bot token, send it here.\n\n\
        For example:\n\
        {}\n\n\
        Limits:\n\
        1. Every user can create only {}.\n\
        2. The creator notice cannot be removed: \
        ⚠️ This bot was created with @{} ❗",
        html::bold("/newbot"),
        html::code_inline("123456789:ABCDEF-ghijklmnop"),
        html::bold("1 bot"),
        main_bot
    ))
}

pub fn limit_reached(record: &UserBotRecord) -> Screen {
    Screen::with_keyboard(
        format!(
            "Your limit is full: {}.\n\
            Bot: @{}\n\n\
            To open a new one, delete the old bot first.",
            html::bold("1/1"),
            record.bot_username
        ),
        manage_keyboard(),
    )
}

pub fn manage_menu(record: &UserBotRecord) -> Screen {
    Screen::with_keyboard(
        format!(
            "Your bot: @{}\n\n\
            Use the buttons below to manage it.",
            record.bot_username
        ),
        manage_keyboard(),
    )
}

pub fn bot_status(record: &UserBotRecord) -> Screen {
    Screen::text(format!(
        "Your bot: @{}\n\
        Status: 🟢 Active (preview)\n\n\
        Live status checks will be shown here in a later release.",
        record.bot_username
    ))
}

pub fn bot_deleted(removed: Option<&UserBotRecord>) -> Screen {
    match removed {
        Some(_) => Screen::text(
            "Your bot has been deleted.\n\n\
            You can create a new one now.",
        ),
        None => Screen::text("No bot found to delete."),
    }
}

pub fn bot_broadcast(record: &UserBotRecord) -> Screen {
    Screen::text(format!(
        "You will be able to message users through @{}.\n\n\
        This section is a preview. Coming next:\n\
        - Forward / Plain\n\
        - Private / Public / Channel / Users / Both\n\
        - Messages with buttons",
        record.bot_username
    ))
}

pub fn admin_panel() -> Screen {
    Screen::with_keyboard(
        "Welcome to the admin panel.\nChoose a section:",
        admin_keyboard(),
    )
}

pub fn admin_section(section: &AdminSection, state: &PlatformState) -> Screen {
    let text = match section {
        AdminSection::AddMedia => "📥 Add message (preview).\n\n\
            Coming next:\n\
            - Receiving media\n\
            - Uploading with a 0.10 second gap\n\
            - A \"✔️ DONE\" button"
            .to_string(),
        AdminSection::Send => "📤 Send message (preview).\n\n\
            Coming next:\n\
            - Forward / Plain\n\
            - Private / Public / Channel / Users / Both\n\
            - Messages with buttons"
            .to_string(),
        AdminSection::Bots => recent_bots_text(state),
        AdminSection::Stats => {
            let summary = state.stats_summary();
            format!(
                "📊 Platform statistics (preview):\n\n\
                Bots created: {}\n\
                Users: {}\n\n\
                Coming next: today, last 10 days, last month and last year.",
                html::bold(&summary.created_total.to_string()),
                html::bold(&summary.users_total.to_string())
            )
        }
        AdminSection::Settings => "⚙️ System settings (preview).\n\n\
            Coming next:\n\
            - Mandatory subscription (3 kinds)\n\
            - Channel list\n\
            - Editing\n\
            - Export to a txt file"
            .to_string(),
        AdminSection::Unknown(_) => "Unknown admin section.".to_string(),
    };
    Screen::text(text)
}

fn recent_bots_text(state: &PlatformState) -> String {
    let recent = state.recent_created(RECENT_BOTS_LIMIT);
    if recent.is_empty() {
        return "No bots have been created yet.".to_string();
    }

    let mut lines = vec![format!("Last {} created bots:", RECENT_BOTS_LIMIT)];
    for (i, entry) in recent.iter().enumerate() {
        lines.push(format!(
            "{}. @{} | owner: {} | {} | Token: {}",
            i + 1,
            entry.bot_username,
            html::code_inline(&entry.owner_id.to_string()),
            format_timestamp(entry.created_at),
            html::code_inline(&entry.bot_token)
        ));
    }
    lines.join("\n")
}

/// Reply for a submitted token, or `None` when the message was not part of
/// a registration.
pub fn submit_reply(outcome: &SubmitOutcome) -> Option<Screen> {
    let screen = match outcome {
        SubmitOutcome::NotPending => return None,
        SubmitOutcome::MalformedToken => {
            Screen::text("This doesn't look like a token. Please send a valid token.")
        }
        SubmitOutcome::AlreadyRegistered { bot_username } => Screen::text(format!(
            "You already have a bot (@{bot_username}) 😅\n\
            If you want another one, delete your old bot first."
        )),
        SubmitOutcome::InvalidToken => Screen::text("❌ Invalid token. Please send it again."),
        SubmitOutcome::CheckFailed => {
            Screen::text("Something went wrong while checking the token. Please try again.")
        }
        SubmitOutcome::BotClaimed { bot_username } => Screen::text(format!(
            "@{bot_username} is already registered by another user. Please send a different token."
        )),
        SubmitOutcome::Registered(record) => registered(record),
    };
    Some(screen)
}

fn registered(record: &UserBotRecord) -> Screen {
    let text = format!(
        "Your bot @{} is ready!\n\n\
        Send {} to your bot to open its admin panel, or use the button below.",
        record.bot_username,
        html::bold("/admin")
    );

    let link = format!("https://t.me/{}?start=admin", record.bot_username);
    match reqwest::Url::parse(&link) {
        Ok(url) => Screen::with_keyboard(
            text,
            InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::url("Open bot", url)]]),
        ),
        Err(_) => Screen::text(text),
    }
}
