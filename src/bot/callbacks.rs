//! Callback data carried by the inline keyboards.

/// Actions on the user's own bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManageAction {
    Status,
    Delete,
    Broadcast,
}

/// Sections of the owner's admin panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminSection {
    AddMedia,
    Send,
    Bots,
    Stats,
    Settings,
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    About,
    CreateBot,
    MyBot,
    Manage(ManageAction),
    Admin(AdminSection),
}

const ADMIN_PREFIX: &str = "admin_";

impl CallbackAction {
    pub fn parse(data: &str) -> Option<Self> {
        let action = match data {
            "about" => Self::About,
            "create_bot" => Self::CreateBot,
            "my_bot" => Self::MyBot,
            "bot_status" => Self::Manage(ManageAction::Status),
            "bot_delete" => Self::Manage(ManageAction::Delete),
            "bot_broadcast" => Self::Manage(ManageAction::Broadcast),
            other => {
                let section = other.strip_prefix(ADMIN_PREFIX)?;
                Self::Admin(match section {
                    "add_media" => AdminSection::AddMedia,
                    "send" => AdminSection::Send,
                    "bots" => AdminSection::Bots,
                    "stats" => AdminSection::Stats,
                    "settings" => AdminSection::Settings,
                    unknown => AdminSection::Unknown(unknown.to_string()),
                })
            }
        };
        Some(action)
    }

    pub fn data(&self) -> String {
        match self {
            Self::About => "about".to_string(),
            Self::CreateBot => "create_bot".to_string(),
            Self::MyBot => "my_bot".to_string(),
            Self::Manage(ManageAction::Status) => "bot_status".to_string(),
            Self::Manage(ManageAction::Delete) => "bot_delete".to_string(),
            Self::Manage(ManageAction::Broadcast) => "bot_broadcast".to_string(),
            Self::Admin(section) => {
                let name = match section {
                    AdminSection::AddMedia => "add_media",
                    AdminSection::Send => "send",
                    AdminSection::Bots => "bots",
                    AdminSection::Stats => "stats",
                    AdminSection::Settings => "settings",
                    AdminSection::Unknown(name) => name.as_str(),
                };
                format!("{ADMIN_PREFIX}{name}")
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::About => "about",
            Self::CreateBot => "create_bot",
            Self::MyBot => "my_bot",
            Self::Manage(_) => "manage",
            Self::Admin(_) => "admin",
        }
    }
}
