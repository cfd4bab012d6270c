pub mod admin;
pub mod start;

use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Bot platform commands:")]
pub enum Command {
    /// The payload of a `t.me/<bot>?start=<payload>` link, usually empty.
    #[command(description = "Open the main menu")]
    Start(String),
    #[command(description = "Open the owner's admin panel")]
    Admin,
    #[command(rename = "Admin", description = "off")]
    AdminCapitalized,
}
