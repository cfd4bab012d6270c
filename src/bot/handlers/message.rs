use teloxide::prelude::*;
use crate::bot::commands::Command;
use crate::bot::handlers::HandlerResult;
use crate::services::panel::PanelService;

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    panel: PanelService,
) -> HandlerResult {
    match cmd {
        Command::Start(_payload) => {
            crate::bot::commands::start::handle_start(bot, msg, &panel).await?;
        }
        Command::Admin | Command::AdminCapitalized => {
            crate::bot::commands::admin::handle_admin(bot, msg, &panel).await?;
        }
    }
    Ok(())
}
