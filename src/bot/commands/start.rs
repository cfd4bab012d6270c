use teloxide::prelude::*;
use crate::bot::handlers::{display_name, send_screen, HandlerResult};
use crate::bot::menu::GENERIC_FAILURE;
use crate::services::panel::PanelService;
use crate::utils::feedback::CommandFeedback;
use crate::utils::logging::{log_command_error, log_command_start, log_command_success};

pub async fn handle_start(
    bot: Bot,
    msg: Message,
    panel: &PanelService,
) -> HandlerResult {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    let user_id = user.id.0;
    let name = display_name(user);
    let chat_id = msg.chat.id;

    log_command_start("/start", &name, user_id, chat_id.0, None);

    match panel.start(user_id).await {
        Ok(screen) => {
            send_screen(&bot, chat_id, screen, None).await?;
            log_command_success("/start", &name, user_id, chat_id.0, None);
        }
        Err(e) => {
            log_command_error("/start", &name, user_id, chat_id.0, &e.to_string());
            CommandFeedback::new(bot, chat_id).error(GENERIC_FAILURE).await?;
        }
    }

    Ok(())
}
