use teloxide::prelude::*;
use crate::bot::handlers::{display_name, send_screen, HandlerResult};
use crate::bot::menu::{Screen, OWNER_ONLY};
use crate::services::panel::{PanelReply, PanelService};
use crate::utils::logging::{log_command_start, log_command_success};

pub async fn handle_admin(
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

    log_command_start("/admin", &name, user_id, chat_id.0, None);

    match panel.admin(user_id).await {
        PanelReply::Show(screen) => {
            send_screen(&bot, chat_id, screen, None).await?;
            log_command_success("/admin", &name, user_id, chat_id.0, None);
        }
        PanelReply::Toast(text) => {
            send_screen(&bot, chat_id, Screen::text(text), Some(msg.id)).await?;
        }
        PanelReply::Denied => {
            tracing::warn!("Non-owner {}({}) tried to open the admin panel", name, user_id);
            send_screen(&bot, chat_id, Screen::text(OWNER_ONLY), Some(msg.id)).await?;
        }
    }

    Ok(())
}
