use teloxide::prelude::*;
use crate::bot::callbacks::CallbackAction;
use crate::bot::handlers::{display_name, edit_screen, HandlerResult};
use crate::bot::menu::{GENERIC_FAILURE, OWNER_ONLY};
use crate::services::panel::{PanelReply, PanelService};
use crate::utils::logging::log_command_error;

pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    panel: PanelService,
) -> HandlerResult {
    let user_id = q.from.id.0;
    let name = display_name(&q.from);
    let chat_id = q.message.as_ref().map(|m| m.chat.id.0).unwrap_or(0);

    let Some(action) = q.data.as_deref().and_then(CallbackAction::parse) else {
        tracing::warn!("Unrecognised callback data {:?} from {}({})", q.data, name, user_id);
        bot.answer_callback_query(q.id)
            .text("Unknown action")
            .await?;
        return Ok(());
    };

    tracing::info!(
        "Callback received: '{}' from user {} ({}) in chat {}",
        action.data(), name, user_id, chat_id
    );

    let reply = match panel.handle(user_id, &action).await {
        Ok(reply) => reply,
        Err(e) => {
            log_command_error(action.name(), &name, user_id, chat_id, &e.to_string());
            bot.answer_callback_query(q.id)
                .text(GENERIC_FAILURE)
                .await?;
            return Ok(());
        }
    };

    match reply {
        PanelReply::Show(screen) => {
            bot.answer_callback_query(q.id).await?;
            if let Some(message) = &q.message {
                // Telegram refuses edits that change nothing; that is not worth failing over
                if let Err(e) = edit_screen(&bot, message.chat.id, message.id, screen).await {
                    tracing::warn!("Failed to update message for callback '{}': {}", action.data(), e);
                }
            }
        }
        PanelReply::Toast(text) => {
            bot.answer_callback_query(q.id)
                .text(text)
                .await?;
        }
        PanelReply::Denied => {
            tracing::warn!("Non-owner {}({}) pressed '{}'", name, user_id, action.data());
            bot.answer_callback_query(q.id)
                .text(OWNER_ONLY)
                .await?;
        }
    }

    Ok(())
}
