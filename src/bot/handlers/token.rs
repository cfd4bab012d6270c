use teloxide::prelude::*;
use crate::bot::handlers::{display_name, send_screen, HandlerResult};
use crate::bot::menu::{submit_reply, GENERIC_FAILURE};
use crate::services::registration::{RegistrationService, SubmitOutcome};
use crate::utils::feedback::CommandFeedback;
use crate::utils::logging::{
    log_command_error, log_command_start, log_command_success, log_validation_error, mask_token,
};

/// Handles free text from a user who is registering a bot.
pub async fn token_handler(
    bot: Bot,
    msg: Message,
    registration: RegistrationService,
) -> HandlerResult {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    let user_id = user.id.0;
    let name = display_name(user);
    let chat_id = msg.chat.id;
    // non-text messages are treated as a malformed token
    let text = msg.text().unwrap_or_default();

    log_command_start("submit_token", &name, user_id, chat_id.0, Some(mask_token(text.trim()).as_str()));

    let outcome = match registration.submit(user_id, text).await {
        Ok(outcome) => outcome,
        Err(e) => {
            log_command_error("submit_token", &name, user_id, chat_id.0, &e.to_string());
            CommandFeedback::replying_to(bot, &msg).error(GENERIC_FAILURE).await?;
            return Ok(());
        }
    };

    match &outcome {
        SubmitOutcome::MalformedToken => {
            log_validation_error("submit_token", "<hidden>", "missing ':' separator", &name, user_id);
        }
        SubmitOutcome::InvalidToken => {
            log_validation_error("submit_token", &mask_token(text.trim()), "rejected by getMe", &name, user_id);
        }
        SubmitOutcome::Registered(record) => {
            let details = format!("registered @{}", record.bot_username);
            log_command_success("submit_token", &name, user_id, chat_id.0, Some(details.as_str()));
        }
        other => tracing::info!("Token submission by {}({}) ended with {:?}", name, user_id, other),
    }

    if let Some(screen) = submit_reply(&outcome) {
        send_screen(&bot, chat_id, screen, Some(msg.id)).await?;
    }

    Ok(())
}
