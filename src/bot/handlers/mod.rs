pub mod callback;
pub mod message;
pub mod token;

use teloxide::{
    dispatching::UpdateHandler,
    prelude::*,
    types::{MessageId, ParseMode, User},
};
use crate::bot::menu::Screen;
use crate::services::panel::PanelService;

pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type HandlerResult = Result<(), HandlerError>;

pub struct BotHandler {
    pub panel: PanelService,
}

impl BotHandler {
    pub fn new(panel: PanelService) -> Self {
        Self { panel }
    }

    pub fn schema(&self) -> UpdateHandler<HandlerError> {
        let panel = self.panel.clone();
        let panel_callback = self.panel.clone();
        let registration = self.panel.registration().clone();
        let registration_filter = self.panel.registration().clone();

        dptree::entry()
            .branch(
                Update::filter_message()
                    .filter_command::<crate::bot::commands::Command>()
                    .endpoint(move |bot, msg, cmd| {
                        let panel = panel.clone();
                        async move { message::command_handler(bot, msg, cmd, panel).await }
                    }),
            )
            .branch(
                Update::filter_message()
                    .filter(move |msg: Message| {
                        msg.from()
                            .map_or(false, |user| registration_filter.is_pending(user.id.0))
                    })
                    .endpoint(move |bot, msg| {
                        let registration = registration.clone();
                        async move { token::token_handler(bot, msg, registration).await }
                    }),
            )
            .branch(Update::filter_callback_query().endpoint(move |bot, q| {
                let panel = panel_callback.clone();
                async move { callback::callback_handler(bot, q, panel).await }
            }))
    }
}

/// Name used in log lines: the @username when there is one.
pub(crate) fn display_name(user: &User) -> String {
    user.username
        .clone()
        .unwrap_or_else(|| user.first_name.clone())
}

pub(crate) async fn send_screen(
    bot: &Bot,
    chat_id: ChatId,
    screen: Screen,
    reply_to: Option<MessageId>,
) -> ResponseResult<Message> {
    let mut request = bot
        .send_message(chat_id, screen.text)
        .parse_mode(ParseMode::Html);
    if let Some(keyboard) = screen.keyboard {
        request = request.reply_markup(keyboard);
    }
    if let Some(id) = reply_to {
        request = request.reply_to_message_id(id);
    }
    request.await
}

pub(crate) async fn edit_screen(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    screen: Screen,
) -> ResponseResult<Message> {
    let mut request = bot
        .edit_message_text(chat_id, message_id, screen.text)
        .parse_mode(ParseMode::Html);
    if let Some(keyboard) = screen.keyboard {
        request = request.reply_markup(keyboard);
    }
    request.await
}
