use teloxide::prelude::*;
use teloxide::types::{MessageId, ParseMode};
use teloxide::utils::html;

/// Feedback types for different command outcomes
#[derive(Debug, Clone)]
pub enum FeedbackType {
    Success,
    Warning,
    Error,
    Info,
}

impl FeedbackType {
    fn emoji(&self) -> &'static str {
        match self {
            FeedbackType::Success => "✅",
            FeedbackType::Warning => "⚠️",
            FeedbackType::Error => "❌",
            FeedbackType::Info => "ℹ️",
        }
    }

    /// Prefixes the escaped message with the type's emoji.
    pub fn format(&self, message: &str) -> String {
        format!("{} {}", self.emoji(), html::escape(message))
    }
}

/// Plain-text replies to the message that triggered a handler
pub struct CommandFeedback {
    bot: Bot,
    chat_id: ChatId,
    reply_to: Option<MessageId>,
}

impl CommandFeedback {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id, reply_to: None }
    }

    pub fn replying_to(bot: Bot, msg: &Message) -> Self {
        Self {
            bot,
            chat_id: msg.chat.id,
            reply_to: Some(msg.id),
        }
    }

    /// Send immediate feedback message
    pub async fn send(&self, feedback_type: FeedbackType, message: &str) -> ResponseResult<Message> {
        let mut request = self
            .bot
            .send_message(self.chat_id, feedback_type.format(message))
            .parse_mode(ParseMode::Html);
        if let Some(id) = self.reply_to {
            request = request.reply_to_message_id(id);
        }
        request.await
    }

    /// Send error feedback
    pub async fn error(&self, message: &str) -> ResponseResult<Message> {
        self.send(FeedbackType::Error, message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_type_emojis() {
        assert_eq!(FeedbackType::Success.emoji(), "✅");
        assert_eq!(FeedbackType::Warning.emoji(), "⚠️");
        assert_eq!(FeedbackType::Error.emoji(), "❌");
        assert_eq!(FeedbackType::Info.emoji(), "ℹ️");
    }

    #[test]
    fn test_format_escapes_html() {
        assert_eq!(FeedbackType::Error.format("a <b> & c"), "❌ a &lt;b&gt; &amp; c");
    }
}
