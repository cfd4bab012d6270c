use bot_forge::bot::commands::Command;
use teloxide::utils::command::BotCommands;

#[cfg(test)]
mod command_parsing_tests {
    use super::*;

    #[test]
    fn test_start_command_parsing() {
        let result = Command::parse("/start", "forgebot");
        assert_eq!(result.unwrap(), Command::Start(String::new()));
    }

    #[test]
    fn test_start_with_deep_link_payload() {
        let result = Command::parse("/start admin", "forgebot");
        assert_eq!(result.unwrap(), Command::Start("admin".to_string()));
    }

    #[test]
    fn test_admin_command_parsing() {
        assert_eq!(Command::parse("/admin", "forgebot").unwrap(), Command::Admin);
    }

    #[test]
    fn test_capitalized_admin_alias() {
        assert_eq!(
            Command::parse("/Admin", "forgebot").unwrap(),
            Command::AdminCapitalized
        );
    }

    #[test]
    fn test_command_addressed_to_bot() {
        assert_eq!(Command::parse("/admin@forgebot", "forgebot").unwrap(), Command::Admin);
        assert!(Command::parse("/admin@otherbot", "forgebot").is_err());
    }

    #[test]
    fn test_unknown_command() {
        assert!(Command::parse("/delete", "forgebot").is_err());
        assert!(Command::parse("111:AAA", "forgebot").is_err());
    }

    #[test]
    fn test_descriptions_list_commands() {
        let descriptions = Command::descriptions().to_string();
        assert!(descriptions.contains("/start"));
        assert!(descriptions.contains("/admin"));
    }
}
