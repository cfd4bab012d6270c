//! # Bot Forge Main Entry Point
//!
//! Initializes logging, loads configuration, opens the store, and runs the
//! Telegram dispatcher next to the health check server.

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bot_forge::bot::handlers::BotHandler;
use bot_forge::config::Config;
use bot_forge::services::health::HealthService;
use bot_forge::services::panel::PanelService;
use bot_forge::services::pending::PendingRegistrations;
use bot_forge::services::registration::RegistrationService;
use bot_forge::services::token_validator::TelegramTokenValidator;
use bot_forge::store::JsonStore;
use bot_forge::utils::logging::log_system_event;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bot_forge=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting Bot Forge v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded - Data file: {}, HTTP Port: {}",
        config.data_file.display(), config.http_port);

    // Open store
    let store = JsonStore::open(&config.data_file).await?;

    // Wire services
    let validator = TelegramTokenValidator::new(
        config.telegram_api_url.clone(),
        config.token_check_timeout,
    )?;
    let pending = PendingRegistrations::new();
    let registration = RegistrationService::new(store.clone(), Arc::new(validator), pending.clone());
    let panel = PanelService::new(store.clone(), registration, config.main_bot_username.clone());

    info!("Initializing Telegram bot...");
    let bot = Bot::new(&config.bot_token);
    let handler = BotHandler::new(panel);
    log_system_event("bot initialized", Some(format!("main bot @{}", config.main_bot_username).as_str()));

    let health_service = HealthService::new(store, pending);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    info!("Health check server starting on port {}", config.http_port);

    let bot_task = tokio::spawn(async move {
        Dispatcher::builder(bot, handler.schema())
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    });

    let health_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, health_service.router).await {
            tracing::error!("Health server error: {}", e);
        }
    });

    // Wait for either task to complete (which would indicate shutdown)
    tokio::select! {
        result1 = bot_task => {
            if let Err(e) = result1 {
                tracing::error!("Bot task error: {}", e);
            }
        }
        result2 = health_task => {
            if let Err(e) = result2 {
                tracing::error!("Health task error: {}", e);
            }
        }
    }

    log_system_event("application stopped", None);
    Ok(())
}
