//! # Shift Reminder Bot Main Entry Point
//!
//! Initializes logging, loads configuration, starts the reminder engine,
//! and runs the Telegram bot next to the health check server.

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tokio::sync::Mutex;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod bot;
mod config;
mod schedule;
mod services;
mod state;
mod utils;

use crate::bot::handlers::{setup_storage, BotHandler};
use crate::config::Config;
use crate::services::health::HealthService;
use crate::services::reminder::ReminderService;
use crate::services::vision::RosterReader;
use crate::state::{AccessRegistry, AppContext, ScheduleRegistry};
use crate::utils::logging::log_system_event;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shift_reminder_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting Shift Reminder Bot v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded - Timezone: {}, HTTP Port: {}, Owner: {}",
        config.timezone, config.http_port, config.owner_id
    );

    // In-memory state; everything is rebuilt from scratch on restart
    let registry = Arc::new(Mutex::new(ScheduleRegistry::default()));
    let access = Arc::new(Mutex::new(AccessRegistry::new(config.owner_id)));

    // Initialize bot
    info!("Initializing Telegram bot...");
    let bot = Bot::new(&config.telegram_bot_token);

    // Initialize and start reminder service
    info!("Initializing reminder service...");
    let mut reminder_service = match ReminderService::new(bot.clone(), registry.clone(), &config).await
    {
        Ok(service) => {
            info!("Reminder service initialized successfully");
            service
        }
        Err(e) => {
            tracing::error!("Failed to create reminder service: {}", e);
            return Err(anyhow::anyhow!("Failed to create reminder service: {}", e));
        }
    };

    if let Err(e) = reminder_service.start().await {
        tracing::error!("Failed to start reminder service: {}", e);
    } else {
        info!("Reminder service started successfully");
    }

    let roster = Arc::new(RosterReader::from_config(&config));
    if roster.is_enabled() {
        info!("Roster photo reading enabled with model {}", config.roster_model);
    } else {
        info!("Roster photo reading disabled (no OPENAI_API_KEY)");
    }

    let ctx = AppContext {
        config: Arc::new(config.clone()),
        access,
        reminders: reminder_service.context(),
        roster,
    };
    let handler = BotHandler::new(ctx);

    // Initialize health service
    let health_service = HealthService::new(registry.clone());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    info!("Health check server starting on port {}", config.http_port);
    log_system_event("startup_complete", None);

    // Run both the bot and health server concurrently
    let storage = setup_storage();
    let bot_task = tokio::spawn(async move {
        Dispatcher::builder(bot, handler.schema())
            .dependencies(dptree::deps![storage])
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

    // Stop reminder service on shutdown
    if let Err(e) = reminder_service.stop().await {
        tracing::warn!("Error stopping reminder service: {}", e);
    }

    info!("Application stopped");
    Ok(())
}
