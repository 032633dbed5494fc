//! Homework Bot
//!
//! A long-running agent that watches the homework review API for status
//! changes and announces each change in a Telegram chat.
//!
//! Architecture:
//! - Configuration: credentials and intervals from the environment (`.env` supported)
//! - Repositories: HTTP communication with the review API and Telegram
//! - Services: best-effort notification delivery
//! - Scheduler: the poll loop, its query window, and the dedup log
//!
//! Missing credentials stop the process at startup. Everything that goes
//! wrong after that is logged and retried on the next cycle.

mod config;
mod logging;
mod repository;
mod scheduler;
mod service;

use anyhow::{Context, Result};
use homework_client::{PracticumClient, TELEGRAM_API_URL, TelegramClient};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::{error, info};

use crate::config::Config;
use crate::repository::StatusRepository;
use crate::scheduler::StatusPoller;
use crate::service::{Notifier, TelegramNotifier};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    logging::init(&logging::log_path());

    info!("Starting homework status bot");

    let (config, repository, notifier) = match setup() {
        Ok(parts) => parts,
        Err(e) => {
            error!("CRITICAL: {:#}. Shutting down.", e);
            return Err(e);
        }
    };

    info!(
        "Loaded configuration: chat_id={}, endpoint={}, retry_interval={:?}",
        config.telegram_chat_id, config.endpoint, config.retry_interval
    );

    let mut poller = StatusPoller::new(&config, repository, notifier);
    poller.run().await;

    Ok(())
}

/// Loads configuration and builds the remote clients
///
/// Any error here is fatal.
fn setup() -> Result<(Config, Arc<dyn StatusRepository>, Arc<dyn Notifier>)> {
    let config = Config::from_env().context("Missing or invalid environment variables")?;
    config.validate().context("Invalid configuration")?;

    let http_client = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .context("Failed to build HTTP client")?;

    let practicum = PracticumClient::with_client(
        config.endpoint.clone(),
        SecretString::from(config.practicum_token.expose_secret().to_owned()),
        http_client.clone(),
    );

    let telegram = TelegramClient::with_client(
        TELEGRAM_API_URL,
        SecretString::from(config.telegram_token.expose_secret().to_owned()),
        http_client,
    )
    .context("Invalid Telegram bot token")?;

    let repository: Arc<dyn StatusRepository> = Arc::new(practicum);
    let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(
        Arc::new(telegram),
        config.telegram_chat_id.clone(),
    ));

    Ok((config, repository, notifier))
}
