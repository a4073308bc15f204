//! # Weather Relay Service
//!
//! Binary entry point for the weather relay worker.
//!
//! This executable:
//! - Initializes logging
//! - Loads configuration from the optional file and environment
//! - Connects the AMQP consumer (the only fatal boundary)
//! - Runs the sequential consumer loop until shutdown

use queue_consumer::{AmqpConsumer, AmqpSettings, QueueName};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weather_relay_service::api_client::WeatherApiClient;
use weather_relay_service::config::ServiceConfig;
use weather_relay_service::consumer::run_consumer_loop;
use weather_relay_service::processor::MessageProcessor;
use weather_relay_service::retry::RetryPolicy;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_relay_service=info,queue_consumer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match ServiceConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "failed to load configuration; aborting");
            std::process::exit(3);
        }
    };

    if let Err(e) = config.validate() {
        error!(error = %e, "configuration is invalid; aborting");
        std::process::exit(3);
    }

    info!(
        queue_url = %config.masked_queue_url(),
        queue = %config.queue.name,
        api_url = %config.api.base_url,
        max_attempts = config.delivery.max_attempts,
        "starting weather relay worker"
    );

    let queue_name = QueueName::new(config.queue.name.clone())?;
    let settings = AmqpSettings {
        url: config.queue.url.clone(),
        queue: queue_name,
        prefetch: config.queue.prefetch,
    };

    let mut consumer = match AmqpConsumer::connect(&settings).await {
        Ok(consumer) => consumer,
        Err(e) => {
            error!(error = %e, "failed to connect to the queue; aborting");
            std::process::exit(1);
        }
    };

    let sink = Arc::new(WeatherApiClient::new(
        &config.api.base_url,
        config.request_timeout(),
    )?);
    let processor = MessageProcessor::new(
        sink,
        RetryPolicy::new(config.delivery.max_attempts, config.retry_delay()),
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, shutting down after the in-flight message");
            let _ = shutdown_tx.send(true);
        }
    });

    info!("waiting for messages");
    run_consumer_loop(&mut consumer, &processor, shutdown_rx).await?;

    info!("consumer stopped");
    Ok(())
}
