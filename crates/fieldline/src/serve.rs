// SPDX-FileCopyrightText: 2026 Fieldline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `serve` subcommand: webhook gateway plus the reminder sweep.
//!
//! Runs the gateway HTTP server and, when notifications are enabled, a
//! periodic reminder sweep on the same runtime. Shuts down on ctrl-c,
//! checkpointing the store before exit.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{error, info};

use fieldline_config::FieldlineConfig;
use fieldline_core::{FieldlineError, SmsTransport, Store};
use fieldline_gateway::{GatewayState, ServerConfig};
use fieldline_notify::TwilioTransport;
use fieldline_storage::SqliteStore;

pub async fn run(config: FieldlineConfig) -> Result<(), FieldlineError> {
    let store = Arc::new(SqliteStore::new(config.storage.clone()));
    store.initialize().await?;
    info!(path = %config.storage.database_path, "store ready");

    let state = GatewayState {
        store: store.clone() as Arc<dyn Store>,
        start_time: Instant::now(),
    };
    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
        webhook_token: config.gateway.webhook_token.clone(),
    };
    let mut server = tokio::spawn(async move {
        fieldline_gateway::start_server(&server_config, state).await
    });

    let sweep = if config.notify.enabled {
        let transport = build_transport(&config)?;
        let sweep_store = store.clone() as Arc<dyn Store>;
        let window_hours = config.notify.reminder_window_hours;
        let interval = Duration::from_secs(config.notify.sweep_interval_secs);
        Some(tokio::spawn(async move {
            reminder_loop(sweep_store, transport, window_hours, interval).await;
        }))
    } else {
        info!("notifications disabled; reminder sweep not started");
        None
    };

    tokio::select! {
        result = &mut server => {
            match result {
                Ok(Ok(())) => error!("gateway server exited unexpectedly"),
                Ok(Err(e)) => error!(error = %e, "gateway server failed"),
                Err(e) => error!(error = %e, "gateway task panicked"),
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
            server.abort();
        }
    }

    if let Some(sweep) = sweep {
        sweep.abort();
    }
    store.close().await?;
    info!("shutdown complete");
    Ok(())
}

fn build_transport(config: &FieldlineConfig) -> Result<Arc<dyn SmsTransport>, FieldlineError> {
    // Validation guarantees these are present when notify.enabled is set.
    let sid = config
        .notify
        .account_sid
        .as_deref()
        .ok_or_else(|| FieldlineError::Config("notify.account_sid is required".to_string()))?;
    let token = config
        .notify
        .auth_token
        .as_deref()
        .ok_or_else(|| FieldlineError::Config("notify.auth_token is required".to_string()))?;
    let from = config
        .notify
        .from_number
        .as_deref()
        .ok_or_else(|| FieldlineError::Config("notify.from_number is required".to_string()))?;
    Ok(Arc::new(TwilioTransport::new(
        config.notify.base_url.clone(),
        sid,
        token,
        from,
    )))
}

async fn reminder_loop(
    store: Arc<dyn Store>,
    transport: Arc<dyn SmsTransport>,
    window_hours: i64,
    interval: Duration,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    loop {
        ticker.tick().await;
        match fieldline_notify::reminders::dispatch_due(
            store.as_ref(),
            transport.as_ref(),
            window_hours,
        )
        .await
        {
            Ok(0) => {}
            Ok(sent) => info!(sent, "reminder sweep complete"),
            Err(e) => error!(error = %e, "reminder sweep failed"),
        }
    }
}
