use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use gateway_api::{build_router, AppState};
use gateway_infrastructure::HttpNotificationSender;
use gateway_shared::config::{AppConfig, LogSettings};
use tokio::signal;
use tracing::{error, info, warn};

/// Development-mode mobile-money gateway simulator
#[derive(Parser, Debug)]
#[command(name = "gateway-server", version, about)]
struct Args {
    /// Directory holding default.toml and {APP_ENV}.toml
    #[arg(long, env = "GATEWAY_CONFIG_DIR", default_value = "config")]
    config_dir: String,

    /// Overrides app.host
    #[arg(long)]
    host: Option<String>,

    /// Overrides app.port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Load configuration
    let config = match AppConfig::load_from(&args.config_dir) {
        Ok(mut c) => {
            if let Some(host) = args.host {
                c.app.host = host;
            }
            if let Some(port) = args.port {
                c.app.port = port;
            }
            c
        }
        Err(e) => {
            gateway_shared::telemetry::init_telemetry(&LogSettings::default());
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize telemetry
    gateway_shared::telemetry::init_telemetry(&config.log);

    info!("{} starting in {} mode...", config.app.name, config.gateway.mode);

    let notifier = Arc::new(HttpNotificationSender::new(Duration::from_secs(
        config.notifier.timeout_seconds,
    ))?);
    let state = AppState::new(&config, notifier)?;
    let app = build_router(state);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    let base_url = config.app.base_url();

    info!("Listening on {}", addr);
    info!("  POST {}/create-payment", base_url);
    info!("  GET  {}/mock-payment/{{session_id}}", base_url);
    info!("  POST {}/payment-notification", base_url);
    info!("  GET  {}/status", base_url);
    match config.merchant.notification_url.as_deref() {
        Some(url) => info!("Merchant notifications go to {}", url),
        None => warn!("No default merchant notification URL configured"),
    }

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped; all sessions discarded");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => error!("Failed to listen for SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
