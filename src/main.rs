//! Connectivity health monitor.
//!
//! Probes DNS and a few HTTP endpoints every interval, classifies the
//! connection as UP / DEGRADED / DOWN, and reports state changes to a
//! Telegram chat.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────┐   CycleSummary   ┌────────────┐  state change  ┌──────────┐
//!   │  Prober  │─────────────────▶│ Classifier │───────────────▶│   Gate   │
//!   │ DNS+HTTP │                  │ (session)  │                │ cooldown │
//!   └──────────┘                  └────────────┘                └────┬─────┘
//!        ▲                                                           │ alert
//!        │ every interval_secs                                       ▼
//!   ┌──────────┐                                              ┌────────────┐
//!   │  runner  │◀── shutdown (SIGINT/SIGTERM)                 │  Telegram  │
//!   └──────────┘                                              └────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use isp_monitor::config::{load_or_default, TelegramCredentials};
use isp_monitor::health::Prober;
use isp_monitor::lifecycle::{spawn_signal_listener, Shutdown};
use isp_monitor::notify::TelegramSender;
use isp_monitor::observability::{logging, metrics};
use isp_monitor::Monitor;

#[derive(Parser)]
#[command(name = "isp-monitor")]
#[command(about = "Connectivity health monitor with Telegram alerts", long_about = None)]
struct Args {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to a .env file with TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID.
    #[arg(long)]
    env_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    match &args.env_file {
        Some(path) => {
            dotenv::from_path(path)?;
        }
        None => {
            dotenv::dotenv().ok();
        }
    }

    let config = load_or_default(args.config.as_deref())?;
    logging::init_logging(config.observability.log_format);

    let credentials = TelegramCredentials::from_env()?;

    tracing::info!(
        targets = config.probe.targets.len(),
        interval_secs = config.interval_secs,
        timeout_secs = config.probe.timeout_secs,
        cooldown_secs = config.alerts.cooldown_secs,
        chat_id = %credentials.chat_id,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let prober = Prober::new(config.probe.clone())?;
    let sender = TelegramSender::new(&config.telegram, credentials)?;

    let shutdown = Shutdown::new();
    let stop = shutdown.subscribe();
    spawn_signal_listener(shutdown);

    Monitor::new(&config, prober, sender).run(stop).await;

    tracing::info!("Shutdown complete");
    Ok(())
}
