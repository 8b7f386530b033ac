use std::path::PathBuf;

use clap::{Parser, Subcommand};

use isp_monitor::config::{credentials, load_or_default, TelegramCredentials};
use isp_monitor::health::Prober;
use isp_monitor::notify::{NotificationSender, TelegramClient, TelegramSender};
use isp_monitor::observability::logging;

#[derive(Parser)]
#[command(name = "isp-monitor-cli")]
#[command(about = "Setup and diagnostics for the connectivity monitor", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the chat id of the last chat that messaged the bot
    ChatId,
    /// Deliver one test message to the configured chat
    SendTest {
        #[arg(short, long, default_value = "isp-monitor test message")]
        message: String,
    },
    /// Run a single probe cycle and print the result as JSON
    Probe,
    /// Validate the config file and credentials
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = load_or_default(cli.config.as_deref())?;
    logging::init_logging(config.observability.log_format);

    match cli.command {
        Commands::ChatId => {
            let token = credentials::bot_token_from_env()?;
            let client = TelegramClient::new(&config.telegram, token)?;
            let chat = client.discover_chat().await?;
            println!("CHAT_ID = {}", chat.id);
            println!("CHAT_TYPE = {}", chat.kind);
            println!("CHAT_TITLE/USER = {}", chat.display_name().unwrap_or("-"));
        }
        Commands::SendTest { message } => {
            let credentials = TelegramCredentials::from_env()?;
            let sender = TelegramSender::new(&config.telegram, credentials)?;
            if sender.send(&message).await {
                println!("Message delivered");
            } else {
                eprintln!("Delivery failed; see log output");
                std::process::exit(1);
            }
        }
        Commands::Probe => {
            let prober = Prober::new(config.probe.clone())?;
            let summary = prober.probe_cycle().await;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::CheckConfig => {
            let credentials = TelegramCredentials::from_env()?;
            println!("Configuration OK ({} targets)", config.probe.targets.len());
            println!("Credentials OK (chat {})", credentials.chat_id);
        }
    }

    Ok(())
}
