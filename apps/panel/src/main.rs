use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::ControlPanel;
use shared::domain::ChannelId;
use tokio::io::BufReader;
use tracing::info;

mod config;
mod shell;

use config::load_settings;
use shell::{run_once, OperatorAction};

#[derive(Parser, Debug)]
#[command(
    name = "dispatcher-panel",
    about = "Control the Tomcat and Jetty pipelines through the dispatcher"
)]
struct Cli {
    /// Dispatcher base location, e.g. http://localhost:8085/dispatcher-app
    #[arg(long, global = true)]
    dispatcher_url: Option<String>,
    #[arg(long, global = true, default_value = "panel.toml")]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the channel's consumer
    Start { channel: ChannelId },
    /// Stop the channel's consumer
    Stop { channel: ChannelId },
    /// Fetch the consumer's buffered messages
    Messages { channel: ChannelId },
    /// Fetch producer stats
    Stats { channel: ChannelId },
    /// Send one message through the channel's producer
    Send {
        channel: ChannelId,
        #[arg(default_value = "")]
        text: String,
    },
    /// Interactive operator session
    Shell,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let mut settings = load_settings(&cli.config)?;
    if let Some(url) = cli.dispatcher_url {
        settings.dispatcher_url = url;
    }

    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .with_writer(std::io::stderr)
        .init();

    let panel = ControlPanel::new(&settings.dispatcher_url)
        .context("failed to configure dispatcher location")?;
    info!(dispatcher = %settings.dispatcher_url, "dispatcher panel ready");

    let (channel, action) = match cli.command {
        Command::Shell => {
            shell::run(panel, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await?;
            return Ok(ExitCode::SUCCESS);
        }
        Command::Start { channel } => (channel, OperatorAction::StartConsumer),
        Command::Stop { channel } => (channel, OperatorAction::StopConsumer),
        Command::Messages { channel } => (channel, OperatorAction::FetchMessages),
        Command::Stats { channel } => (channel, OperatorAction::FetchStats),
        Command::Send { channel, text } => {
            panel.channel(channel).set_producer_input(text);
            (channel, OperatorAction::SendProducerMessage)
        }
    };

    let outcome = run_once(&panel, channel, action, &mut tokio::io::stdout()).await?;
    Ok(outcome.into())
}
