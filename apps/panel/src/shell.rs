//! Line-oriented operator shell. Every action is spawned on its own task, so a
//! slow dispatcher never blocks the next command; the session only ends once
//! every spawned action has reported back.

use std::{process::ExitCode, sync::Arc};

use anyhow::{anyhow, bail, Context};
use client_core::{AlertLevel, ControlPanel, DisplayState, PanelEvent};
use shared::domain::ChannelId;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt},
    sync::{
        broadcast::{
            self,
            error::{RecvError, TryRecvError},
        },
        mpsc, watch,
    },
    task::JoinSet,
};
use tracing::warn;

pub const HELP: &str = "\
commands:
  <channel> start|stop        control the channel's consumer
  <channel> messages          fetch buffered consumer messages
  <channel> stats             fetch producer stats
  <channel> input <text>      set the producer input
  <channel> send              send the producer input
  show                        print both channels' display state
  help | quit
channels: tomcat, jetty";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorAction {
    StartConsumer,
    StopConsumer,
    FetchMessages,
    FetchStats,
    SendProducerMessage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Action {
        channel: ChannelId,
        action: OperatorAction,
    },
    SetInput {
        channel: ChannelId,
        text: String,
    },
    Show,
    Help,
    Quit,
}

/// Parses one operator line; blank lines yield `None`.
pub fn parse_line(line: &str) -> anyhow::Result<Option<ShellCommand>> {
    let line = line.trim_start();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest),
        None => (line.trim_end(), ""),
    };

    match head {
        "" => return Ok(None),
        "show" => return Ok(Some(ShellCommand::Show)),
        "help" | "?" => return Ok(Some(ShellCommand::Help)),
        "quit" | "exit" => return Ok(Some(ShellCommand::Quit)),
        _ => {}
    }

    let channel: ChannelId = head.parse()?;
    let (verb, argument) = match rest.trim_start().split_once(char::is_whitespace) {
        Some((verb, argument)) => (verb, argument),
        None => (rest.trim(), ""),
    };

    let action = match verb {
        "start" => OperatorAction::StartConsumer,
        "stop" => OperatorAction::StopConsumer,
        "messages" => OperatorAction::FetchMessages,
        "stats" => OperatorAction::FetchStats,
        "send" => OperatorAction::SendProducerMessage,
        "input" => {
            return Ok(Some(ShellCommand::SetInput {
                channel,
                text: argument.to_string(),
            }))
        }
        "" => bail!("missing action for {channel}; try 'help'"),
        other => return Err(anyhow!("unknown action '{other}' for {channel}; try 'help'")),
    };
    Ok(Some(ShellCommand::Action { channel, action }))
}

pub async fn perform(panel: &ControlPanel, channel: ChannelId, action: OperatorAction) {
    let controller = panel.channel(channel);
    match action {
        OperatorAction::StartConsumer => controller.start_consumer().await,
        OperatorAction::StopConsumer => controller.stop_consumer().await,
        OperatorAction::FetchMessages => controller.fetch_consumer_messages().await,
        OperatorAction::FetchStats => controller.fetch_producer_stats().await,
        OperatorAction::SendProducerMessage => controller.send_producer_message().await,
    }
}

pub fn render_alert(event: &PanelEvent) -> String {
    match event {
        PanelEvent::Alert {
            level: AlertLevel::Info,
            text,
        } => text.clone(),
        PanelEvent::Alert {
            level: AlertLevel::Error,
            text,
        } => format!("error: {text}"),
    }
}

pub fn render_display(channel: ChannelId, state: &DisplayState) -> String {
    format!(
        "[{label} consumer messages]\n{messages}\n[{label} producer stats]\n{stats}\n[{label} producer input] {input}",
        label = channel.label(),
        messages = state.fetched_messages,
        stats = state.producer_stats,
        input = state.producer_input,
    )
}

/// Lines printed when a fetch lands, including one that repeats the body
/// already shown. Input edits produce nothing.
pub fn display_updates(channel: ChannelId, shown: &DisplayState, current: &DisplayState) -> Vec<String> {
    let mut lines = Vec::new();
    if current.messages_ticket != shown.messages_ticket {
        lines.push(format!(
            "[{} consumer messages]\n{}",
            channel.label(),
            current.fetched_messages
        ));
    }
    if current.stats_ticket != shown.stats_ticket {
        lines.push(format!(
            "[{} producer stats]\n{}",
            channel.label(),
            current.producer_stats
        ));
    }
    lines
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Succeeded => ExitCode::SUCCESS,
            Outcome::Failed => ExitCode::FAILURE,
        }
    }
}

/// Runs a single action, prints its alerts and, for a successful fetch, the
/// fetched text.
pub async fn run_once<W>(
    panel: &ControlPanel,
    channel: ChannelId,
    action: OperatorAction,
    output: &mut W,
) -> anyhow::Result<Outcome>
where
    W: AsyncWrite + Unpin,
{
    let mut alerts = panel.subscribe_events();
    perform(panel, channel, action).await;

    let mut outcome = Outcome::Succeeded;
    let mut text = String::new();
    while let Ok(event) = alerts.try_recv() {
        let PanelEvent::Alert { level, .. } = &event;
        if *level == AlertLevel::Error {
            outcome = Outcome::Failed;
        }
        text.push_str(&render_alert(&event));
        text.push('\n');
    }

    if outcome == Outcome::Succeeded {
        let display = panel.channel(channel).display();
        match action {
            OperatorAction::FetchMessages => text.push_str(&display.fetched_messages),
            OperatorAction::FetchStats => text.push_str(&display.producer_stats),
            _ => {}
        }
        if matches!(action, OperatorAction::FetchMessages | OperatorAction::FetchStats) {
            text.push('\n');
        }
    }

    output
        .write_all(text.as_bytes())
        .await
        .context("failed to write operator output")?;
    output.flush().await.context("failed to write operator output")?;
    Ok(outcome)
}

/// Interactive session over `input`. Returns `output` once every action read
/// before `quit` or end of input has finished and its alerts are written.
pub async fn run<R, W>(panel: ControlPanel, input: R, output: W) -> anyhow::Result<W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let panel = Arc::new(panel);
    let (out, out_rx) = mpsc::unbounded_channel();
    let writer = tokio::spawn(write_lines(out_rx, output));

    let (shutdown, shutdown_rx) = watch::channel(false);
    let mut printers = JoinSet::new();
    printers.spawn(forward_alerts(
        panel.subscribe_events(),
        shutdown_rx.clone(),
        out.clone(),
    ));
    for channel in ChannelId::ALL {
        printers.spawn(forward_display(
            channel,
            panel.channel(channel).subscribe_display(),
            shutdown_rx.clone(),
            out.clone(),
        ));
    }

    let mut actions = JoinSet::new();
    let session = read_commands(&panel, input, &out, &mut actions).await;

    while let Some(joined) = actions.join_next().await {
        if let Err(err) = joined {
            warn!("operator action did not finish: {err}");
        }
    }
    let _ = shutdown.send(true);
    while let Some(joined) = printers.join_next().await {
        if let Err(err) = joined {
            warn!("output task did not finish: {err}");
        }
    }
    drop(out);

    let output = writer
        .await
        .context("operator output task failed")?
        .context("failed to write operator output")?;
    session.map(|()| output)
}

async fn read_commands<R>(
    panel: &Arc<ControlPanel>,
    input: R,
    out: &mpsc::UnboundedSender<String>,
    actions: &mut JoinSet<()>,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let _ = out.send(HELP.to_string());
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await.context("failed to read operator input")? {
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                let _ = out.send(format!("error: {err}"));
                continue;
            }
        };

        match command {
            ShellCommand::Action { channel, action } => {
                let panel = panel.clone();
                actions.spawn(async move { perform(&panel, channel, action).await });
            }
            ShellCommand::SetInput { channel, text } => {
                panel.channel(channel).set_producer_input(text);
            }
            ShellCommand::Show => {
                for channel in ChannelId::ALL {
                    let _ = out.send(render_display(channel, &panel.channel(channel).display()));
                }
            }
            ShellCommand::Help => {
                let _ = out.send(HELP.to_string());
            }
            ShellCommand::Quit => break,
        }
    }
    Ok(())
}

async fn write_lines<W>(mut lines: mpsc::UnboundedReceiver<String>, mut output: W) -> std::io::Result<W>
where
    W: AsyncWrite + Unpin,
{
    while let Some(line) = lines.recv().await {
        output.write_all(line.as_bytes()).await?;
        output.write_all(b"\n").await?;
        output.flush().await?;
    }
    Ok(output)
}

/// Relays alerts until shutdown, then drains whatever was already published.
async fn forward_alerts(
    mut events: broadcast::Receiver<PanelEvent>,
    mut shutdown: watch::Receiver<bool>,
    out: mpsc::UnboundedSender<String>,
) {
    loop {
        tokio::select! {
            biased;
            received = events.recv() => match received {
                Ok(event) => {
                    let _ = out.send(render_alert(&event));
                }
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "operator alerts dropped"),
                Err(RecvError::Closed) => return,
            },
            _ = shutdown.changed() => break,
        }
    }

    loop {
        match events.try_recv() {
            Ok(event) => {
                let _ = out.send(render_alert(&event));
            }
            Err(TryRecvError::Lagged(skipped)) => warn!(skipped, "operator alerts dropped"),
            Err(_) => return,
        }
    }
}

async fn forward_display(
    channel: ChannelId,
    mut display: watch::Receiver<DisplayState>,
    mut shutdown: watch::Receiver<bool>,
    out: mpsc::UnboundedSender<String>,
) {
    let mut shown = display.borrow_and_update().clone();
    loop {
        let stopping = tokio::select! {
            biased;
            changed = display.changed() => {
                if changed.is_err() {
                    return;
                }
                false
            }
            _ = shutdown.changed() => true,
        };

        if !stopping || display.has_changed().unwrap_or(false) {
            let current = display.borrow_and_update().clone();
            for line in display_updates(channel, &shown, &current) {
                let _ = out.send(line);
            }
            shown = current;
        }
        if stopping {
            return;
        }
    }
}

#[cfg(test)]
#[path = "tests/shell_tests.rs"]
mod tests;
