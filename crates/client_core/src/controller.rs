//! Per-channel operator actions and the two-channel control panel.

use shared::{
    domain::ChannelId,
    protocol::{CommandDescriptor, QueryDescriptor},
};
use tokio::sync::{broadcast, watch};

use crate::{
    command::CommandClient,
    display::{DisplayCell, DisplaySlot, DisplayState},
    error::BaseUrlError,
    query::QueryClient,
    transport::Dispatcher,
    PanelEvent,
};

const EVENT_CAPACITY: usize = 64;

/// Binds one channel's fixed paths to the operator actions and owns that
/// channel's display state. Consumer lifecycle is never tracked here; start
/// and stop are relayed unconditionally.
#[derive(Debug)]
pub struct ChannelController {
    channel: ChannelId,
    commands: CommandClient,
    queries: QueryClient,
    display: DisplayCell,
}

impl ChannelController {
    pub fn new(channel: ChannelId, commands: CommandClient, queries: QueryClient) -> Self {
        Self {
            channel,
            commands,
            queries,
            display: DisplayCell::new(),
        }
    }

    pub fn channel(&self) -> ChannelId {
        self.channel
    }

    pub async fn start_consumer(&self) {
        self.commands
            .dispatch(&CommandDescriptor::start_consumer(self.channel))
            .await;
    }

    pub async fn stop_consumer(&self) {
        self.commands
            .dispatch(&CommandDescriptor::stop_consumer(self.channel))
            .await;
    }

    pub async fn fetch_consumer_messages(&self) {
        self.queries
            .fetch_into(
                &QueryDescriptor::consumer_messages(self.channel),
                &self.display,
                DisplaySlot::FetchedMessages,
            )
            .await;
    }

    pub async fn fetch_producer_stats(&self) {
        self.queries
            .fetch_into(
                &QueryDescriptor::producer_stats(self.channel),
                &self.display,
                DisplaySlot::ProducerStats,
            )
            .await;
    }

    /// Sends the current producer input. The input is read at call time and
    /// kept afterwards; an empty input is sent as `msg=`.
    pub async fn send_producer_message(&self) {
        let text = self.display.producer_input();
        self.commands
            .dispatch(&CommandDescriptor::send_to_producer(self.channel, text))
            .await;
    }

    pub fn set_producer_input(&self, text: impl Into<String>) {
        self.display.set_producer_input(text);
    }

    pub fn display(&self) -> DisplayState {
        self.display.snapshot()
    }

    pub fn subscribe_display(&self) -> watch::Receiver<DisplayState> {
        self.display.subscribe()
    }
}

/// Both channels against one dispatcher, sharing one alert stream.
#[derive(Debug)]
pub struct ControlPanel {
    tomcat: ChannelController,
    jetty: ChannelController,
    events: broadcast::Sender<PanelEvent>,
}

impl ControlPanel {
    pub fn new(base_url: &str) -> Result<Self, BaseUrlError> {
        Ok(Self::with_dispatcher(Dispatcher::new(base_url)?))
    }

    pub fn with_dispatcher(dispatcher: Dispatcher) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let controller = |channel| {
            ChannelController::new(
                channel,
                CommandClient::new(dispatcher.clone(), events.clone()),
                QueryClient::new(dispatcher.clone(), events.clone()),
            )
        };
        Self {
            tomcat: controller(ChannelId::Tomcat),
            jetty: controller(ChannelId::Jetty),
            events,
        }
    }

    pub fn channel(&self, channel: ChannelId) -> &ChannelController {
        match channel {
            ChannelId::Tomcat => &self.tomcat,
            ChannelId::Jetty => &self.jetty,
        }
    }

    pub fn tomcat(&self) -> &ChannelController {
        &self.tomcat
    }

    pub fn jetty(&self) -> &ChannelController {
        &self.jetty
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<PanelEvent> {
        self.events.subscribe()
    }
}
