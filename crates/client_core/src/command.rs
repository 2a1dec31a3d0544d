//! Fire-and-forget state-changing requests (start, stop, send).

use reqwest::Method;
use shared::protocol::CommandDescriptor;
use tokio::sync::broadcast;
use tracing::{debug, error, info};

use crate::{transport::Dispatcher, AlertLevel, PanelEvent};

#[derive(Debug, Clone)]
pub struct CommandClient {
    dispatcher: Dispatcher,
    events: broadcast::Sender<PanelEvent>,
}

impl CommandClient {
    pub fn new(dispatcher: Dispatcher, events: broadcast::Sender<PanelEvent>) -> Self {
        Self { dispatcher, events }
    }

    pub async fn dispatch(&self, command: &CommandDescriptor) {
        debug!(
            channel = %command.channel(),
            role = %command.role(),
            action = command.action().as_str(),
            payload_len = command.payload().map(str::len),
            "building command"
        );
        let params = command.query_params();
        self.execute(&command.endpoint_path(), params.as_deref())
            .await;
    }

    /// POSTs to `endpoint_path` and reports the outcome as an alert.
    ///
    /// A success body is relayed verbatim. Rejections and transport errors
    /// become a single error alert; nothing is retried or returned.
    pub async fn execute(&self, endpoint_path: &str, params: Option<&str>) {
        debug!(endpoint = endpoint_path, has_params = params.is_some(), "dispatching command");
        let alert = match self
            .dispatcher
            .round_trip(Method::POST, endpoint_path, params)
            .await
        {
            Ok(body) => {
                info!(endpoint = endpoint_path, "command accepted");
                PanelEvent::Alert {
                    level: AlertLevel::Info,
                    text: body,
                }
            }
            Err(err) => {
                error!(endpoint = endpoint_path, status = ?err.status(), "{err}");
                PanelEvent::Alert {
                    level: AlertLevel::Error,
                    text: err.to_string(),
                }
            }
        };
        // No subscriber just means nobody is watching; the request already happened.
        let _ = self.events.send(alert);
    }
}
