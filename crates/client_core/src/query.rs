//! Read-only requests whose bodies land in a channel's display state.

use reqwest::Method;
use shared::protocol::QueryDescriptor;
use tokio::sync::broadcast;
use tracing::{debug, error};

use crate::{
    display::{DisplayCell, DisplaySlot},
    error::DispatchError,
    transport::Dispatcher,
    AlertLevel, PanelEvent,
};

#[derive(Debug, Clone)]
pub struct QueryClient {
    dispatcher: Dispatcher,
    events: broadcast::Sender<PanelEvent>,
}

impl QueryClient {
    pub fn new(dispatcher: Dispatcher, events: broadcast::Sender<PanelEvent>) -> Self {
        Self { dispatcher, events }
    }

    pub async fn fetch_text(&self, endpoint_path: &str) -> Result<String, DispatchError> {
        self.dispatcher
            .round_trip(Method::GET, endpoint_path, None)
            .await
    }

    /// Fetches `query` and installs the body into `slot` of `cell`.
    ///
    /// The ticket is taken before the request goes out, so a response that
    /// resolves after a newer one has been applied is discarded. On failure the
    /// cell is left untouched and the query's fixed notice is raised.
    pub async fn fetch_into(&self, query: &QueryDescriptor, cell: &DisplayCell, slot: DisplaySlot) {
        let endpoint_path = query.endpoint_path();
        let ticket = cell.issue_ticket();
        debug!(endpoint = %endpoint_path, ticket, "fetching");

        match self.fetch_text(&endpoint_path).await {
            Ok(body) => {
                if !cell.apply(slot, ticket, body) {
                    debug!(endpoint = %endpoint_path, ticket, "discarding superseded response");
                }
            }
            Err(err) => {
                error!(endpoint = %endpoint_path, ticket, "{err}");
                let _ = self.events.send(PanelEvent::Alert {
                    level: AlertLevel::Error,
                    text: query.failure_notice(),
                });
            }
        }
    }
}
