//! Observable per-channel display state.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

/// What a renderer shows for one channel.
///
/// The `*_ticket` fields name the fetch whose body is currently shown, so a
/// renderer can tell a repeated fetch with an identical body from no fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayState {
    pub fetched_messages: String,
    pub messages_ticket: u64,
    pub producer_stats: String,
    pub stats_ticket: u64,
    pub producer_input: String,
}

impl DisplayState {
    fn slot_mut(&mut self, slot: DisplaySlot) -> (&mut u64, &mut String) {
        match slot {
            DisplaySlot::FetchedMessages => (&mut self.messages_ticket, &mut self.fetched_messages),
            DisplaySlot::ProducerStats => (&mut self.stats_ticket, &mut self.producer_stats),
        }
    }
}

/// Field of [`DisplayState`] written by a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplaySlot {
    FetchedMessages,
    ProducerStats,
}

/// Value cell owned by one channel controller.
///
/// Queries take a monotonically increasing ticket before they are issued and
/// only a ticket newer than the one already shown may overwrite a slot.
/// Tickets start at 1; 0 means "nothing applied yet".
#[derive(Debug)]
pub struct DisplayCell {
    state: watch::Sender<DisplayState>,
    next_ticket: AtomicU64,
}

impl Default for DisplayCell {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayCell {
    pub fn new() -> Self {
        let (state, _) = watch::channel(DisplayState::default());
        Self {
            state,
            next_ticket: AtomicU64::new(1),
        }
    }

    pub fn snapshot(&self) -> DisplayState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.state.subscribe()
    }

    pub fn issue_ticket(&self) -> u64 {
        self.next_ticket.fetch_add(1, Ordering::Relaxed)
    }

    /// Writes `body` into `slot` when `ticket` is newer than the one shown.
    /// Every accepted write notifies subscribers, even if the text is
    /// unchanged. Returns whether the write happened.
    pub fn apply(&self, slot: DisplaySlot, ticket: u64, body: String) -> bool {
        self.state.send_if_modified(|state| {
            let (shown, text) = state.slot_mut(slot);
            if ticket <= *shown {
                return false;
            }
            *shown = ticket;
            *text = body;
            true
        })
    }

    /// Operator keystrokes; only replaces the producer input text.
    pub fn set_producer_input(&self, text: impl Into<String>) {
        let text = text.into();
        self.state.send_if_modified(|state| {
            if state.producer_input == text {
                return false;
            }
            state.producer_input = text;
            true
        });
    }

    pub fn producer_input(&self) -> String {
        self.state.borrow().producer_input.clone()
    }
}

#[cfg(test)]
#[path = "tests/display_tests.rs"]
mod tests;
