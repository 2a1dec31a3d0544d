//! Request descriptors for the dispatcher's HTTP surface.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::domain::{ChannelId, CommandAction, QueryKind, Role};

/// Bytes left untouched when encoding a single query component; everything
/// else, including space, `&`, `=` and `+`, is escaped.
const COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_uri_component(raw: &str) -> String {
    utf8_percent_encode(raw, COMPONENT_ENCODE_SET).to_string()
}

/// A state-changing request against one role of one channel.
///
/// Only the three shapes the dispatcher accepts can be built, so a descriptor
/// never pairs `send` with a consumer or `start` with a producer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    channel: ChannelId,
    role: Role,
    action: CommandAction,
    payload: Option<String>,
}

impl CommandDescriptor {
    pub fn start_consumer(channel: ChannelId) -> Self {
        Self {
            channel,
            role: Role::Consumer,
            action: CommandAction::Start,
            payload: None,
        }
    }

    pub fn stop_consumer(channel: ChannelId) -> Self {
        Self {
            channel,
            role: Role::Consumer,
            action: CommandAction::Stop,
            payload: None,
        }
    }

    pub fn send_to_producer(channel: ChannelId, text: impl Into<String>) -> Self {
        Self {
            channel,
            role: Role::Producer,
            action: CommandAction::Send,
            payload: Some(text.into()),
        }
    }

    pub fn channel(&self) -> ChannelId {
        self.channel
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn action(&self) -> CommandAction {
        self.action
    }

    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    pub fn endpoint_path(&self) -> String {
        format!(
            "{}/{}",
            self.channel.base_path(self.role),
            self.action.as_str()
        )
    }

    /// Pre-encoded query string; an empty payload still yields `msg=`.
    pub fn query_params(&self) -> Option<String> {
        self.payload
            .as_deref()
            .map(|text| format!("msg={}", encode_uri_component(text)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryDescriptor {
    pub channel: ChannelId,
    pub kind: QueryKind,
}

impl QueryDescriptor {
    pub fn consumer_messages(channel: ChannelId) -> Self {
        Self {
            channel,
            kind: QueryKind::ConsumerMessages,
        }
    }

    pub fn producer_stats(channel: ChannelId) -> Self {
        Self {
            channel,
            kind: QueryKind::ProducerStats,
        }
    }

    pub fn endpoint_path(&self) -> String {
        format!(
            "{}/{}",
            self.channel.base_path(self.kind.role()),
            self.kind.resource()
        )
    }

    /// Fixed operator notice for a failed query; never includes the response body.
    pub fn failure_notice(&self) -> String {
        match self.kind {
            QueryKind::ConsumerMessages => {
                format!("Failed to fetch {} consumer messages.", self.channel.slug())
            }
            QueryKind::ProducerStats => {
                format!("Failed to fetch {} producer stats.", self.channel.slug())
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
