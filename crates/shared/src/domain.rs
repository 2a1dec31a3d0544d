use std::{fmt, str::FromStr};

use crate::error::DomainError;

/// One of the two fixed message pipelines managed through the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelId {
    Tomcat,
    Jetty,
}

impl ChannelId {
    pub const ALL: [ChannelId; 2] = [ChannelId::Tomcat, ChannelId::Jetty];

    /// Lowercase slug used in dispatcher paths and operator notices.
    pub fn slug(self) -> &'static str {
        match self {
            ChannelId::Tomcat => "tomcat",
            ChannelId::Jetty => "jetty",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChannelId::Tomcat => "Tomcat",
            ChannelId::Jetty => "Jetty",
        }
    }

    /// Fixed base path for one role of this channel, e.g. `/dispatcher/jetty-producer`.
    pub fn base_path(self, role: Role) -> &'static str {
        match (self, role) {
            (ChannelId::Tomcat, Role::Consumer) => "/dispatcher/tomcat-consumer",
            (ChannelId::Tomcat, Role::Producer) => "/dispatcher/tomcat-producer",
            (ChannelId::Jetty, Role::Consumer) => "/dispatcher/jetty-consumer",
            (ChannelId::Jetty, Role::Producer) => "/dispatcher/jetty-producer",
        }
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ChannelId {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("tomcat") {
            Ok(ChannelId::Tomcat)
        } else if raw.eq_ignore_ascii_case("jetty") {
            Ok(ChannelId::Jetty)
        } else {
            Err(DomainError::UnknownChannel(raw.to_string()))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Consumer,
    Producer,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Consumer => "consumer",
            Role::Producer => "producer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandAction {
    Start,
    Stop,
    Send,
}

impl CommandAction {
    pub fn as_str(self) -> &'static str {
        match self {
            CommandAction::Start => "start",
            CommandAction::Stop => "stop",
            CommandAction::Send => "send",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    ConsumerMessages,
    ProducerStats,
}

impl QueryKind {
    pub fn role(self) -> Role {
        match self {
            QueryKind::ConsumerMessages => Role::Consumer,
            QueryKind::ProducerStats => Role::Producer,
        }
    }

    pub fn resource(self) -> &'static str {
        match self {
            QueryKind::ConsumerMessages => "messages",
            QueryKind::ProducerStats => "stats",
        }
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
