use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("unknown channel '{0}'; expected tomcat or jetty")]
    UnknownChannel(String),
}
