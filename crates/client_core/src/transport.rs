//! HTTP plumbing shared by the command and query clients.

use std::sync::Arc;

use reqwest::{Client, Method, Response};
use tracing::warn;
use url::Url;

use crate::error::{BaseUrlError, DispatchError};

/// Fixed dispatcher location plus the HTTP client used for every request.
///
/// Cloning is cheap; all clones share one connection pool and one base.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    http: Client,
    base_url: Arc<str>,
}

impl Dispatcher {
    pub fn new(base_url: &str) -> Result<Self, BaseUrlError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, BaseUrlError> {
        let base_url = normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn url_for(&self, endpoint_path: &str, params: Option<&str>) -> String {
        match params {
            Some(params) => format!("{}{endpoint_path}?{params}", self.base_url),
            None => format!("{}{endpoint_path}", self.base_url),
        }
    }

    /// Issues one request and returns the body of a success response.
    ///
    /// Non-success statuses still have their body read so it can be shown
    /// to the operator.
    pub(crate) async fn round_trip(
        &self,
        method: Method,
        endpoint_path: &str,
        params: Option<&str>,
    ) -> Result<String, DispatchError> {
        let url = self.url_for(endpoint_path, params);
        let transport = |source| DispatchError::Transport {
            method: method.clone(),
            path: endpoint_path.to_string(),
            source,
        };

        let response: Response = self
            .http
            .request(method.clone(), &url)
            .send()
            .await
            .map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            // The status alone still identifies the rejection.
            let body = match response.text().await {
                Ok(body) => body,
                Err(err) => {
                    warn!(path = endpoint_path, %status, "failed to read rejection body: {err}");
                    String::new()
                }
            };
            return Err(DispatchError::Rejected {
                method,
                path: endpoint_path.to_string(),
                status,
                body,
            });
        }
        response.text().await.map_err(transport)
    }
}

/// Validates the configured base and drops trailing slashes so that
/// `base + "/dispatcher/..."` never produces `//`.
pub fn normalize_base_url(raw: &str) -> Result<String, BaseUrlError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|source| BaseUrlError::Parse {
        url: raw.to_string(),
        source,
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(BaseUrlError::UnsupportedScheme(raw.to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
