use crate::app_config::AppConfig;
use crate::hub::HubCommand;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::fmt::Debug;
use std::sync::Arc;
use thiserror::Error;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, info, instrument, warn};

#[async_trait]
pub trait HubTransport: Debug + Send + Sync {
    async fn send(&self, command: &HubCommand) -> Result<(), HubError>;
}

/// Sends commands to a Domoticz hub over its `json.htm` API.
#[derive(Debug)]
pub struct DomoticzTransport {
    client: Client,
    config: Arc<AppConfig>,
}

impl DomoticzTransport {
    pub fn new(client: Client, config: Arc<AppConfig>) -> Self {
        DomoticzTransport { client, config }
    }

    async fn send_once(&self, url: &str) -> Result<(), HubError> {
        let hub = self.config.hub();
        let response = self
            .client
            .get(url)
            .basic_auth(hub.username(), Some(hub.password()))
            .send()
            .await
            .map_err(HubError::from_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await;
            warn!(status_code = %status, "⚠️ Request to the hub failed. Response: {:?}", body);
            return Err(HubError::Status { status });
        }

        let body = response.json::<HubResponse>().await.map_err(HubError::InvalidResponse)?;
        if body.status != "OK" {
            return Err(HubError::Rejected {
                message: body.message.unwrap_or(body.status),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl HubTransport for DomoticzTransport {
    #[instrument(skip_all, fields(idx = command.idx()))]
    async fn send(&self, command: &HubCommand) -> Result<(), HubError> {
        let hub = self.config.hub();
        let url = command.url(hub.url());
        debug!("📡 Sending {}...", command);

        let result = if command.is_idempotent() {
            let strategy = ExponentialBackoff::from_millis(2)
                .factor(hub.retry_delay().as_millis() as u64)
                .max_delay(hub.retry_max_delay())
                .map(jitter)
                .take(hub.retry_attempts());

            let url = url.as_str();
            RetryIf::start(
                strategy,
                || async move {
                    self.send_once(url).await.inspect_err(|e| {
                        if e.is_transient() {
                            warn!("⚠️ Transient hub error: {}", e);
                        }
                    })
                },
                |e: &HubError| e.is_transient(),
            )
            .await
        } else {
            self.send_once(&url).await
        };

        match &result {
            Ok(()) => info!("📡 Sending {}... OK", command),
            Err(e) => warn!("📡 Sending {}... failed, {}", command, e),
        }
        result
    }
}

#[derive(Debug, Deserialize)]
struct HubResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Error, Debug)]
pub enum HubError {
    #[error("hub request timed out")]
    Timeout(#[source] reqwest::Error),
    #[error("hub is unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),
    #[error("hub responded with status {status}")]
    Status { status: StatusCode },
    #[error("hub rejected the command: {message}")]
    Rejected { message: String },
    #[error("unexpected hub response: {0}")]
    InvalidResponse(#[source] reqwest::Error),
}

impl HubError {
    fn from_request_error(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            HubError::Timeout(error)
        } else {
            HubError::Unreachable(error)
        }
    }

    /// Whether repeating the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            HubError::Timeout(_) | HubError::Unreachable(_) => true,
            HubError::Status { status } => status.is_server_error(),
            HubError::Rejected { .. } | HubError::InvalidResponse(_) => false,
        }
    }
}
