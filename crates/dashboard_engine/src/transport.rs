use std::time::Duration;

use dashboard_logging::{dash_debug, dash_trace};
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use url::Url;

use crate::{ApiCall, EngineError, FailureKind, HttpMethod, TransportError};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Scheme, host and port of the backend, e.g. `http://localhost:8000`.
    pub base_url: String,
    /// Versioned prefix prepended to every call path.
    pub api_prefix: String,
    pub connect_timeout: Duration,
    /// Whole-request deadline. `None` leaves requests unbounded.
    pub request_timeout: Option<Duration>,
    pub max_body_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            api_prefix: "/api/v1".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            max_body_bytes: 5 * 1024 * 1024,
        }
    }
}

impl ClientSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Full URL for `call`, query included.
    pub fn url_for(&self, call: &ApiCall) -> Result<Url, TransportError> {
        let prefix = self.api_prefix.trim_end_matches('/');
        let raw = format!(
            "{}{}{}",
            self.base_url.trim_end_matches('/'),
            prefix,
            call.path
        );
        let mut url =
            Url::parse(&raw).map_err(|err| TransportError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if !call.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(call.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(url)
    }
}

#[async_trait::async_trait]
pub trait ApiTransport: Send + Sync {
    /// Performs `call` and returns the parsed JSON body of a 2xx response.
    async fn call(&self, call: &ApiCall) -> Result<Value, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(settings: ClientSettings) -> Result<Self, EngineError> {
        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| EngineError::Client(err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, TransportError> {
        let max_bytes = self.settings.max_body_bytes;
        if let Some(len) = response.content_length() {
            if len > max_bytes {
                return Err(too_large(max_bytes, len));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl ApiTransport for ReqwestTransport {
    async fn call(&self, call: &ApiCall) -> Result<Value, TransportError> {
        let url = self.settings.url_for(call)?;
        dash_debug!("{:?} {}", call.method, url);

        let request = match call.method {
            HttpMethod::Get => self.client.get(url),
            // The check endpoint takes no body but expects a JSON content type.
            HttpMethod::Post => self.client.post(url).header(CONTENT_TYPE, "application/json"),
        };
        let response = request
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::http_status(status.as_u16()));
        }

        let body = self.read_body(response).await?;
        dash_trace!("{} -> {} bytes", call.path, body.len());
        serde_json::from_slice(&body)
            .map_err(|err| TransportError::new(FailureKind::Decode, format!("malformed JSON: {err}")))
    }
}

fn too_large(max_bytes: u64, actual: u64) -> TransportError {
    TransportError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(FailureKind::Timeout, err.to_string());
    }
    TransportError::new(FailureKind::Network, err.to_string())
}
