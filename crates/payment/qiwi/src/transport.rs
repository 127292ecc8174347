use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use thiserror::Error;

use crate::request::{Method, RequestDescriptor};

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP error {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Transport error: {0}")]
    Other(String),
}

/// Issues a request and hands back the raw response body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: RequestDescriptor) -> Result<String, TransportError>;
}

#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
    base_url: Option<String>,
}

impl ReqwestTransport {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: None,
        }
    }

    /// Sends every request to `base_url` instead of `https://{host}`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_owned());
        self
    }

    fn url(&self, request: &RequestDescriptor) -> String {
        match &self.base_url {
            Some(base_url) => format!("{}{}", base_url, request.path),
            None => format!("https://{}{}", request.host, request.path),
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: RequestDescriptor) -> Result<String, TransportError> {
        let url = self.url(&request);
        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Put => self.client.put(&url),
            Method::Patch => self.client.patch(&url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if request.method != Method::Get {
            builder = builder.body(request.body);
        }

        debug!("Sending {} {}", request.method, url);
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("Received {} from {}", status, url);

        if status.is_success() {
            Ok(body)
        } else {
            Err(TransportError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}
