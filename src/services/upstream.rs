use log::{error, info, warn};
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Upstream request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("Upstream returned an unreadable body: {0}")]
    Decode(String),
}

/// Client for the backend API every proxy route forwards to.
#[derive(Clone)]
pub struct UpstreamClient {
    http: Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get_json(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Value, UpstreamError> {
        let url = self.url(path);
        info!("Forwarding GET {}", url);
        let response = self.http.get(&url).query(query).send().await.map_err(|e| {
            error!("GET {} failed: {:?}", url, e);
            UpstreamError::Request(e)
        })?;
        relay(&url, response).await
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> Result<Value, UpstreamError> {
        let url = self.url(path);
        info!("Forwarding POST {}", url);
        let response = self.http.post(&url).json(body).send().await.map_err(|e| {
            error!("POST {} failed: {:?}", url, e);
            UpstreamError::Request(e)
        })?;
        relay(&url, response).await
    }
}

async fn relay(url: &str, response: Response) -> Result<Value, UpstreamError> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        warn!("Upstream {} answered {}", url, status);
        let message = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| format!("Upstream request failed with status {}", status.as_u16()));
        return Err(UpstreamError::Status {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&text).map_err(|e| {
        error!("Upstream {} returned non-JSON body: {}", url, e);
        UpstreamError::Decode(e.to_string())
    })
}
