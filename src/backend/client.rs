//! HTTP client for the backend
//!
//! Rows are written through the REST endpoint (`/rest/v1/{table}`) and
//! remote functions are called through `/functions/v1/{name}`. Every request
//! carries the API key both as `apikey` header and as bearer token.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use std::time::Duration;

use super::{BackendClientTrait, BackendError};
use crate::config::{AppConfig, ENV_API_KEY, ENV_BACKEND_URL};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);

pub struct BackendClient {
    client: Client,
    base_url: Option<String>,
    api_key: Option<String>,
}

impl BackendClient {
    pub fn new(config: &AppConfig) -> Result<Self, BackendError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: config
                .backend_url
                .as_deref()
                .map(|url| url.trim_end_matches('/').to_string()),
            api_key: config.api_key.clone(),
        })
    }

    fn url(&self, path: &str) -> Result<String, BackendError> {
        let base = self
            .base_url
            .as_deref()
            .ok_or(BackendError::NotConfigured(ENV_BACKEND_URL))?;
        Ok(format!("{base}/{path}"))
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, BackendError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(BackendError::NotConfigured(ENV_API_KEY))?;
        Ok(request
            .header("apikey", key)
            .header("Authorization", format!("Bearer {key}")))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, BackendError> {
        let response = self.authorized(request)?.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

/// Best-effort human readable message from an error body
fn error_message(status: StatusCode, body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let field = parsed.as_ref().and_then(|v| {
        ["message", "error_description", "error", "msg"]
            .iter()
            .find_map(|key| v.get(*key).and_then(Value::as_str))
    });
    match field {
        Some(message) => message.to_string(),
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    }
}

/// The row API answers with an array of affected rows
fn first_row(response: Value) -> Result<Value, BackendError> {
    match response {
        Value::Array(rows) => rows.into_iter().next().ok_or(BackendError::Api {
            status: StatusCode::NOT_FOUND.as_u16(),
            message: "no row was returned".to_string(),
        }),
        other => Ok(other),
    }
}

#[async_trait]
impl BackendClientTrait for BackendClient {
    async fn check_connection(&self) -> bool {
        let request = match self.url("rest/v1/") {
            Ok(url) => self.client.get(url).timeout(CONNECTION_TIMEOUT),
            Err(_) => return false,
        };
        match self.send(request).await {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!("Backend not reachable: {}", e);
                false
            }
        }
    }

    async fn insert_row(&self, table: &str, row: Value) -> Result<Value, BackendError> {
        let request = self
            .client
            .post(self.url(&format!("rest/v1/{table}"))?)
            .header("Prefer", "return=representation")
            .json(&row);
        tracing::debug!(table, "inserting row");
        first_row(self.send(request).await?)
    }

    async fn update_row(&self, table: &str, id: &str, patch: Value) -> Result<Value, BackendError> {
        let request = self
            .client
            .patch(self.url(&format!("rest/v1/{table}"))?)
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(&patch);
        tracing::debug!(table, id, "updating row");
        first_row(self.send(request).await?)
    }

    async fn invoke_function(&self, name: &str, body: Value) -> Result<Value, BackendError> {
        let request = self
            .client
            .post(self.url(&format!("functions/v1/{name}"))?)
            .json(&body);
        tracing::debug!(function = name, "invoking remote function");
        self.send(request).await
    }
}
