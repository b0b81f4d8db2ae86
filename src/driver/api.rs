//! Remote account service client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use super::model::Driver;
use crate::error::DriverApiError;

/// Fetches the driver record that belongs to an auth token.
#[async_trait]
pub trait DriverApi: Send + Sync {
    /// Fetch the driver for `token`.
    ///
    /// `Ok(None)` means the service answered but has no driver for the token.
    async fn fetch_driver(&self, token: &SecretString) -> Result<Option<Driver>, DriverApiError>;
}

/// `DriverApi` backed by the account service's HTTP API.
pub struct HttpDriverApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDriverApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DriverApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn driver_url(&self) -> String {
        format!("{}/drivers/me", self.base_url)
    }
}

#[async_trait]
impl DriverApi for HttpDriverApi {
    async fn fetch_driver(&self, token: &SecretString) -> Result<Option<Driver>, DriverApiError> {
        let response = self
            .client
            .get(self.driver_url())
            .bearer_auth(token.expose_secret())
            .send()
            .await?;

        let status = response.status();
        debug!(status = %status, "Driver service responded");

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(DriverApiError::Unauthorized);
        }
        if !status.is_success() {
            return Err(DriverApiError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        if body.trim().is_empty() || body.trim() == "null" {
            return Ok(None);
        }
        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| DriverApiError::InvalidResponse {
                reason: e.to_string(),
            })
    }
}
