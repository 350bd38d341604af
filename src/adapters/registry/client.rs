//! HTTP client for the registration API
//!
//! Posts one batch as `application/x-www-form-urlencoded` and retries only on
//! transport errors. Whatever body comes back, whatever the status, is handed
//! to the reconciler untouched.

use super::form::build_form;
use super::{RawResponse, ServiceRegistry};
use crate::config::{ApiConfig, AuthField, RetryConfig};
use crate::core::partition::Batch;
use crate::domain::{Result, SvcregError, TransportFailure};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Registration API client backed by `reqwest`
///
/// # Example
///
/// ```no_run
/// use svcreg::adapters::registry::HttpRegistryClient;
/// use svcreg::config::load_config;
///
/// # fn example() -> svcreg::domain::Result<()> {
/// let config = load_config("svcreg.toml")?;
/// let client = HttpRegistryClient::new(&config.api)?;
/// # Ok(())
/// # }
/// ```
pub struct HttpRegistryClient {
    url: String,
    client: Client,
    auth: Vec<AuthField>,
    retry: RetryConfig,
}

impl HttpRegistryClient {
    /// Creates a client from the API configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| SvcregError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            url: config.url.clone(),
            client,
            auth: config.auth.clone(),
            retry: config.retry.clone(),
        })
    }

    async fn send_once(
        &self,
        form: &[(String, String)],
    ) -> std::result::Result<RawResponse, reqwest::Error> {
        let response = self.client.post(&self.url).form(form).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}

#[async_trait]
impl ServiceRegistry for HttpRegistryClient {
    async fn submit(&self, batch: &Batch) -> std::result::Result<RawResponse, TransportFailure> {
        let form = build_form(&self.auth, batch);
        let max_attempts = self.retry.max_retries + 1;
        let delay = Duration::from_millis(self.retry.retry_delay_ms);
        let mut attempt = 0;

        loop {
            attempt += 1;
            match self.send_once(&form).await {
                Ok(response) => {
                    if !(200..300).contains(&response.status) {
                        tracing::warn!(
                            status = response.status,
                            first_row = ?batch.first_row_id(),
                            "Registration API answered with a non-success status"
                        );
                    }
                    return Ok(response);
                }
                Err(e) => {
                    let detail = error_chain(&e);
                    if attempt >= max_attempts {
                        tracing::error!(
                            attempts = attempt,
                            first_row = ?batch.first_row_id(),
                            error = %detail,
                            "Giving up on batch"
                        );
                        return Err(TransportFailure::new(attempt, detail));
                    }
                    crate::log_retry_attempt!(attempt, max_attempts, detail.as_str());
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}

/// Renders an error together with its sources
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut detail = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        detail.push_str(": ");
        detail.push_str(&cause.to_string());
        source = cause.source();
    }
    detail
}
