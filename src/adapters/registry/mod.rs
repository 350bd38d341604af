//! Service-registration API adapter
//!
//! [`ServiceRegistry`] is the seam between the upload pipeline and the
//! network. [`HttpRegistryClient`] is the production implementation.

pub mod client;
pub mod form;

use crate::core::partition::Batch;
use crate::domain::TransportFailure;
use async_trait::async_trait;

pub use client::HttpRegistryClient;
pub use form::{build_form, count_field_name, TYPE_CREDIT};

/// Body and status of a delivered request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Something that can take a batch and answer with a raw response
#[async_trait]
pub trait ServiceRegistry: Send + Sync {
    /// Submits one batch, retrying transport errors
    ///
    /// # Errors
    ///
    /// Returns [`TransportFailure`] once every attempt failed to get a response
    async fn submit(&self, batch: &Batch) -> Result<RawResponse, TransportFailure>;

    /// Endpoint the registry posts to
    fn endpoint(&self) -> &str;
}
