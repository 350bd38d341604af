//! External integrations
//!
//! - [`source`] - CSV export reader
//! - [`registry`] - service-registration API client

pub mod registry;
pub mod source;
