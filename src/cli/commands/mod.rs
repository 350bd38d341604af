//! CLI command implementations

pub mod init;
pub mod upload;
pub mod validate;
