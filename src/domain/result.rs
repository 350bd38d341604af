//! Result type alias for svcreg

use super::errors::SvcregError;

/// Result type alias for svcreg operations
///
/// # Examples
///
/// ```
/// use svcreg::domain::result::Result;
/// use svcreg::domain::errors::SvcregError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(SvcregError::Source("unreadable export".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, SvcregError>;
