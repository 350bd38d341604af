//! Credential handling for the fixed authentication fields
//!
//! Authentication values are sent as plain form fields on every request, so
//! they are kept inside `secrecy` containers until the form is built. Memory
//! is zeroed on drop and `Debug` output is redacted.
//!
//! # Example
//!
//! ```rust
//! use svcreg::config::{secret_string, AuthField};
//! use secrecy::ExposeSecret;
//!
//! let field = AuthField::new("password", secret_string("hunter2".to_string()));
//! assert_eq!(field.value.expose_secret().as_ref(), "hunter2");
//! assert!(!format!("{field:?}").contains("hunter2"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, ExposeSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// Newtype wrapper for String that implements the required traits for Secret
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Secret string that zeroes on drop and never prints its value
pub type SecretString = Secret<SecretValue>;

/// Wraps a plain string into a [`SecretString`]
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

/// One fixed authentication field sent with every request
///
/// Declared as an array of tables so the form keeps the configured order:
///
/// ```toml
/// [[api.auth]]
/// name = "user_name"
/// value = "${SVCREG_API_USER}"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthField {
    /// Form field name
    pub name: String,

    /// Form field value
    pub value: SecretString,
}

impl AuthField {
    pub fn new(name: impl Into<String>, value: SecretString) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Returns the field as a form pair, exposing the secret value
    pub fn form_pair(&self) -> (String, String) {
        (
            self.name.clone(),
            self.value.expose_secret().as_ref().to_string(),
        )
    }
}
