//! Inputs supplied by the surrounding page for one protected field.

use secrecy::{ExposeSecret, SecretString};

use crate::error::{Result, TagsealError};

/// Default password and salt of a protected field.
#[derive(Debug, Clone)]
pub struct ProtectionConfig {
    default_password: SecretString,
    salt: String,
}

impl ProtectionConfig {
    /// Build a config. The salt must be non-empty; the default password may be
    /// empty ("no protection").
    pub fn new(default_password: impl Into<String>, salt: impl Into<String>) -> Result<Self> {
        let salt = salt.into();
        if salt.is_empty() {
            return Err(TagsealError::Config("salt cannot be empty".to_string()));
        }
        Ok(Self {
            default_password: SecretString::from(default_password.into()),
            salt,
        })
    }

    pub fn default_password(&self) -> &SecretString {
        &self.default_password
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// The password a field value stands for: the entered text, or the
    /// default when the field is empty.
    pub fn resolve_password(&self, entered: &str) -> SecretString {
        if entered.is_empty() {
            self.default_password.clone()
        } else {
            SecretString::from(entered.to_string())
        }
    }
}
