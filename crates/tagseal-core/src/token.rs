//! Wire format for a single protected item.
//!
//! Three textual forms share one string slot:
//!
//! - `<plaintext>` with no `:` at all (legacy / placeholder values)
//! - `bogo:<plaintext>` for user-entered values not yet sealed
//! - `<base64 iv>:<base64 ciphertext>` for AES-GCM sealed values
//!
//! Standard base64 never emits `:`, so the first colon is always the
//! delimiter.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{Result, TagsealError};

/// Marker prefix for tagged plaintext values.
pub const TAGGED_PREFIX: &str = "bogo:";

/// AES-GCM IV length used by the field, in bytes.
pub const IV_LENGTH: usize = 16;

/// One item's persisted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Bare plaintext. Never contains `:`.
    Unencrypted(String),

    /// Plaintext explicitly marked as not yet sealed.
    Tagged(String),

    /// AES-GCM output with its IV. The ciphertext includes the tag.
    Encrypted {
        iv: [u8; IV_LENGTH],
        ciphertext: Vec<u8>,
    },
}

impl Token {
    /// Parse a wire value.
    ///
    /// Fails with [`TagsealError::MalformedToken`] when the value has a second
    /// delimiter, bad base64, or an IV of the wrong length. Callers must keep
    /// the raw string in that case.
    pub fn parse(raw: &str) -> Result<Self> {
        if let Some(plaintext) = raw.strip_prefix(TAGGED_PREFIX) {
            return Ok(Token::Tagged(plaintext.to_string()));
        }

        let Some((iv_part, ciphertext_part)) = raw.split_once(':') else {
            return Ok(Token::Unencrypted(raw.to_string()));
        };

        if ciphertext_part.contains(':') {
            return Err(TagsealError::MalformedToken(
                "more than one separator".to_string(),
            ));
        }

        let iv_bytes = STANDARD
            .decode(iv_part)
            .map_err(|e| TagsealError::MalformedToken(format!("invalid IV base64: {}", e)))?;
        let iv: [u8; IV_LENGTH] = iv_bytes.as_slice().try_into().map_err(|_| {
            TagsealError::MalformedToken(format!(
                "IV must be {} bytes (got {})",
                IV_LENGTH,
                iv_bytes.len()
            ))
        })?;
        let ciphertext = STANDARD.decode(ciphertext_part).map_err(|e| {
            TagsealError::MalformedToken(format!("invalid ciphertext base64: {}", e))
        })?;

        Ok(Token::Encrypted { iv, ciphertext })
    }

    /// Render the wire value.
    pub fn serialize(&self) -> String {
        match self {
            Token::Unencrypted(plaintext) => plaintext.clone(),
            Token::Tagged(plaintext) => format!("{}{}", TAGGED_PREFIX, plaintext),
            Token::Encrypted { iv, ciphertext } => {
                format!("{}:{}", STANDARD.encode(iv), STANDARD.encode(ciphertext))
            }
        }
    }

    /// The plaintext carried directly by the token, if it is not sealed.
    pub fn plaintext(&self) -> Option<&str> {
        match self {
            Token::Unencrypted(plaintext) | Token::Tagged(plaintext) => Some(plaintext),
            Token::Encrypted { .. } => None,
        }
    }

    pub fn is_encrypted(&self) -> bool {
        matches!(self, Token::Encrypted { .. })
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl FromStr for Token {
    type Err = TagsealError;

    fn from_str(s: &str) -> Result<Self> {
        Token::parse(s)
    }
}
