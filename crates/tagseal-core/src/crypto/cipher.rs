//! Per-item AES-256-GCM sealing.
//!
//! Each item is sealed independently under the derived key with a fresh
//! 16-byte random IV. The resulting token carries the IV and the sealed
//! output (ciphertext followed by the 16-byte authentication tag), which is
//! the same layout WebCrypto produces for `AES-GCM` with a 128-bit IV.

use aes_gcm::aead::consts::U16;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::aes::Aes256;
use aes_gcm::{AesGcm, Key, Nonce};
use async_trait::async_trait;

use super::key::DerivedKey;
use crate::error::{Result, TagsealError};
use crate::token::{Token, IV_LENGTH};

/// AES-256-GCM with a 128-bit nonce.
type Aes256Gcm16 = AesGcm<Aes256, U16>;

/// Encrypts and decrypts single items under a derived key.
///
/// Both operations are suspension points for the session, so the capability
/// is asynchronous even when the implementation is not.
#[async_trait]
pub trait ItemCipher: Send + Sync {
    /// Seal `plaintext` under `key`, producing a [`Token::Encrypted`].
    ///
    /// Fails with [`TagsealError::Encryption`] only when the platform fails.
    async fn encrypt(&self, key: &DerivedKey, plaintext: &str) -> Result<Token>;

    /// Open an encrypted token.
    ///
    /// Fails with [`TagsealError::Decryption`] when the tag does not verify;
    /// that is the normal outcome for a wrong password.
    async fn decrypt(&self, key: &DerivedKey, token: &Token) -> Result<String>;
}

/// The production cipher.
#[derive(Debug, Clone, Copy, Default)]
pub struct AesGcmCipher;

impl AesGcmCipher {
    pub fn new() -> Self {
        Self
    }

    /// Seal with a caller-provided IV.
    ///
    /// The IV must never repeat under the same key.
    pub(crate) fn seal_with_iv(
        key: &DerivedKey,
        iv: [u8; IV_LENGTH],
        plaintext: &str,
    ) -> Result<Token> {
        let cipher = Aes256Gcm16::new(Key::<Aes256Gcm16>::from_slice(key.as_bytes()));
        let ciphertext = cipher
            .encrypt(Nonce::<U16>::from_slice(&iv), plaintext.as_bytes())
            .map_err(|e| TagsealError::Encryption(format!("AES-GCM seal failed: {}", e)))?;

        Ok(Token::Encrypted { iv, ciphertext })
    }
}

#[async_trait]
impl ItemCipher for AesGcmCipher {
    async fn encrypt(&self, key: &DerivedKey, plaintext: &str) -> Result<Token> {
        let mut iv = [0u8; IV_LENGTH];
        getrandom::getrandom(&mut iv)
            .map_err(|e| TagsealError::Encryption(format!("Failed to generate IV: {}", e)))?;

        Self::seal_with_iv(key, iv, plaintext)
    }

    async fn decrypt(&self, key: &DerivedKey, token: &Token) -> Result<String> {
        let Token::Encrypted { iv, ciphertext } = token else {
            return Err(TagsealError::InvalidInput(
                "only encrypted tokens can be decrypted".to_string(),
            ));
        };

        let cipher = Aes256Gcm16::new(Key::<Aes256Gcm16>::from_slice(key.as_bytes()));
        let plaintext = cipher
            .decrypt(Nonce::<U16>::from_slice(iv), ciphertext.as_slice())
            .map_err(|_| TagsealError::Decryption)?;

        // Lossy, like the browser's default TextDecoder.
        Ok(String::from_utf8_lossy(&plaintext).into_owned())
    }
}
