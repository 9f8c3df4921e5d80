//! Key derivation using PBKDF2-HMAC-SHA512.
//!
//! Keys are stretched from the master password and the per-field salt with a
//! fixed parameter set, so that browser-side and native implementations of the
//! same field agree on the key bit-for-bit.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;
use zeroize::ZeroizeOnDrop;

/// PBKDF2 iteration count shared with every other implementation of the field.
pub const PBKDF2_ITERATIONS: u32 = 120_000;

/// Length of derived key in bytes (32 bytes = 256 bits for AES-256-GCM).
pub const KEY_LENGTH: usize = 32;

/// A symmetric key derived from a (password, salt) pair.
///
/// Key material is zeroized from memory when dropped and is never persisted.
/// Keep instances only for the duration of a single operation.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    /// The raw key bytes (zeroized on drop)
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    /// Create a new DerivedKey from raw bytes.
    ///
    /// # Security
    ///
    /// The caller is responsible for ensuring the bytes come from a secure source.
    pub(crate) fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive a key from a password and salt with the standard iteration count.
///
/// Both inputs are taken as UTF-8 bytes. The empty password is valid: it is
/// the "no protection" default.
///
/// # Examples
///
/// ```
/// use tagseal_core::crypto::derive_key;
///
/// let key = derive_key("correct horse", "field-salt");
/// assert_eq!(key.as_bytes().len(), 32);
/// ```
pub fn derive_key(password: &str, salt: &str) -> DerivedKey {
    derive_key_with_iterations(password, salt, PBKDF2_ITERATIONS)
}

/// Derive a key with an explicit iteration count.
///
/// Only [`PBKDF2_ITERATIONS`] produces keys compatible with stored tokens;
/// other counts exist for tests that need cheap keys.
pub fn derive_key_with_iterations(password: &str, salt: &str, iterations: u32) -> DerivedKey {
    let mut key_bytes = [0u8; KEY_LENGTH];
    pbkdf2_hmac::<Sha512>(
        password.as_bytes(),
        salt.as_bytes(),
        iterations,
        &mut key_bytes,
    );
    DerivedKey::from_bytes(key_bytes)
}
