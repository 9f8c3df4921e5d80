//! Asynchronous key derivation capability.

use async_trait::async_trait;

use super::key::{derive_key_with_iterations, DerivedKey, PBKDF2_ITERATIONS};

/// Turns a password and salt into a single-use symmetric key.
///
/// Derivation is a suspension point for the session: key stretching runs off
/// the cooperative task so other work keeps moving. Implementations must be
/// deterministic and must accept every input string, including the empty
/// password.
#[async_trait]
pub trait KeyDeriver: Send + Sync {
    async fn derive(&self, password: &str, salt: &str) -> DerivedKey;
}

/// PBKDF2-HMAC-SHA512 deriver running on the blocking thread pool.
#[derive(Debug, Clone, Copy)]
pub struct Pbkdf2Deriver {
    iterations: u32,
}

impl Pbkdf2Deriver {
    pub fn new() -> Self {
        Self {
            iterations: PBKDF2_ITERATIONS,
        }
    }

    /// Deriver with a non-standard iteration count.
    ///
    /// Keys from this deriver do not open tokens sealed elsewhere; intended
    /// for tests.
    pub fn with_iterations(iterations: u32) -> Self {
        Self { iterations }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }
}

impl Default for Pbkdf2Deriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyDeriver for Pbkdf2Deriver {
    async fn derive(&self, password: &str, salt: &str) -> DerivedKey {
        let password = zeroize::Zeroizing::new(password.to_string());
        let salt = salt.to_string();
        let iterations = self.iterations;

        let handle = tokio::task::spawn_blocking(move || {
            derive_key_with_iterations(&password, &salt, iterations)
        });
        match handle.await {
            Ok(key) => key,
            // Derivation itself cannot fail; surface a panic from the pool as-is.
            Err(err) => std::panic::resume_unwind(err.into_panic()),
        }
    }
}
