//! Cryptographic operations for Tagseal.
//!
//! This module provides key derivation and per-item sealing:
//! - **PBKDF2-HMAC-SHA512**: 120000 iterations, 256-bit output
//! - **AES-256-GCM**: 128-bit random IV per item, tag appended to ciphertext
//!
//! ## Security Model
//!
//! - Passwords and keys never leave the process; only sealed tokens do
//! - Key material is zeroized from memory on drop
//! - Keys are derived per operation and never persisted
//!
//! ## Threat Model
//!
//! We defend against:
//! - A server (or anyone reading submitted values) learning item plaintexts
//! - Undetected tampering with a stored token
//!
//! We do NOT defend against:
//! - Compromised host / keylogger
//! - Offline brute force of weak passwords (the salt is a fixed per-field value)

pub mod cipher;
pub mod deriver;
pub mod key;

pub use cipher::{AesGcmCipher, ItemCipher};
pub use deriver::{KeyDeriver, Pbkdf2Deriver};
pub use key::{derive_key, derive_key_with_iterations, DerivedKey, PBKDF2_ITERATIONS};
