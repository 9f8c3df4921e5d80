//! # Tagseal Core
//!
//! Client-side protection for a list of short text items ("tags") that a form
//! stores on a server it does not trust with their contents.
//!
//! Each item is sealed independently with AES-256-GCM under a key stretched
//! from the user's master password (PBKDF2-HMAC-SHA512). When the password
//! changes, every selected item is re-encrypted from the old key to the new
//! one, and form submission is blocked while that work is in flight.
//!
//! ## Architecture
//!
//! - **crypto**: key derivation and per-item sealing capabilities
//! - **token**: the `plain` / `bogo:plain` / `iv:ciphertext` wire format
//! - **item**: items, widget views, and stored values
//! - **rekey**: best-effort concurrent re-encryption of a batch
//! - **guard**: the submit guard latch
//! - **session**: the controller state machine and the widget interface
//! - **config**: default password and salt of a protected field
//! - **fs**: atomic file replacement for hosts that persist submitted values

pub mod config;
pub mod crypto;
pub mod error;
pub mod fs;
pub mod guard;
pub mod item;
pub mod rekey;
pub mod session;
pub mod token;

pub use config::ProtectionConfig;
pub use error::{ItemErrorKind, Result, TagsealError};
pub use guard::{SubmitDecision, SubmitEvent, SubmitGuard};
pub use item::{Item, ItemId, ItemView, StoredItem};
pub use rekey::{BatchRekeyer, ItemFailure, RekeyReport};
pub use session::{
    Command, CommandOutcome, ItemStatus, ItemWidget, LoadReport, MemoryWidget, PasswordChange,
    SessionController, SessionPhase,
};
pub use token::Token;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
