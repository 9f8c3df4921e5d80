//! Protected list items.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::token::Token;

/// Stable identity of an item within one session.
pub type ItemId = Uuid;

/// One protected entry in the list.
///
/// `token` holds the wire value exactly as it will be submitted. It is kept
/// as a string so a value that fails to parse is preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Session-local identifier
    pub id: ItemId,

    /// Human-readable text shown in the widget
    pub display_text: String,

    /// Persisted wire value
    pub token: String,

    /// Whether the item takes part in rekey passes
    pub selected: bool,

    /// Whether the current token is known to open under the effective password
    pub verified: bool,
}

impl Item {
    /// An item loaded from a stored wire value.
    ///
    /// Until decryption succeeds the raw value doubles as the display text.
    pub fn from_stored(token: impl Into<String>, selected: bool) -> Self {
        let token = token.into();
        Self {
            id: Uuid::new_v4(),
            display_text: token.clone(),
            token,
            selected,
            verified: false,
        }
    }

    /// A freshly typed tag, marked as unsealed plaintext.
    pub fn new_tagged(plaintext: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            display_text: plaintext.to_string(),
            token: Token::Tagged(plaintext.to_string()).serialize(),
            selected: true,
            verified: false,
        }
    }

    /// Parse the wire value.
    pub fn parsed_token(&self) -> Result<Token> {
        Token::parse(&self.token)
    }

    /// Snapshot for the widget and for persistence.
    pub fn view(&self) -> ItemView {
        ItemView {
            text: self.display_text.clone(),
            value: self.token.clone(),
            selected: self.selected,
        }
    }
}

/// What the widget renders for an item, and what the form submits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemView {
    pub text: String,
    pub value: String,
    #[serde(default = "default_selected")]
    pub selected: bool,
}

/// A wire value as the hosting form stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredItem {
    pub value: String,
    #[serde(default = "default_selected")]
    pub selected: bool,
}

impl StoredItem {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            selected: true,
        }
    }
}

impl From<&Item> for StoredItem {
    fn from(item: &Item) -> Self {
        Self {
            value: item.token.clone(),
            selected: item.selected,
        }
    }
}

fn default_selected() -> bool {
    true
}
