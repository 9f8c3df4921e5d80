//! Re-encryption of a whole item batch from one key to another.
//!
//! Every selected item is transformed independently: recover its plaintext
//! (directly for plaintext tokens, by decrypting with the old key otherwise)
//! and seal it again under the new key. Items run concurrently and the batch
//! settles only once all of them have. A failing item is recorded and left as
//! it was; other items are not rolled back, so a batch may finish partially
//! rekeyed.

use futures::future::join_all;
use serde::Serialize;

use crate::crypto::{DerivedKey, ItemCipher};
use crate::error::{ItemErrorKind, Result, TagsealError};
use crate::item::{Item, ItemId};

/// One item that failed during a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemFailure {
    pub item_id: ItemId,
    pub kind: ItemErrorKind,
}

/// Outcome of a batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RekeyReport {
    /// True when no item failed
    pub success: bool,

    /// Items whose token now holds a fresh seal under the new key
    pub rekeyed: Vec<ItemId>,

    /// Items left untouched because a step failed
    pub failures: Vec<ItemFailure>,
}

impl RekeyReport {
    pub fn failed(&self, item_id: ItemId) -> bool {
        self.failures.iter().any(|failure| failure.item_id == item_id)
    }
}

/// Runs rekey batches through an item cipher.
pub struct BatchRekeyer<'a> {
    cipher: &'a dyn ItemCipher,
}

impl<'a> BatchRekeyer<'a> {
    pub fn new(cipher: &'a dyn ItemCipher) -> Self {
        Self { cipher }
    }

    /// Move every selected item from `old_key` to `new_key`.
    ///
    /// Unselected items are not touched. Never fails as a whole; per-item
    /// errors are returned in the report.
    pub async fn rekey(
        &self,
        items: &mut [Item],
        old_key: &DerivedKey,
        new_key: &DerivedKey,
    ) -> RekeyReport {
        let cipher = self.cipher;
        let outcomes = join_all(items.iter_mut().filter(|item| item.selected).map(
            |item| async move {
                let item_id = item.id;
                (item_id, rekey_item(cipher, item, old_key, new_key).await)
            },
        ))
        .await;

        let mut report = RekeyReport::default();
        for (item_id, outcome) in outcomes {
            match outcome {
                Ok(()) => report.rekeyed.push(item_id),
                Err(err) => {
                    let kind = err.kind().unwrap_or(ItemErrorKind::Encryption);
                    tracing::warn!(item = %item_id, error = %kind, "item was not rekeyed");
                    report.failures.push(ItemFailure { item_id, kind });
                }
            }
        }
        report.success = report.failures.is_empty();

        tracing::debug!(
            rekeyed = report.rekeyed.len(),
            failed = report.failures.len(),
            "rekey batch settled"
        );
        report
    }
}

async fn rekey_item(
    cipher: &dyn ItemCipher,
    item: &mut Item,
    old_key: &DerivedKey,
    new_key: &DerivedKey,
) -> Result<()> {
    let token = item.parsed_token()?;
    let plaintext = match token.plaintext() {
        Some(plaintext) => plaintext.to_string(),
        None => cipher.decrypt(old_key, &token).await?,
    };
    let sealed = cipher.encrypt(new_key, &plaintext).await?;
    if !sealed.is_encrypted() {
        return Err(TagsealError::Encryption(
            "cipher returned an unsealed token".to_string(),
        ));
    }
    item.token = sealed.serialize();
    item.display_text = plaintext;
    Ok(())
}
