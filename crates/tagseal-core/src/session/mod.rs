//! Session controller for one protected item list.
//!
//! The controller owns the items, the effective password, and the submit
//! guard. It runs the initial decryption (`Loading`), then consumes user
//! commands while `Ready`. Every command that rewrites tokens runs as a
//! single rekey pass (`Rekeying`) with the guard engaged and the widget
//! disabled; commands arriving outside `Ready` are refused.
//!
//! ```text
//! Loading --load--> Ready --PasswordChanged/ItemAdded/SelectionChanged--> Rekeying --> Ready
//!                     \--Unlock--> Unlocking --> Ready
//! ```

pub mod widget;

use std::collections::HashMap;
use std::fmt;

use futures::future::join_all;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::config::ProtectionConfig;
use crate::crypto::{AesGcmCipher, DerivedKey, ItemCipher, KeyDeriver, Pbkdf2Deriver};
use crate::error::{ItemErrorKind, Result, TagsealError};
use crate::guard::SubmitGuard;
use crate::item::{Item, ItemId, ItemView, StoredItem};
use crate::rekey::{BatchRekeyer, ItemFailure, RekeyReport};

pub use widget::{ItemWidget, MemoryWidget};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Loading,
    Ready,
    Rekeying,
    Unlocking,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionPhase::Loading => "loading",
            SessionPhase::Ready => "ready",
            SessionPhase::Rekeying => "rekeying",
            SessionPhase::Unlocking => "unlocking",
        };
        f.write_str(label)
    }
}

/// User events, as raised by the password field and the item widget.
#[derive(Debug)]
pub enum Command {
    /// The master password field changed. Empty means "use the default".
    PasswordChanged(SecretString),

    /// The user typed a new tag.
    ItemAdded(String),

    /// The user toggled an item's selection.
    SelectionChanged { item_id: ItemId, selected: bool },

    /// The user removed an item.
    ItemRemoved(ItemId),

    /// Retry opening undecrypted items with another password. Only valid
    /// while no item has opened yet.
    Unlock(SecretString),
}

/// Result of opening one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "error")]
pub enum ItemStatus {
    Decrypted,
    Plaintext,
    Failed(ItemErrorKind),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemOutcome {
    pub item_id: ItemId,
    #[serde(flatten)]
    pub status: ItemStatus,
}

/// Outcome of the initial decryption (or of an unlock attempt).
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    pub outcomes: Vec<ItemOutcome>,
    pub any_succeeded: bool,
}

impl LoadReport {
    pub fn status(&self, item_id: ItemId) -> Option<ItemStatus> {
        self.outcomes
            .iter()
            .find(|outcome| outcome.item_id == item_id)
            .map(|outcome| outcome.status)
    }

    pub fn failures(&self) -> Vec<ItemFailure> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match outcome.status {
                ItemStatus::Failed(kind) => Some(ItemFailure {
                    item_id: outcome.item_id,
                    kind,
                }),
                _ => None,
            })
            .collect()
    }
}

/// Outcome of a rekey pass triggered by a command.
#[derive(Debug, Clone, Serialize)]
pub struct PasswordChange {
    pub report: RekeyReport,
    /// Whether the new password became the effective password
    pub committed: bool,
}

#[derive(Debug)]
pub enum CommandOutcome {
    /// Nothing to do (e.g. a blank tag)
    Ignored,
    /// Item set changed without crypto work
    Updated,
    Rekeyed(PasswordChange),
    Unlocked(LoadReport),
}

/// Process-wide mutable state, owned by the controller.
#[derive(Debug)]
pub struct SessionState {
    effective_password: SecretString,
    any_succeeded: bool,
    phase: SessionPhase,
    guard: SubmitGuard,
}

impl SessionState {
    pub fn new(effective_password: SecretString, guard: SubmitGuard) -> Self {
        Self {
            effective_password,
            any_succeeded: false,
            phase: SessionPhase::Loading,
            guard,
        }
    }

    /// The password last known to open the stored tokens (or the default).
    pub fn effective_password(&self) -> &SecretString {
        &self.effective_password
    }

    pub fn any_succeeded(&self) -> bool {
        self.any_succeeded
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn submit_blocked(&self) -> bool {
        self.guard.is_blocked()
    }

    pub fn rekey_in_flight(&self) -> bool {
        matches!(self.phase, SessionPhase::Rekeying | SessionPhase::Unlocking)
    }

    pub fn guard(&self) -> &SubmitGuard {
        &self.guard
    }
}

/// Orchestrates decryption and rekeying for one protected field.
pub struct SessionController<W: ItemWidget> {
    config: ProtectionConfig,
    state: SessionState,
    items: Vec<Item>,
    deriver: Box<dyn KeyDeriver>,
    cipher: Box<dyn ItemCipher>,
    widget: W,
}

impl<W: ItemWidget> SessionController<W> {
    /// Create a session over stored values.
    ///
    /// `entered_password` is the password field's value at page load; empty
    /// means the configured default applies.
    pub fn new(
        config: ProtectionConfig,
        entered_password: &str,
        stored: impl IntoIterator<Item = StoredItem>,
        widget: W,
        guard: SubmitGuard,
    ) -> Self {
        let effective_password = config.resolve_password(entered_password);
        let items = stored
            .into_iter()
            .map(|stored| Item::from_stored(stored.value, stored.selected))
            .collect();
        Self {
            config,
            state: SessionState::new(effective_password, guard),
            items,
            deriver: Box::new(Pbkdf2Deriver::new()),
            cipher: Box::new(AesGcmCipher::new()),
            widget,
        }
    }

    pub fn with_deriver(mut self, deriver: impl KeyDeriver + 'static) -> Self {
        self.deriver = Box::new(deriver);
        self
    }

    pub fn with_cipher(mut self, cipher: impl ItemCipher + 'static) -> Self {
        self.cipher = Box::new(cipher);
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn item_views(&self) -> Vec<ItemView> {
        self.items.iter().map(Item::view).collect()
    }

    /// The values the form submits.
    pub fn stored_items(&self) -> Vec<StoredItem> {
        self.items.iter().map(StoredItem::from).collect()
    }

    /// Run the initial decryption and move to `Ready`.
    ///
    /// Items that do not open keep their raw value as display text. The
    /// widget is initialized only after every attempt has settled.
    pub async fn load(&mut self) -> Result<LoadReport> {
        if self.state.phase != SessionPhase::Loading {
            return Err(TagsealError::Busy {
                phase: self.state.phase,
            });
        }
        let hold = self.state.guard.engage();

        let key = self
            .deriver
            .derive(
                self.state.effective_password.expose_secret(),
                self.config.salt(),
            )
            .await;
        let cipher = self.cipher.as_ref();
        let key = &key;
        let outcomes = join_all(self.items.iter_mut().map(|item| async move {
            let item_id = item.id;
            let status = open_item(cipher, item, key).await;
            ItemOutcome { item_id, status }
        }))
        .await;

        let sealed_failed = outcomes.iter().any(|outcome| {
            matches!(outcome.status, ItemStatus::Failed(kind) if kind != ItemErrorKind::MalformedToken)
        });
        if outcomes
            .iter()
            .any(|outcome| outcome.status == ItemStatus::Decrypted)
        {
            self.state.any_succeeded = true;
        } else if sealed_failed {
            // Sealed items exist and none opened: the entered password is wrong.
            self.state.effective_password = self.config.default_password().clone();
        }
        self.state.phase = SessionPhase::Ready;
        let views = self.item_views();
        self.widget.refresh(&views);
        hold.release();

        let report = LoadReport {
            outcomes,
            any_succeeded: self.state.any_succeeded,
        };
        tracing::info!(
            items = report.outcomes.len(),
            failed = report.failures().len(),
            "initial decryption settled"
        );
        Ok(report)
    }

    /// Apply one user command.
    pub async fn handle(&mut self, command: Command) -> Result<CommandOutcome> {
        self.recover_abandoned_pass();
        if self.state.phase != SessionPhase::Ready {
            return Err(TagsealError::Busy {
                phase: self.state.phase,
            });
        }

        match command {
            Command::PasswordChanged(entered) => {
                let new_password = self.config.resolve_password(entered.expose_secret());
                let change = self.rekey_to(new_password, false).await;
                Ok(CommandOutcome::Rekeyed(change))
            }
            Command::ItemAdded(text) => {
                let text = text.trim();
                if text.is_empty() {
                    tracing::debug!("ignoring blank tag");
                    return Ok(CommandOutcome::Ignored);
                }
                self.items.push(Item::new_tagged(text));
                let current = self.state.effective_password.clone();
                Ok(CommandOutcome::Rekeyed(self.rekey_to(current, true).await))
            }
            Command::SelectionChanged { item_id, selected } => {
                self.item_mut(item_id)?.selected = selected;
                let current = self.state.effective_password.clone();
                Ok(CommandOutcome::Rekeyed(self.rekey_to(current, true).await))
            }
            Command::ItemRemoved(item_id) => {
                let index = self
                    .items
                    .iter()
                    .position(|item| item.id == item_id)
                    .ok_or_else(|| TagsealError::InvalidInput(format!("Unknown item {}", item_id)))?;
                self.items.remove(index);
                let views = self.item_views();
                self.widget.refresh(&views);
                Ok(CommandOutcome::Updated)
            }
            Command::Unlock(entered) => {
                let password = self.config.resolve_password(entered.expose_secret());
                Ok(CommandOutcome::Unlocked(self.unlock(password).await?))
            }
        }
    }

    /// Return to `Ready` after a rekey or unlock future was dropped midway.
    ///
    /// Passes run under `&mut self`, so a pass still marked in flight here can
    /// no longer be running. Its submit hold was released on drop; items it
    /// had already rekeyed keep their new tokens.
    fn recover_abandoned_pass(&mut self) {
        if !self.state.rekey_in_flight() {
            return;
        }
        tracing::warn!(phase = %self.state.phase, "previous pass was cancelled before it settled");
        self.state.phase = SessionPhase::Ready;
        let views = self.item_views();
        self.widget.refresh(&views);
        self.widget.set_disabled(false);
    }

    fn item_mut(&mut self, item_id: ItemId) -> Result<&mut Item> {
        self.items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(|| TagsealError::InvalidInput(format!("Unknown item {}", item_id)))
    }

    /// Move every selected item from the effective password to `new_password`.
    ///
    /// The new password becomes effective only if every selected item that
    /// was known to open under the old one was rekeyed.
    async fn rekey_to(&mut self, new_password: SecretString, force_refresh: bool) -> PasswordChange {
        let hold = self.state.guard.engage();
        self.state.phase = SessionPhase::Rekeying;
        self.widget.set_disabled(true);

        let salt = self.config.salt().to_string();
        let old_password = self.state.effective_password.clone();
        let same_password = old_password.expose_secret() == new_password.expose_secret();
        let old_key = self.deriver.derive(old_password.expose_secret(), &salt).await;
        let new_key = if same_password {
            old_key.clone()
        } else {
            self.deriver.derive(new_password.expose_secret(), &salt).await
        };

        let previous_tokens: HashMap<ItemId, String> = self
            .items
            .iter()
            .filter(|item| item.selected)
            .map(|item| (item.id, item.token.clone()))
            .collect();
        let previously_verified: Vec<ItemId> = self
            .items
            .iter()
            .filter(|item| item.selected && item.verified)
            .map(|item| item.id)
            .collect();

        let report = BatchRekeyer::new(self.cipher.as_ref())
            .rekey(&mut self.items, &old_key, &new_key)
            .await;

        let committed = previously_verified
            .iter()
            .all(|item_id| !report.failed(*item_id));
        let password_moved = committed && !same_password;
        for item in self.items.iter_mut() {
            if report.rekeyed.contains(&item.id) {
                item.verified = committed || same_password;
            } else if password_moved {
                // Still sealed under the previous password.
                item.verified = false;
            }
        }
        if committed {
            self.state.effective_password = new_password;
            if !report.rekeyed.is_empty() {
                self.state.any_succeeded = true;
            }
        }

        for item_id in &report.rekeyed {
            let old_value = previous_tokens.get(item_id);
            let item = self.items.iter().find(|item| item.id == *item_id);
            if let (Some(old_value), Some(item)) = (old_value, item) {
                self.widget.replace(old_value, item.view());
            }
        }
        if force_refresh || !report.rekeyed.is_empty() {
            let views = self.item_views();
            self.widget.refresh(&views);
        }

        self.widget.set_disabled(false);
        self.state.phase = SessionPhase::Ready;
        hold.release();

        tracing::info!(
            committed,
            rekeyed = report.rekeyed.len(),
            failed = report.failures.len(),
            "rekey settled"
        );
        PasswordChange { report, committed }
    }

    async fn unlock(&mut self, password: SecretString) -> Result<LoadReport> {
        if self.state.any_succeeded {
            return Err(TagsealError::InvalidInput(
                "Items already open with the effective password; change the password instead"
                    .to_string(),
            ));
        }

        let hold = self.state.guard.engage();
        self.state.phase = SessionPhase::Unlocking;
        self.widget.set_disabled(true);

        let key = self
            .deriver
            .derive(password.expose_secret(), self.config.salt())
            .await;
        let cipher = self.cipher.as_ref();
        let key = &key;
        let outcomes = join_all(
            self.items
                .iter_mut()
                .filter(|item| {
                    !item.verified
                        && item
                            .parsed_token()
                            .map(|token| token.is_encrypted())
                            .unwrap_or(false)
                })
                .map(|item| async move {
                    let item_id = item.id;
                    let status = open_item(cipher, item, key).await;
                    ItemOutcome { item_id, status }
                }),
        )
        .await;

        if outcomes
            .iter()
            .any(|outcome| outcome.status == ItemStatus::Decrypted)
        {
            self.state.effective_password = password;
            self.state.any_succeeded = true;
            let views = self.item_views();
            self.widget.refresh(&views);
        }

        self.widget.set_disabled(false);
        self.state.phase = SessionPhase::Ready;
        hold.release();

        Ok(LoadReport {
            outcomes,
            any_succeeded: self.state.any_succeeded,
        })
    }
}

/// Open one stored item for display.
async fn open_item(cipher: &dyn ItemCipher, item: &mut Item, key: &DerivedKey) -> ItemStatus {
    let token = match item.parsed_token() {
        Ok(token) => token,
        Err(_) => {
            tracing::warn!(item = %item.id, "stored value is not a valid token; keeping it verbatim");
            item.display_text = item.token.clone();
            return ItemStatus::Failed(ItemErrorKind::MalformedToken);
        }
    };

    if let Some(plaintext) = token.plaintext() {
        item.display_text = plaintext.to_string();
        return ItemStatus::Plaintext;
    }

    match cipher.decrypt(key, &token).await {
        Ok(plaintext) => {
            item.display_text = plaintext;
            item.verified = true;
            ItemStatus::Decrypted
        }
        Err(err) => {
            let kind = err.kind().unwrap_or(ItemErrorKind::Decryption);
            tracing::warn!(item = %item.id, error = %kind, "item did not open");
            item.display_text = item.token.clone();
            ItemStatus::Failed(kind)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::derive_key_with_iterations;
    use crate::token::Token;

    const ITERATIONS: u32 = 1_000;

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    fn config() -> ProtectionConfig {
        ProtectionConfig::new("d", "s1").unwrap()
    }

    async fn sealed(password: &str, plaintext: &str) -> StoredItem {
        let key = derive_key_with_iterations(password, "s1", ITERATIONS);
        let token = AesGcmCipher.encrypt(&key, plaintext).await.unwrap();
        StoredItem::new(token.serialize())
    }

    fn controller(
        entered: &str,
        stored: Vec<StoredItem>,
    ) -> SessionController<MemoryWidget> {
        SessionController::new(
            config(),
            entered,
            stored,
            MemoryWidget::new(),
            SubmitGuard::new(),
        )
        .with_deriver(Pbkdf2Deriver::with_iterations(ITERATIONS))
    }

    async fn open_with(password: &str, item: &Item) -> String {
        let key = derive_key_with_iterations(password, "s1", ITERATIONS);
        AesGcmCipher
            .decrypt(&key, &Token::parse(&item.token).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_load_decrypts_with_default_password() {
        let mut session = controller("", vec![sealed("d", "alpha").await]);

        let report = session.load().await.unwrap();

        assert!(report.any_succeeded);
        assert_eq!(session.items()[0].display_text, "alpha");
        assert!(session.items()[0].verified);
        assert_eq!(session.state().phase(), SessionPhase::Ready);
        assert!(!session.state().submit_blocked());
        assert_eq!(session.widget().refreshes(), 1);
        assert_eq!(session.widget().items()[0].text, "alpha");
    }

    #[tokio::test]
    async fn test_load_prefers_entered_password() {
        let mut session = controller("mine", vec![sealed("mine", "alpha").await]);

        let report = session.load().await.unwrap();

        assert_eq!(report.status(session.items()[0].id), Some(ItemStatus::Decrypted));
        assert_eq!(session.state().effective_password().expose_secret(), "mine");
    }

    #[tokio::test]
    async fn test_unverified_entered_password_reverts_to_default() {
        let mut session = controller("typo", vec![sealed("d", "alpha").await]);

        session.load().await.unwrap();

        assert!(!session.state().any_succeeded());
        assert_eq!(session.state().effective_password().expose_secret(), "d");
    }

    #[tokio::test]
    async fn test_entered_password_kept_when_nothing_sealed() {
        let mut session = controller("p", vec![StoredItem::new("bogo:work")]);
        session.load().await.unwrap();
        session
            .handle(Command::ItemAdded("x".to_string()))
            .await
            .unwrap();
        assert_eq!(session.state().effective_password().expose_secret(), "p");

        let mut reopened = controller("p", session.stored_items());
        let report = reopened.load().await.unwrap();

        for item in reopened.items() {
            assert_eq!(report.status(item.id), Some(ItemStatus::Decrypted));
        }
        assert_eq!(reopened.items()[1].display_text, "x");
    }

    #[tokio::test]
    async fn test_malformed_only_list_keeps_entered_password() {
        let mut session = controller("p", vec![StoredItem::new("a:b:c")]);

        session.load().await.unwrap();

        assert_eq!(session.state().effective_password().expose_secret(), "p");
    }

    #[tokio::test]
    async fn test_load_wrong_password_falls_back_to_raw_value() {
        let stored = sealed("other", "alpha").await;
        let raw = stored.value.clone();
        let mut session = controller("", vec![stored, StoredItem::new("bogo:work")]);

        let report = session.load().await.unwrap();

        assert!(!report.any_succeeded);
        assert_eq!(session.items()[0].display_text, raw);
        assert_eq!(
            report.status(session.items()[0].id),
            Some(ItemStatus::Failed(ItemErrorKind::Decryption))
        );
        assert_eq!(
            report.status(session.items()[1].id),
            Some(ItemStatus::Plaintext)
        );
        assert_eq!(session.items()[1].display_text, "work");
    }

    #[tokio::test]
    async fn test_load_keeps_malformed_value() {
        let mut session = controller("", vec![StoredItem::new("a:b:c")]);

        let report = session.load().await.unwrap();

        assert_eq!(report.failures()[0].kind, ItemErrorKind::MalformedToken);
        assert_eq!(session.stored_items()[0].value, "a:b:c");
        assert_eq!(session.items()[0].display_text, "a:b:c");
    }

    /// Deriver that never finishes for one password.
    struct StallingDeriver {
        stall_on: &'static str,
    }

    #[async_trait::async_trait]
    impl KeyDeriver for StallingDeriver {
        async fn derive(&self, password: &str, salt: &str) -> DerivedKey {
            if password == self.stall_on {
                std::future::pending::<()>().await;
            }
            derive_key_with_iterations(password, salt, ITERATIONS)
        }
    }

    #[tokio::test]
    async fn test_dropped_rekey_does_not_wedge_session() {
        use futures::FutureExt;

        let mut session = controller("", vec![sealed("d", "alpha").await])
            .with_deriver(StallingDeriver { stall_on: "hang" });
        session.load().await.unwrap();

        let dropped = session
            .handle(Command::PasswordChanged(secret("hang")))
            .now_or_never();
        assert!(dropped.is_none());
        assert_eq!(session.state().phase(), SessionPhase::Rekeying);
        assert!(!session.state().submit_blocked());
        assert!(session.widget().is_disabled());

        let outcome = session
            .handle(Command::ItemAdded("beta".to_string()))
            .await
            .unwrap();

        assert!(matches!(outcome, CommandOutcome::Rekeyed(_)));
        assert_eq!(session.state().phase(), SessionPhase::Ready);
        assert!(!session.widget().is_disabled());
        assert_eq!(session.state().effective_password().expose_secret(), "d");
        assert_eq!(open_with("d", &session.items()[1]).await, "beta");
    }

    #[tokio::test]
    async fn test_load_twice_is_refused() {
        let mut session = controller("", vec![]);
        session.load().await.unwrap();

        let err = session.load().await.unwrap_err();
        assert!(matches!(err, TagsealError::Busy { phase: SessionPhase::Ready }));
    }

    #[tokio::test]
    async fn test_commands_refused_before_load() {
        let mut session = controller("", vec![]);

        let err = session
            .handle(Command::ItemAdded("x".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, TagsealError::Busy { phase: SessionPhase::Loading }));
    }

    #[tokio::test]
    async fn test_password_change_commits_and_rekeys() {
        let mut session = controller("", vec![sealed("d", "alpha").await]);
        session.load().await.unwrap();

        let outcome = session
            .handle(Command::PasswordChanged(secret("p2")))
            .await
            .unwrap();

        let CommandOutcome::Rekeyed(change) = outcome else {
            panic!("expected a rekey");
        };
        assert!(change.committed);
        assert!(change.report.success);
        assert_eq!(session.state().effective_password().expose_secret(), "p2");
        assert_eq!(open_with("p2", &session.items()[0]).await, "alpha");
        assert_eq!(session.widget().items()[0].value, session.items()[0].token);
        assert!(!session.widget().is_disabled());
    }

    #[tokio::test]
    async fn test_cleared_field_rekeys_to_default() {
        let mut session = controller("p2", vec![sealed("p2", "alpha").await]);
        session.load().await.unwrap();

        session
            .handle(Command::PasswordChanged(secret("")))
            .await
            .unwrap();

        assert_eq!(session.state().effective_password().expose_secret(), "d");
        assert_eq!(open_with("d", &session.items()[0]).await, "alpha");
    }

    #[tokio::test]
    async fn test_failed_verified_item_blocks_commit() {
        let mut session = controller("", vec![sealed("d", "alpha").await]);
        session.load().await.unwrap();
        // Replace the verified token with one sealed elsewhere.
        let foreign = sealed("elsewhere", "beta").await.value;
        session.items[0].token = foreign;

        let outcome = session
            .handle(Command::PasswordChanged(secret("p2")))
            .await
            .unwrap();

        let CommandOutcome::Rekeyed(change) = outcome else {
            panic!("expected a rekey");
        };
        assert!(!change.committed);
        assert_eq!(session.state().effective_password().expose_secret(), "d");
        assert!(!session.state().submit_blocked());
        assert_eq!(session.state().phase(), SessionPhase::Ready);
    }

    #[tokio::test]
    async fn test_added_item_is_sealed_with_effective_password() {
        let mut session = controller("", vec![sealed("d", "alpha").await]);
        session.load().await.unwrap();

        session
            .handle(Command::ItemAdded("  beta ".to_string()))
            .await
            .unwrap();

        assert_eq!(session.items().len(), 2);
        let added = &session.items()[1];
        assert_eq!(added.display_text, "beta");
        assert!(added.parsed_token().unwrap().is_encrypted());
        assert_eq!(open_with("d", added).await, "beta");
        assert!(added.verified);
        assert_eq!(session.widget().items().len(), 2);
    }

    #[tokio::test]
    async fn test_blank_tag_ignored() {
        let mut session = controller("", vec![]);
        session.load().await.unwrap();

        let outcome = session
            .handle(Command::ItemAdded("   ".to_string()))
            .await
            .unwrap();

        assert!(matches!(outcome, CommandOutcome::Ignored));
        assert!(session.items().is_empty());
    }

    #[tokio::test]
    async fn test_deselected_item_left_alone() {
        let mut session = controller(
            "",
            vec![sealed("d", "alpha").await, sealed("d", "beta").await],
        );
        session.load().await.unwrap();
        let beta_id = session.items()[1].id;
        session
            .handle(Command::SelectionChanged {
                item_id: beta_id,
                selected: false,
            })
            .await
            .unwrap();
        let beta_token = session.items()[1].token.clone();

        session
            .handle(Command::PasswordChanged(secret("p2")))
            .await
            .unwrap();

        assert_eq!(session.items()[1].token, beta_token);
        assert!(!session.items()[1].verified);
        assert_eq!(open_with("p2", &session.items()[0]).await, "alpha");
    }

    #[tokio::test]
    async fn test_remove_item() {
        let mut session = controller("", vec![StoredItem::new("bogo:x")]);
        session.load().await.unwrap();
        let item_id = session.items()[0].id;

        let outcome = session.handle(Command::ItemRemoved(item_id)).await.unwrap();

        assert!(matches!(outcome, CommandOutcome::Updated));
        assert!(session.items().is_empty());
        assert!(session.widget().items().is_empty());

        let err = session.handle(Command::ItemRemoved(item_id)).await.unwrap_err();
        assert!(matches!(err, TagsealError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_unlock_opens_items_and_sets_effective_password() {
        let mut session = controller("", vec![sealed("real", "alpha").await]);
        let report = session.load().await.unwrap();
        assert!(!report.any_succeeded);

        let outcome = session
            .handle(Command::Unlock(secret("real")))
            .await
            .unwrap();

        let CommandOutcome::Unlocked(report) = outcome else {
            panic!("expected unlock");
        };
        assert!(report.any_succeeded);
        assert_eq!(session.items()[0].display_text, "alpha");
        assert_eq!(session.state().effective_password().expose_secret(), "real");
    }

    #[tokio::test]
    async fn test_wrong_unlock_keeps_effective_password() {
        let mut session = controller("", vec![sealed("real", "alpha").await]);
        session.load().await.unwrap();

        session
            .handle(Command::Unlock(secret("guess")))
            .await
            .unwrap();

        assert!(!session.state().any_succeeded());
        assert_eq!(session.state().effective_password().expose_secret(), "d");
    }

    #[tokio::test]
    async fn test_unlock_refused_once_items_open() {
        let mut session = controller("", vec![sealed("d", "alpha").await]);
        session.load().await.unwrap();

        let err = session
            .handle(Command::Unlock(secret("other")))
            .await
            .unwrap_err();
        assert!(matches!(err, TagsealError::InvalidInput(_)));
        assert!(!session.state().submit_blocked());
    }
}
