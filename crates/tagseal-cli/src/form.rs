//! The hosting form: submission goes through the submit guard.

use tagseal_core::{StoredItem, SubmitDecision, SubmitEvent, SubmitGuard};

use crate::store::ItemStore;

/// A pending write of the item file.
#[derive(Debug, Default)]
struct SubmitRequest {
    cancelled: bool,
}

impl SubmitEvent for SubmitRequest {
    fn prevent_default(&mut self) {
        self.cancelled = true;
    }

    fn stop_propagation(&mut self) {}
}

pub struct Form {
    store: ItemStore,
    guard: SubmitGuard,
    protection_active: bool,
}

impl Form {
    pub fn new(store: ItemStore, guard: SubmitGuard, protection_active: bool) -> Self {
        Self {
            store,
            guard,
            protection_active,
        }
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    /// Persist the submitted values unless the guard cancels the submission.
    pub fn submit(&self, items: &[StoredItem]) -> anyhow::Result<()> {
        let mut request = SubmitRequest::default();
        let decision = self.guard.on_submit(&mut request, self.protection_active);
        if decision == SubmitDecision::Cancelled || request.cancelled {
            return Err(anyhow::anyhow!(
                "Submission refused: items are still being re-encrypted"
            ));
        }
        self.store.save(items)?;
        tracing::debug!(items = items.len(), path = %self.store.path().display(), "form submitted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_store(prefix: &str) -> ItemStore {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time")
            .as_nanos();
        ItemStore::new(
            std::env::temp_dir().join(format!("{}_{}_{}.json", prefix, std::process::id(), nanos)),
        )
    }

    #[test]
    fn test_submit_refused_while_guard_engaged() {
        let guard = SubmitGuard::new();
        let form = Form::new(temp_store("tagseal_form_blocked"), guard.clone(), true);
        let _hold = guard.engage();

        let err = form.submit(&[StoredItem::new("bogo:x")]).unwrap_err();

        assert!(err.to_string().contains("Submission refused"));
        assert!(!form.store().exists());
    }

    #[test]
    fn test_inactive_protection_submits_anyway() {
        let guard = SubmitGuard::new();
        let form = Form::new(temp_store("tagseal_form_inactive"), guard.clone(), false);
        let _hold = guard.engage();

        form.submit(&[StoredItem::new("bogo:x")]).unwrap();

        assert_eq!(form.store().load().unwrap(), vec![StoredItem::new("bogo:x")]);
        let _ = std::fs::remove_file(form.store().path());
    }
}
