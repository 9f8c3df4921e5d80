//! The item-list widget as seen from the session.
//!
//! The widget renders items and raises add/change events; the session only
//! pushes state back into it.

use crate::item::ItemView;

/// Display-side operations the session drives.
pub trait ItemWidget {
    /// Replace the item currently carrying `old_value` with `view`.
    fn replace(&mut self, old_value: &str, view: ItemView);

    /// Enable or disable user interaction.
    fn set_disabled(&mut self, disabled: bool);

    /// (Re)initialize the widget over the full item list.
    fn refresh(&mut self, items: &[ItemView]);
}

/// In-memory widget, used by non-graphical hosts and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryWidget {
    items: Vec<ItemView>,
    disabled: bool,
    refreshes: usize,
    replacements: usize,
}

impl MemoryWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[ItemView] {
        &self.items
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// How many times the widget was (re)initialized.
    pub fn refreshes(&self) -> usize {
        self.refreshes
    }

    pub fn replacements(&self) -> usize {
        self.replacements
    }
}

impl ItemWidget for MemoryWidget {
    fn replace(&mut self, old_value: &str, view: ItemView) {
        match self.items.iter_mut().find(|item| item.value == old_value) {
            Some(slot) => {
                *slot = view;
                self.replacements += 1;
            }
            None => tracing::debug!("replace target not rendered yet"),
        }
    }

    fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    fn refresh(&mut self, items: &[ItemView]) {
        self.items = items.to_vec();
        self.refreshes += 1;
    }
}
