//! Input and parsing helper functions for the CLI.

use std::io::IsTerminal;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use dialoguer::Password;
use secrecy::SecretString;

use tagseal_core::{Item, ItemId};

/// Read the master password field: TAGSEAL_PASSWORD, else a prompt.
///
/// Without a TTY (or with `--no-input`) the field counts as left empty.
pub fn current_password(no_input: bool) -> anyhow::Result<SecretString> {
    if let Ok(value) = std::env::var("TAGSEAL_PASSWORD") {
        return Ok(SecretString::from(value));
    }
    if no_input || !std::io::stdin().is_terminal() {
        return Ok(SecretString::from(String::new()));
    }
    Password::new()
        .with_prompt("Master password (empty for default)")
        .allow_empty_password(true)
        .interact()
        .map(SecretString::from)
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}

/// Read the new master password: TAGSEAL_NEW_PASSWORD, else a confirmed prompt.
///
/// Without a TTY (or with `--no-input`) the field counts as left empty, which
/// moves the items to the default password.
pub fn new_password(no_input: bool) -> anyhow::Result<SecretString> {
    if let Ok(value) = std::env::var("TAGSEAL_NEW_PASSWORD") {
        return Ok(SecretString::from(value));
    }
    if no_input || !std::io::stdin().is_terminal() {
        tracing::debug!("no new password given; using the default");
        return Ok(SecretString::from(String::new()));
    }
    Password::new()
        .with_prompt("New master password (empty for default)")
        .with_confirmation("Confirm new password", "Passwords do not match")
        .allow_empty_password(true)
        .interact()
        .map(SecretString::from)
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}

/// Random 16-byte salt, base64 encoded.
pub fn generate_salt() -> anyhow::Result<String> {
    let mut bytes = [0u8; 16];
    getrandom::getrandom(&mut bytes)
        .map_err(|e| anyhow::anyhow!("Failed to generate salt: {}", e))?;
    Ok(STANDARD.encode(bytes))
}

/// Map 1-based indices from `show` to item ids.
pub fn resolve_indices(items: &[Item], indices: &[usize]) -> anyhow::Result<Vec<ItemId>> {
    indices
        .iter()
        .map(|&index| {
            index
                .checked_sub(1)
                .and_then(|position| items.get(position))
                .map(|item| item.id)
                .ok_or_else(|| {
                    anyhow::anyhow!("No item at index {} ({} items)", index, items.len())
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_indices_is_one_based() {
        let items = vec![Item::new_tagged("a"), Item::new_tagged("b")];
        let ids = resolve_indices(&items, &[2, 1]).unwrap();
        assert_eq!(ids, vec![items[1].id, items[0].id]);
    }

    #[test]
    fn test_resolve_indices_rejects_out_of_range() {
        let items = vec![Item::new_tagged("a")];
        assert!(resolve_indices(&items, &[0]).is_err());
        let err = resolve_indices(&items, &[2]).unwrap_err();
        assert!(err.to_string().contains("No item at index 2"));
    }

    #[test]
    fn test_generated_salt_is_sixteen_bytes() {
        let salt = generate_salt().unwrap();
        assert_eq!(STANDARD.decode(&salt).unwrap().len(), 16);
        assert_ne!(salt, generate_salt().unwrap());
    }
}
