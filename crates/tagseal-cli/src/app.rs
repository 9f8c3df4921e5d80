//! Session setup shared by the item commands.

use std::path::PathBuf;

use secrecy::ExposeSecret;
use tagseal_core::{LoadReport, MemoryWidget, SessionController, SubmitGuard};

use crate::cli::Cli;
use crate::config::{default_config_path, read_config, TagsealConfig};
use crate::form::Form;
use crate::helpers::current_password;
use crate::store::ItemStore;

pub type Session = SessionController<MemoryWidget>;

/// A loaded session together with the form it submits through.
pub struct OpenSession {
    pub session: Session,
    pub form: Form,
    pub load_report: LoadReport,
}

impl OpenSession {
    /// Submit the session's current values.
    pub fn submit(&self) -> anyhow::Result<()> {
        self.form.submit(&self.session.stored_items())
    }
}

pub fn resolve_config_path(cli: &Cli) -> anyhow::Result<PathBuf> {
    match cli.config.as_deref() {
        Some(path) if !path.trim().is_empty() => Ok(PathBuf::from(path)),
        _ => default_config_path(),
    }
}

pub fn load_config(cli: &Cli) -> anyhow::Result<TagsealConfig> {
    let path = resolve_config_path(cli)?;
    if !path.exists() {
        return Err(anyhow::anyhow!(
            "No config found at {}. Run `tagseal init` to create one.",
            path.display()
        ));
    }
    read_config(&path)
}

pub fn items_path(cli: &Cli, config: &TagsealConfig) -> PathBuf {
    match cli.items.as_deref() {
        Some(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => PathBuf::from(&config.items.path),
    }
}

/// Read config and items, then run the initial decryption.
pub async fn open_session(cli: &Cli) -> anyhow::Result<OpenSession> {
    let config = load_config(cli)?;
    let protection = config.protection()?;
    let store = ItemStore::new(items_path(cli, &config));
    let stored = store.load()?;
    let password = current_password(cli.no_input)?;

    let guard = SubmitGuard::new();
    let form = Form::new(store, guard.clone(), config.protection.active);
    let mut session = SessionController::new(
        protection,
        password.expose_secret(),
        stored,
        MemoryWidget::new(),
        guard,
    );
    let load_report = session.load().await?;

    Ok(OpenSession {
        session,
        form,
        load_report,
    })
}
