use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use tagseal_core::ProtectionConfig;

#[derive(Debug, Serialize, Deserialize)]
pub struct TagsealConfig {
    pub protection: ProtectionSection,
    pub items: ItemsSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProtectionSection {
    pub salt: String,
    #[serde(default)]
    pub default_password: String,
    /// Whether the form enforces the submit guard
    #[serde(default = "default_active")]
    pub active: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ItemsSection {
    pub path: String,
}

fn default_active() -> bool {
    true
}

impl TagsealConfig {
    pub fn new(salt: String, default_password: String, items_path: PathBuf) -> Self {
        Self {
            protection: ProtectionSection {
                salt,
                default_password,
                active: true,
            },
            items: ItemsSection {
                path: items_path.to_string_lossy().to_string(),
            },
        }
    }

    pub fn protection(&self) -> anyhow::Result<ProtectionConfig> {
        ProtectionConfig::new(
            self.protection.default_password.clone(),
            self.protection.salt.clone(),
        )
        .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_items_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("items.json"))
}

pub fn read_config(path: &Path) -> anyhow::Result<TagsealConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &TagsealConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("tagseal"));
        }
    }
    Ok(home_dir()?.join(".config").join("tagseal"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("tagseal"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("tagseal"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
