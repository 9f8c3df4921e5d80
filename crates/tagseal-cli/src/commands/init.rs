use crate::app::resolve_config_path;
use crate::cli::{Cli, InitArgs};
use crate::config::{default_items_path, write_config, TagsealConfig};
use crate::helpers::generate_salt;
use crate::store::ItemStore;

pub fn handle_init(cli: &Cli, args: &InitArgs) -> anyhow::Result<()> {
    let config_path = resolve_config_path(cli)?;
    if config_path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Config already exists at {}. Use --force to overwrite.",
            config_path.display()
        ));
    }

    let salt = match args.salt.as_deref() {
        Some(salt) if !salt.is_empty() => salt.to_string(),
        Some(_) => return Err(anyhow::anyhow!("Salt cannot be empty")),
        None => generate_salt()?,
    };
    let items_path = match cli.items.as_deref() {
        Some(path) if !path.trim().is_empty() => path.into(),
        _ => default_items_path()?,
    };

    let config = TagsealConfig::new(salt, args.default_password.clone(), items_path.clone());
    write_config(&config_path, &config)?;

    let store = ItemStore::new(&items_path);
    if !store.exists() {
        store.save(&[])?;
    }

    if !cli.quiet {
        println!("Initialized tagseal config at {}", config_path.display());
        println!("Items: {}", items_path.display());
    }
    Ok(())
}
