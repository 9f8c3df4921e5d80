use crate::app::open_session;
use crate::cli::Cli;
use crate::output::{items_json, items_table};

pub async fn handle_show(cli: &Cli, json: bool) -> anyhow::Result<()> {
    let open = open_session(cli).await?;
    let items = open.session.items();

    if json {
        let output = serde_json::to_string_pretty(&items_json(items, &open.load_report))?;
        println!("{}", output);
        return Ok(());
    }

    if items.is_empty() {
        if !cli.quiet {
            println!("No items.");
        }
        return Ok(());
    }
    println!("{}", items_table(items, &open.load_report));
    Ok(())
}
