use crate::app::open_session;
use crate::cli::Cli;
use crate::output::status_label;

pub async fn handle_check(cli: &Cli) -> anyhow::Result<()> {
    let open = open_session(cli).await?;
    let failures = open.load_report.failures();

    if failures.is_empty() {
        if !cli.quiet {
            println!(
                "Check: OK ({} items open under the current password)",
                open.session.items().len()
            );
        }
        return Ok(());
    }

    eprintln!("Check: FAILED");
    for (position, item) in open.session.items().iter().enumerate() {
        let status = open.load_report.status(item.id);
        if failures.iter().any(|failure| failure.item_id == item.id) {
            eprintln!("- item {}: {}", position + 1, status_label(status));
        }
    }
    eprintln!("Hint: Set TAGSEAL_PASSWORD to the password these items were sealed with.");
    Err(anyhow::anyhow!(
        "{} item(s) do not open under the current password",
        failures.len()
    ))
}
