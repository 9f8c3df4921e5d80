//! Item edits: add, remove, select, deselect.

use tagseal_core::{Command, CommandOutcome, ItemId};

use crate::app::{open_session, OpenSession};
use crate::cli::Cli;
use crate::helpers::resolve_indices;

pub async fn handle_add(cli: &Cli, tags: &[String]) -> anyhow::Result<()> {
    let mut open = open_session(cli).await?;
    let mut added = 0;
    for tag in tags {
        match open.session.handle(Command::ItemAdded(tag.clone())).await? {
            CommandOutcome::Ignored => {
                if !cli.quiet {
                    eprintln!("Skipping blank tag");
                }
            }
            _ => added += 1,
        }
    }
    open.submit()?;

    if !cli.quiet {
        println!("Added {} item(s)", added);
    }
    Ok(())
}

pub async fn handle_remove(cli: &Cli, indices: &[usize]) -> anyhow::Result<()> {
    let mut open = open_session(cli).await?;
    let ids = resolve_indices(open.session.items(), indices)?;
    for item_id in dedup(ids) {
        open.session.handle(Command::ItemRemoved(item_id)).await?;
    }
    open.submit()?;

    if !cli.quiet {
        println!("{} item(s) left", open.session.items().len());
    }
    Ok(())
}

pub async fn handle_selection(cli: &Cli, indices: &[usize], selected: bool) -> anyhow::Result<()> {
    let mut open = open_session(cli).await?;
    let ids = dedup(resolve_indices(open.session.items(), indices)?);
    let count = ids.len();
    apply_selection(&mut open, ids, selected).await?;
    open.submit()?;

    if !cli.quiet {
        let verb = if selected { "Selected" } else { "Deselected" };
        println!("{} {} item(s)", verb, count);
    }
    Ok(())
}

async fn apply_selection(
    open: &mut OpenSession,
    ids: Vec<ItemId>,
    selected: bool,
) -> anyhow::Result<()> {
    for item_id in ids {
        open.session
            .handle(Command::SelectionChanged { item_id, selected })
            .await?;
    }
    Ok(())
}

fn dedup(ids: Vec<ItemId>) -> Vec<ItemId> {
    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}
