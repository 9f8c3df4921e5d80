use tagseal_core::{Command, CommandOutcome};

use crate::app::open_session;
use crate::cli::Cli;
use crate::helpers::new_password;
use crate::output::rekey_failures;

pub async fn handle_passwd(cli: &Cli) -> anyhow::Result<()> {
    let mut open = open_session(cli).await?;
    let password = new_password(cli.no_input)?;

    let outcome = open
        .session
        .handle(Command::PasswordChanged(password))
        .await?;
    let CommandOutcome::Rekeyed(change) = outcome else {
        return Err(anyhow::anyhow!("Password change did not run a rekey pass"));
    };
    open.submit()?;

    if !cli.quiet {
        println!("Re-encrypted {} item(s)", change.report.rekeyed.len());
    }
    if !change.committed {
        eprintln!("Warning: the new password did not take effect; previously readable items failed to re-encrypt.");
    }
    if change.report.success {
        return Ok(());
    }

    for line in rekey_failures(open.session.items(), &change) {
        eprintln!("{}", line);
    }
    Err(anyhow::anyhow!(
        "{} item(s) could not be re-encrypted and were left unchanged",
        change.report.failures.len()
    ))
}
