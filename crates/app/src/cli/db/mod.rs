//! `bazaar-app db ...`

use clap::{Args, Subcommand};

mod ensure_app_role;

/// Database administration
#[derive(Debug, Args)]
pub(crate) struct DbCommand {
    #[command(subcommand)]
    action: DbAction,
}

#[derive(Debug, Subcommand)]
enum DbAction {
    /// Create or update the row-level-security-bound role the API connects as
    EnsureAppRole(ensure_app_role::EnsureAppRoleArgs),
}

pub(crate) async fn run(command: DbCommand) -> Result<(), String> {
    match command.action {
        DbAction::EnsureAppRole(args) => ensure_app_role::run(args).await,
    }
}
