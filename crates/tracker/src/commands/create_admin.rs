//! Create-admin command - Seeds an administrator account.
//!
//! Registration over HTTP requires an admin, so the first one is created
//! from the command line.

use std::sync::Arc;

use common::AppResult;

use crate::cli::args::CreateAdminArgs;
use crate::config::TrackerConfig;
use crate::infra::{Database, Persistence};
use crate::services::Authenticator;

/// Execute the create-admin command
pub async fn execute(args: CreateAdminArgs, config: TrackerConfig) -> AppResult<()> {
    let db = Database::connect(&config.database).await?;
    let uow = Arc::new(Persistence::new(db.get_connection()));

    let admin = Authenticator::new(uow, config.jwt)
        .bootstrap_admin(args.username, args.password)
        .await?;

    println!("Created admin '{}' ({})", admin.username, admin.id);
    Ok(())
}
