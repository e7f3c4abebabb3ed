use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbOwner, DbProfile};
use crate::error::AppError;

/// Unified database connector that supports different profiles and owners.
/// This function does NOT run any migrations.
pub async fn connect_db(
    profile: DbProfile,
    owner: DbOwner,
) -> Result<DatabaseConnection, AppError> {
    let database_url = db_url(profile, owner)?;

    let conn = Database::connect(&database_url).await?;
    Ok(conn)
}

/// Single entrypoint used at startup: migrate the schema with owner
/// credentials, then hand back an app-level connection.
pub async fn bootstrap_db(profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    let owner_conn = connect_db(profile.clone(), DbOwner::Owner).await?;
    Migrator::up(&owner_conn, None)
        .await
        .map_err(AppError::from)?;
    info!("database schema is up to date");

    connect_db(profile, DbOwner::App).await
}
