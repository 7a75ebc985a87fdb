//! User Service Library
//!
//! Persistence access for users: creation with salted password hashes,
//! lookups with adverts and messages expanded, pagination, contact updates,
//! and append-only advert/message references.

pub mod commands;
pub mod config;
pub mod infra;
pub mod repository;

use std::sync::Arc;

use tracing::info;

use common::AppResult;
use domain::Argon2Encryption;

use crate::config::UserServiceConfig;
use crate::infra::Database;
use crate::repository::UserStore;

/// Connect to the store, apply pending migrations and build the repository.
pub async fn connect_repository(config: &UserServiceConfig) -> AppResult<UserStore> {
    let db = Database::connect(&config.database).await?;
    Ok(UserStore::new(
        db.get_connection(),
        Arc::new(Argon2Encryption::new()),
    ))
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> AppResult<()> {
    let config = UserServiceConfig::from_env();
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!("Resetting database and running all migrations");
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
