//! Connection and migration helpers.

use crate::DatabaseResult;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use picturebook_error::{DatabaseError, DatabaseErrorKind};

/// Migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Establish a connection to the PostgreSQL database.
///
/// Uses `database_url` when given, otherwise the `DATABASE_URL` environment
/// variable.
///
/// # Errors
///
/// Returns an error if no URL is available or the connection fails.
pub fn establish_connection(database_url: Option<&str>) -> DatabaseResult<PgConnection> {
    let database_url = match database_url {
        Some(url) if !url.trim().is_empty() => url.to_string(),
        _ => std::env::var("DATABASE_URL").map_err(|_| {
            DatabaseError::new(DatabaseErrorKind::Connection(
                "DATABASE_URL environment variable not set".to_string(),
            ))
        })?,
    };

    PgConnection::establish(&database_url)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))
}

/// Apply any pending migrations and return how many ran.
pub fn run_migrations(conn: &mut PgConnection) -> DatabaseResult<usize> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Migration(e.to_string())))?;
    if !applied.is_empty() {
        tracing::info!(count = applied.len(), "Applied database migrations");
    }
    Ok(applied.len())
}
