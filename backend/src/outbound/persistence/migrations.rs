//! Schema migrations and first-run seeding.
//!
//! Runs once at startup on a plain synchronous connection, before the async
//! pool is built.

use std::path::Path;

use chrono::{DateTime, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use mockable::{Clock, DefaultClock};
use tracing::{debug, info};

use super::models::NewUserRow;
use super::schema::users;

/// Embedded migrations from the backend/migrations directory.
const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Users created when the store holds none, in creation order.
pub const SEED_USERNAMES: [&str; 3] = ["alice", "bob", "carol"];

/// Failures while preparing the database file.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseSetupError {
    #[error("failed to open database {path}: {message}")]
    Open { path: String, message: String },
    #[error("failed to apply migrations: {message}")]
    Migrate { message: String },
    #[error("failed to seed users: {0}")]
    Seed(#[from] diesel::result::Error),
}

/// Apply pending migrations to the SQLite file at `path` and seed the
/// default users when the `users` table is empty.
///
/// # Errors
///
/// Returns [`DatabaseSetupError`] when the file cannot be opened, a
/// migration fails, or seeding fails.
pub fn prepare_database(path: &Path) -> Result<(), DatabaseSetupError> {
    prepare_database_with_clock(path, &DefaultClock)
}

/// As [`prepare_database`], stamping seeded users with `clock`.
pub fn prepare_database_with_clock(
    path: &Path,
    clock: &dyn Clock,
) -> Result<(), DatabaseSetupError> {
    let url = path.to_string_lossy();
    let mut conn =
        SqliteConnection::establish(&url).map_err(|err| DatabaseSetupError::Open {
            path: url.to_string(),
            message: err.to_string(),
        })?;
    conn.batch_execute("PRAGMA foreign_keys = ON;")
        .map_err(|err| DatabaseSetupError::Open {
            path: url.to_string(),
            message: err.to_string(),
        })?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| DatabaseSetupError::Migrate {
            message: err.to_string(),
        })?;
    debug!(count = applied.len(), "applied pending migrations");

    let seeded = seed_users(&mut conn, clock.utc())?;
    if seeded > 0 {
        info!(count = seeded, "seeded default users into empty store");
    }
    Ok(())
}

/// Insert [`SEED_USERNAMES`] when no user exists. Returns the number of rows
/// written.
fn seed_users(
    conn: &mut SqliteConnection,
    now: DateTime<Utc>,
) -> Result<usize, diesel::result::Error> {
    // An immediate transaction takes the write lock before the emptiness
    // check, so two processes starting together cannot both seed.
    conn.immediate_transaction(|conn| {
        let existing: i64 = users::table.count().get_result(conn)?;
        if existing > 0 {
            return Ok(0);
        }
        let mut written = 0;
        for username in SEED_USERNAMES {
            written += diesel::insert_into(users::table)
                .values(NewUserRow {
                    username,
                    created_at: now.naive_utc(),
                })
                .execute(conn)?;
        }
        Ok(written)
    })
}
