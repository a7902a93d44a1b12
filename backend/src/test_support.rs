//! Test utilities for the backend crate.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is only compiled when running tests or
//! with the `test-support` feature.

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

/// Fixed instant used by [`FixtureClock`]: 2024-01-01T10:30:00Z.
pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 10, 30, 0)
        .single()
        .unwrap_or_else(|| panic!("fixture timestamp must be unambiguous"))
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixtureClock(DateTime<Utc>);

impl FixtureClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self(now)
    }
}

impl Default for FixtureClock {
    fn default() -> Self {
        Self(fixture_timestamp())
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub mod sqlite {
    //! Throwaway SQLite databases for adapter and HTTP tests.

    use std::path::PathBuf;

    use tempfile::TempDir;

    use crate::outbound::persistence::{DbPool, PoolConfig, prepare_database};

    /// A migrated and seeded database file removed on drop.
    pub struct TempDatabase {
        pool: DbPool,
        path: PathBuf,
        _dir: TempDir,
    }

    impl TempDatabase {
        /// Create, migrate and seed a fresh database, then open a pool on it.
        ///
        /// Panics when any step fails; intended for tests only.
        pub async fn new() -> Self {
            let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("temp dir: {err}"));
            let path = dir.path().join("fitness.db");
            prepare_database(&path).unwrap_or_else(|err| panic!("prepare database: {err}"));
            let pool = DbPool::new(PoolConfig::new(&path).with_max_size(4))
                .await
                .unwrap_or_else(|err| panic!("open pool: {err}"));
            Self {
                pool,
                path,
                _dir: dir,
            }
        }

        pub fn pool(&self) -> DbPool {
            self.pool.clone()
        }

        pub fn path(&self) -> &std::path::Path {
            &self.path
        }
    }
}
