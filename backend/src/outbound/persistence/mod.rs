//! SQLite persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of domain repository ports
//! backed by a single SQLite file via Diesel, with async access through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! The persistence layer follows these principles:
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Scoped connections**: Each operation checks a connection out of the
//!   pool and returns it on drop, whether the operation succeeds or fails.
//! - **Strongly typed errors**: All database errors are mapped to domain
//!   persistence error types.
//!
//! # Example
//!
//! ```ignore
//! use backend::outbound::persistence::{
//!     DbPool, DieselUserRepository, PoolConfig, prepare_database,
//! };
//!
//! prepare_database("fitness.db".as_ref())?;
//! let pool = DbPool::new(PoolConfig::new("fitness.db")).await?;
//! let repo = DieselUserRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_friend_repository;
mod diesel_goal_repository;
mod diesel_post_repository;
mod diesel_record_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_friend_repository::DieselFriendRepository;
pub use diesel_goal_repository::DieselGoalRepository;
pub use diesel_post_repository::DieselPostRepository;
pub use diesel_record_repository::DieselRecordRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{
    DatabaseSetupError, SEED_USERNAMES, prepare_database, prepare_database_with_clock,
};
pub use pool::{AsyncSqliteConnection, DbPool, PoolConfig, PoolError};
