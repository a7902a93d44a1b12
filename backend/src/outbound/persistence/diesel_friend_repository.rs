//! SQLite-backed `FriendRepository` implementation using Diesel ORM.
//!
//! Links are stored in the direction they were made. Every read treats
//! `(a, b)` and `(b, a)` as the same link.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{FriendRepository, FriendRepositoryError};
use crate::domain::{NewFriendLink, User, UserId};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewFriendRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{friends, users};

/// Diesel-backed implementation of the [`FriendRepository`] port.
#[derive(Clone)]
pub struct DieselFriendRepository {
    pool: DbPool,
}

impl DieselFriendRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FriendRepositoryError {
    map_basic_pool_error(error, FriendRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> FriendRepositoryError {
    map_basic_diesel_error(
        error,
        FriendRepositoryError::query,
        FriendRepositoryError::connection,
    )
}

#[async_trait]
impl FriendRepository for DieselFriendRepository {
    async fn linked(&self, a: UserId, b: UserId) -> Result<bool, FriendRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let count: i64 = friends::table
            .filter(
                friends::user_id
                    .eq(a.get())
                    .and(friends::friend_id.eq(b.get()))
                    .or(friends::user_id.eq(b.get()).and(friends::friend_id.eq(a.get()))),
            )
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(count > 0)
    }

    async fn insert(&self, link: &NewFriendLink) -> Result<bool, FriendRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewFriendRow {
            user_id: link.user_id.get(),
            friend_id: link.friend_id.get(),
            created_at: link.created_at.naive_utc(),
        };
        match diesel::insert_into(friends::table)
            .values(&row)
            .execute(&mut conn)
            .await
        {
            Ok(_) => Ok(true),
            // The unordered-pair index rejects a link in either direction.
            Err(err) if is_unique_violation(&err) => Ok(false),
            Err(err) => Err(map_diesel_error(err)),
        }
    }

    async fn delete_pair(&self, a: UserId, b: UserId) -> Result<usize, FriendRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(
            friends::table.filter(
                friends::user_id
                    .eq(a.get())
                    .and(friends::friend_id.eq(b.get()))
                    .or(friends::user_id.eq(b.get()).and(friends::friend_id.eq(a.get()))),
            ),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn friends_of(&self, user: UserId) -> Result<Vec<User>, FriendRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let outgoing = friends::table
            .filter(friends::user_id.eq(user.get()))
            .select(friends::friend_id);
        let incoming = friends::table
            .filter(friends::friend_id.eq(user.get()))
            .select(friends::user_id);

        let rows: Vec<UserRow> = users::table
            .filter(users::id.eq_any(outgoing).or(users::id.eq_any(incoming)))
            .order(users::username.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|row| row.into_domain().map_err(FriendRepositoryError::query))
            .collect()
    }
}
