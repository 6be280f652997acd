//! PostgreSQL-backed `UserRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Alias, ExternalId, NewUser, User, UserDraft, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

/// Convert a stored row into a domain user, re-validating text columns.
pub(super) fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let UserRow {
        id,
        external_id,
        alias,
        points,
        is_admin,
    } = row;

    let external_id =
        ExternalId::new(external_id).map_err(|err| UserPersistenceError::query(err.to_string()))?;
    let alias = alias
        .map(Alias::new)
        .transpose()
        .map_err(|err| UserPersistenceError::query(err.to_string()))?;
    let points = u64::try_from(points)
        .map_err(|_| UserPersistenceError::query(format!("negative points for user {id}")))?;

    Ok(User::from(UserDraft {
        id: UserId::from(id),
        external_id,
        alias,
        points,
        is_admin,
    }))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn get_or_create(&self, user: &NewUser) -> Result<(User, bool), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            id: *user.id().as_uuid(),
            external_id: user.external_id().as_ref(),
            is_admin: user.is_admin(),
        };

        // The unique constraint settles races between concurrent first contacts.
        let inserted = diesel::insert_into(users::table)
            .values(&row)
            .on_conflict(users::external_id)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let stored = users::table
            .filter(users::external_id.eq(user.external_id().as_ref()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok((row_to_user(stored)?, inserted == 1))
    }

    async fn find_by_external_id(
        &self,
        external_id: &ExternalId,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::external_id.eq(external_id.as_ref()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn set_alias(
        &self,
        id: &UserId,
        alias: &Alias,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(users::table.find(*id.as_uuid()))
            .set(users::alias.eq(alias.as_ref()))
            .returning(UserRow::as_returning())
            .get_result::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user).transpose()
    }
}
