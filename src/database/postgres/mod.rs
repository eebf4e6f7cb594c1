//! Relational repositories: one generic implementation, one table binding per entity.

pub mod contract;
pub mod customer;
pub mod service;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, PgConnection, Postgres};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

use crate::database::manager::{ConnectionManager, DatabaseError, Store};
use crate::database::models::{Contract, Customer, Service};
use crate::database::repository::{EntityRepository, OwnedRepository};
use crate::database::resolver::{Field, FieldSet};

pub type PgQueryAs<'q, T> = QueryAs<'q, Postgres, T, PgArguments>;

pub type CustomerRepository = PgRepository<Customer>;
pub type ContractRepository = PgRepository<Contract>;
pub type ServiceRepository = PgRepository<Service>;

/// Binds an entity struct to its table
pub trait PgEntity: for<'r> FromRow<'r, PgRow> + Serialize + Send + Sync + Unpin + 'static {
    type Create: DeserializeOwned + Send + 'static;
    type Patch: DeserializeOwned + Send + 'static;
    type Field: Field;

    const ENTITY: &'static str;
    const TABLE: &'static str;
    /// Surrogate key column, integer, assigned by the store
    const KEY: &'static str;
    /// Column list used for SELECT and RETURNING
    const COLUMNS: &'static str;
    /// Parameterised INSERT ... RETURNING, bound by [`PgEntity::bind_create`]
    const INSERT: &'static str;

    fn bind_create<'q>(query: PgQueryAs<'q, Self>, fields: Self::Create) -> PgQueryAs<'q, Self>;

    fn changes(patch: Self::Patch) -> FieldSet<Self::Field>;
}

/// Entities carrying a `customer_id` foreign key
pub trait PgOwned: PgEntity {
    const OWNER: &'static str;
}

/// Insert on an existing connection, returning the stored row
pub async fn insert<T: PgEntity>(conn: &mut PgConnection, fields: T::Create) -> Result<T, DatabaseError> {
    let row = T::bind_create(sqlx::query_as::<_, T>(T::INSERT), fields)
        .fetch_one(conn)
        .await?;
    Ok(row)
}

pub struct PgRepository<T> {
    db: Arc<ConnectionManager>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for PgRepository<T> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: PgEntity> PgRepository<T> {
    pub fn new(db: Arc<ConnectionManager>) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    fn select_by(column: &str) -> String {
        format!(
            "SELECT {} FROM \"{}\" WHERE \"{}\" = $1 ORDER BY \"{}\"",
            T::COLUMNS,
            T::TABLE,
            column,
            T::KEY
        )
    }
}

#[async_trait]
impl<T: PgEntity> EntityRepository for PgRepository<T> {
    type Key = i32;
    type Record = T;
    type Create = T::Create;
    type Patch = T::Patch;

    const ENTITY: &'static str = T::ENTITY;

    async fn create(&self, fields: T::Create) -> Result<T, DatabaseError> {
        let mut cursor = self.db.scoped_cursor().await?;
        let result = insert::<T>(cursor.conn(), fields).await;
        let record = cursor.complete(result).await?;
        self.db.record_write(Store::Relational);
        Ok(record)
    }

    async fn get(&self, id: &i32) -> Result<Option<T>, DatabaseError> {
        let sql = Self::select_by(T::KEY);
        let mut cursor = self.db.scoped_cursor().await?;
        let result = sqlx::query_as::<_, T>(&sql)
            .bind(*id)
            .fetch_optional(cursor.conn())
            .await
            .map_err(DatabaseError::from);
        cursor.complete(result).await
    }

    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<T>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM \"{}\" ORDER BY \"{}\" OFFSET $1 LIMIT $2",
            T::COLUMNS,
            T::TABLE,
            T::KEY
        );
        let mut cursor = self.db.scoped_cursor().await?;
        let result = sqlx::query_as::<_, T>(&sql)
            .bind(skip)
            .bind(limit)
            .fetch_all(cursor.conn())
            .await
            .map_err(DatabaseError::from);
        cursor.complete(result).await
    }

    async fn update(&self, id: &i32, patch: T::Patch) -> Result<Option<T>, DatabaseError> {
        let changes = T::changes(patch);
        let Some(sql) = changes.update_statement(T::TABLE, T::KEY, T::COLUMNS) else {
            debug!("{} {}: no fields supplied, returning current record", T::ENTITY, id);
            return self.get(id).await;
        };

        debug!(
            "Updating {} {}: fields={:?}",
            T::ENTITY,
            id,
            changes.fields().map(|f| f.column()).collect::<Vec<_>>()
        );

        let mut cursor = self.db.scoped_cursor().await?;
        let result = changes
            .bind(sqlx::query_as::<_, T>(&sql))
            .bind(*id)
            .fetch_optional(cursor.conn())
            .await
            .map_err(DatabaseError::from);
        let record = cursor.complete(result).await?;
        if record.is_some() {
            self.db.record_write(Store::Relational);
        }
        Ok(record)
    }

    async fn delete(&self, id: &i32) -> Result<bool, DatabaseError> {
        let sql = format!("DELETE FROM \"{}\" WHERE \"{}\" = $1", T::TABLE, T::KEY);
        let mut cursor = self.db.scoped_cursor().await?;
        let result = sqlx::query(&sql)
            .bind(*id)
            .execute(cursor.conn())
            .await
            .map_err(DatabaseError::from);
        let done = cursor.complete(result).await?;
        let deleted = done.rows_affected() > 0;
        if deleted {
            self.db.record_write(Store::Relational);
        }
        Ok(deleted)
    }
}

#[async_trait]
impl<T: PgOwned> OwnedRepository for PgRepository<T> {
    async fn list_by_owner(&self, customer_id: &i32) -> Result<Vec<T>, DatabaseError> {
        let sql = Self::select_by(T::OWNER);
        let mut cursor = self.db.scoped_cursor().await?;
        let result = sqlx::query_as::<_, T>(&sql)
            .bind(*customer_id)
            .fetch_all(cursor.conn())
            .await
            .map_err(DatabaseError::from);
        cursor.complete(result).await
    }
}
