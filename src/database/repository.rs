use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;

use crate::database::manager::DatabaseError;

/// CRUD contract shared by every entity in both stores.
///
/// Absence is a value: `get` and `update` return `Ok(None)`, `delete`
/// returns `Ok(false)`. Errors are store failures only.
#[async_trait]
pub trait EntityRepository: Clone + Send + Sync + 'static {
    type Key: DeserializeOwned + Display + Send + Sync + 'static;
    type Record: Serialize + Send + 'static;
    type Create: DeserializeOwned + Send + 'static;
    type Patch: DeserializeOwned + Send + 'static;

    /// Entity name used in API messages, e.g. "Customer"
    const ENTITY: &'static str;

    async fn create(&self, fields: Self::Create) -> Result<Self::Record, DatabaseError>;

    async fn get(&self, id: &Self::Key) -> Result<Option<Self::Record>, DatabaseError>;

    /// Records in ascending identifier order. Bounds are the caller's job.
    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<Self::Record>, DatabaseError>;

    /// Write only the fields present in `patch`. An empty patch performs no
    /// write and returns the current record.
    async fn update(&self, id: &Self::Key, patch: Self::Patch) -> Result<Option<Self::Record>, DatabaseError>;

    async fn delete(&self, id: &Self::Key) -> Result<bool, DatabaseError>;
}

/// Entities that belong to a customer and can be listed by owner
#[async_trait]
pub trait OwnedRepository: EntityRepository {
    async fn list_by_owner(&self, customer_id: &Self::Key) -> Result<Vec<Self::Record>, DatabaseError>;
}
