//! Document-store repositories keyed by the dataset's `customerID`.

pub mod contract;
pub mod customer;
pub mod service;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};
use mongodb::Collection;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

use crate::database::manager::{ConnectionManager, DatabaseError, Store};
use crate::database::models::{ContractDocument, CustomerDocument, ServiceDocument};
use crate::database::repository::EntityRepository;
use crate::database::resolver::{Field, FieldSet};

pub type CustomerDocuments = MongoRepository<CustomerDocument>;
pub type ContractDocuments = MongoRepository<ContractDocument>;
pub type ServiceDocuments = MongoRepository<ServiceDocument>;

/// Binds a document struct to its collection
pub trait DocumentEntity: Serialize + DeserializeOwned + Unpin + Send + Sync + 'static {
    type Patch: DeserializeOwned + Send + 'static;
    type Field: Field;

    const ENTITY: &'static str;
    const COLLECTION: &'static str;

    /// Store-assigned `_id` slot
    fn object_id_mut(&mut self) -> &mut Option<ObjectId>;

    fn changes(patch: Self::Patch) -> FieldSet<Self::Field>;
}

/// Filter selecting the document(s) of one customer
pub fn by_customer(customer_id: &str) -> Document {
    doc! { "customerID": customer_id }
}

pub(crate) fn page_options(skip: i64, limit: i64) -> FindOptions {
    FindOptions::builder()
        .sort(doc! { "customerID": 1 })
        .skip(skip.max(0) as u64)
        .limit(limit)
        .build()
}

pub struct MongoRepository<T> {
    db: Arc<ConnectionManager>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for MongoRepository<T> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: DocumentEntity> MongoRepository<T> {
    pub fn new(db: Arc<ConnectionManager>) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    fn collection(&self) -> Collection<T> {
        self.db.collection::<T>(T::COLLECTION)
    }

    /// Equality search over the entity's fields, paged like `list`
    pub async fn find_matching(
        &self,
        criteria: &FieldSet<T::Field>,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<T>, DatabaseError> {
        let filter = criteria.to_document();
        debug!("Searching {}: {}", T::COLLECTION, filter);
        let cursor = self.collection().find(filter, page_options(skip, limit)).await?;
        Ok(cursor.try_collect().await?)
    }
}

#[async_trait]
impl<T: DocumentEntity> EntityRepository for MongoRepository<T> {
    type Key = String;
    type Record = T;
    type Create = T;
    type Patch = T::Patch;

    const ENTITY: &'static str = T::ENTITY;

    async fn create(&self, mut record: T) -> Result<T, DatabaseError> {
        *record.object_id_mut() = None;
        let inserted = self.collection().insert_one(&record, None).await?;
        *record.object_id_mut() = inserted.inserted_id.as_object_id();
        self.db.record_write(Store::Document);
        Ok(record)
    }

    async fn get(&self, customer_id: &String) -> Result<Option<T>, DatabaseError> {
        Ok(self.collection().find_one(by_customer(customer_id), None).await?)
    }

    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<T>, DatabaseError> {
        let cursor = self.collection().find(None, page_options(skip, limit)).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn update(&self, customer_id: &String, patch: T::Patch) -> Result<Option<T>, DatabaseError> {
        let changes = T::changes(patch);
        let Some(update) = changes.set_document() else {
            debug!("{} {}: no fields supplied, returning current document", T::ENTITY, customer_id);
            return self.get(customer_id).await;
        };

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        let updated = self
            .collection()
            .find_one_and_update(by_customer(customer_id), update, options)
            .await?;
        if updated.is_some() {
            self.db.record_write(Store::Document);
        }
        Ok(updated)
    }

    async fn delete(&self, customer_id: &String) -> Result<bool, DatabaseError> {
        let result = self.collection().delete_one(by_customer(customer_id), None).await?;
        let deleted = result.deleted_count > 0;
        if deleted {
            self.db.record_write(Store::Document);
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::Bson;

    #[test]
    fn pages_sort_by_customer_id() {
        let options = page_options(20, 10);
        assert_eq!(options.sort, Some(doc! { "customerID": 1 }));
        assert_eq!(options.skip, Some(20));
        assert_eq!(options.limit, Some(10));
    }

    #[test]
    fn customer_filter_is_exact_match() {
        assert_eq!(
            by_customer("7590-VHVEG").get("customerID"),
            Some(&Bson::String("7590-VHVEG".into()))
        );
    }
}
