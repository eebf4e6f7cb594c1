pub mod contract;
pub mod customer;
pub mod profile;
pub mod service;

pub use contract::{Contract, ContractDocument, ContractDocumentPatch, ContractField, ContractPatch, NewContract};
pub use customer::{
    Customer, CustomerDocument, CustomerDocumentPatch, CustomerField, CustomerPatch, CustomerSearch, NewCustomer,
};
pub use profile::CustomerProfile;
pub use service::{NewService, Service, ServiceDocument, ServiceDocumentPatch, ServiceField, ServicePatch};

use mongodb::bson::oid::ObjectId;
use serde::Serializer;

/// Render a document `_id` as its hex string in API responses
pub(crate) fn object_id_as_hex<S>(id: &Option<ObjectId>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match id {
        Some(oid) => serializer.serialize_str(&oid.to_hex()),
        None => serializer.serialize_none(),
    }
}
