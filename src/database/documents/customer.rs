use mongodb::bson::oid::ObjectId;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    ContractDocument, CustomerDocument, CustomerDocumentPatch, CustomerField, CustomerProfile, ServiceDocument,
};
use crate::database::resolver::FieldSet;

use super::{by_customer, DocumentEntity, MongoRepository};

impl DocumentEntity for CustomerDocument {
    type Patch = CustomerDocumentPatch;
    type Field = CustomerField;

    const ENTITY: &'static str = "Customer";
    const COLLECTION: &'static str = "customers";

    fn object_id_mut(&mut self) -> &mut Option<ObjectId> {
        &mut self.id
    }

    fn changes(patch: CustomerDocumentPatch) -> FieldSet<CustomerField> {
        patch.into_field_set()
    }
}

impl MongoRepository<CustomerDocument> {
    /// Customer together with its contract and service documents.
    ///
    /// `None` only when the customer itself is missing.
    pub async fn get_complete(&self, customer_id: &str) -> Result<Option<CustomerProfile>, DatabaseError> {
        let customers = self.db.collection::<CustomerDocument>(CustomerDocument::COLLECTION);
        let contracts = self.db.collection::<ContractDocument>(ContractDocument::COLLECTION);
        let services = self.db.collection::<ServiceDocument>(ServiceDocument::COLLECTION);

        let (customer, contract, service) = futures::try_join!(
            customers.find_one(by_customer(customer_id), None),
            contracts.find_one(by_customer(customer_id), None),
            services.find_one(by_customer(customer_id), None),
        )?;

        Ok(customer.map(|customer| CustomerProfile {
            customer,
            contract,
            service,
        }))
    }

    pub async fn search(
        &self,
        criteria: &FieldSet<CustomerField>,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<CustomerDocument>, DatabaseError> {
        self.find_matching(criteria, skip, limit).await
    }
}
