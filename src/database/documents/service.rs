use mongodb::bson::oid::ObjectId;

use crate::database::models::{ServiceDocument, ServiceDocumentPatch, ServiceField};
use crate::database::resolver::FieldSet;

use super::DocumentEntity;

impl DocumentEntity for ServiceDocument {
    type Patch = ServiceDocumentPatch;
    type Field = ServiceField;

    const ENTITY: &'static str = "Service";
    const COLLECTION: &'static str = "services";

    fn object_id_mut(&mut self) -> &mut Option<ObjectId> {
        &mut self.id
    }

    fn changes(patch: ServiceDocumentPatch) -> FieldSet<ServiceField> {
        patch.into_field_set()
    }
}
