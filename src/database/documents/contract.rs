use mongodb::bson::oid::ObjectId;

use crate::database::models::{ContractDocument, ContractDocumentPatch, ContractField};
use crate::database::resolver::FieldSet;

use super::DocumentEntity;

impl DocumentEntity for ContractDocument {
    type Patch = ContractDocumentPatch;
    type Field = ContractField;

    const ENTITY: &'static str = "Contract";
    const COLLECTION: &'static str = "contracts";

    fn object_id_mut(&mut self) -> &mut Option<ObjectId> {
        &mut self.id
    }

    fn changes(patch: ContractDocumentPatch) -> FieldSet<ContractField> {
        patch.into_field_set()
    }
}
