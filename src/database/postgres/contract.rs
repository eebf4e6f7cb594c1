use crate::database::models::{Contract, ContractField, ContractPatch, NewContract};
use crate::database::resolver::FieldSet;

use super::{PgEntity, PgOwned, PgQueryAs};

impl PgEntity for Contract {
    type Create = NewContract;
    type Patch = ContractPatch;
    type Field = ContractField;

    const ENTITY: &'static str = "Contract";
    const TABLE: &'static str = "contracts";
    const KEY: &'static str = "contract_id";
    const COLUMNS: &'static str = "contract_id, customer_id, contract_type, paperless_billing, payment_method, \
         monthly_charges, total_charges, churn";
    const INSERT: &'static str = "INSERT INTO contracts (customer_id, contract_type, paperless_billing, payment_method, \
         monthly_charges, total_charges, churn) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         RETURNING contract_id, customer_id, contract_type, paperless_billing, payment_method, \
         monthly_charges, total_charges, churn";

    fn bind_create<'q>(query: PgQueryAs<'q, Self>, c: NewContract) -> PgQueryAs<'q, Self> {
        query
            .bind(c.customer_id)
            .bind(c.contract_type)
            .bind(c.paperless_billing)
            .bind(c.payment_method)
            .bind(c.monthly_charges)
            .bind(c.total_charges)
            .bind(c.churn)
    }

    fn changes(patch: ContractPatch) -> FieldSet<ContractField> {
        patch.into_field_set()
    }
}

impl PgOwned for Contract {
    const OWNER: &'static str = "customer_id";
}
