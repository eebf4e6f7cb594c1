use crate::database::models::{Customer, CustomerField, CustomerPatch, NewCustomer};
use crate::database::resolver::FieldSet;

use super::{PgEntity, PgQueryAs};

impl PgEntity for Customer {
    type Create = NewCustomer;
    type Patch = CustomerPatch;
    type Field = CustomerField;

    const ENTITY: &'static str = "Customer";
    const TABLE: &'static str = "customers";
    const KEY: &'static str = "customer_id";
    const COLUMNS: &'static str =
        "customer_id, customer_name, gender, senior_citizen, partner, dependents, tenure, phone_service";
    const INSERT: &'static str = "INSERT INTO customers (customer_name, gender, senior_citizen, partner, dependents, tenure, phone_service) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         RETURNING customer_id, customer_name, gender, senior_citizen, partner, dependents, tenure, phone_service";

    fn bind_create<'q>(query: PgQueryAs<'q, Self>, c: NewCustomer) -> PgQueryAs<'q, Self> {
        query
            .bind(c.customer_name)
            .bind(c.gender)
            .bind(c.senior_citizen)
            .bind(c.partner)
            .bind(c.dependents)
            .bind(c.tenure)
            .bind(c.phone_service)
    }

    fn changes(patch: CustomerPatch) -> FieldSet<CustomerField> {
        patch.into_field_set()
    }
}
