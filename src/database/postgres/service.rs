use crate::database::models::{NewService, Service, ServiceField, ServicePatch};
use crate::database::resolver::FieldSet;

use super::{PgEntity, PgOwned, PgQueryAs};

impl PgEntity for Service {
    type Create = NewService;
    type Patch = ServicePatch;
    type Field = ServiceField;

    const ENTITY: &'static str = "Service";
    const TABLE: &'static str = "services";
    const KEY: &'static str = "service_id";
    const COLUMNS: &'static str = "service_id, customer_id, internet_service, online_security, online_backup, \
         device_protection, tech_support, streaming_tv, streaming_movies";
    const INSERT: &'static str = "INSERT INTO services (customer_id, internet_service, online_security, online_backup, \
         device_protection, tech_support, streaming_tv, streaming_movies) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         RETURNING service_id, customer_id, internet_service, online_security, online_backup, \
         device_protection, tech_support, streaming_tv, streaming_movies";

    fn bind_create<'q>(query: PgQueryAs<'q, Self>, s: NewService) -> PgQueryAs<'q, Self> {
        query
            .bind(s.customer_id)
            .bind(s.internet_service)
            .bind(s.online_security)
            .bind(s.online_backup)
            .bind(s.device_protection)
            .bind(s.tech_support)
            .bind(s.streaming_tv)
            .bind(s.streaming_movies)
    }

    fn changes(patch: ServicePatch) -> FieldSet<ServiceField> {
        patch.into_field_set()
    }
}

impl PgOwned for Service {
    const OWNER: &'static str = "customer_id";
}
