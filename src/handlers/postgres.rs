use axum::routing::get;
use axum::Router;

use crate::api::AppState;
use crate::database::{ContractRepository, CustomerRepository, ServiceRepository};

use super::crud;

pub fn routes() -> Router<AppState> {
    Router::new()
        // Customers
        .route(
            "/api/postgresql/customers/",
            get(crud::list::<CustomerRepository>).post(crud::create::<CustomerRepository>),
        )
        .route(
            "/api/postgresql/customers/:customer_id",
            get(crud::get::<CustomerRepository>)
                .put(crud::update::<CustomerRepository>)
                .delete(crud::delete::<CustomerRepository>),
        )
        .route(
            "/api/postgresql/customers/:customer_id/contracts/",
            get(crud::list_by_owner::<ContractRepository>),
        )
        .route(
            "/api/postgresql/customers/:customer_id/services/",
            get(crud::list_by_owner::<ServiceRepository>),
        )
        // Contracts
        .route(
            "/api/postgresql/contracts/",
            get(crud::list::<ContractRepository>).post(crud::create::<ContractRepository>),
        )
        .route(
            "/api/postgresql/contracts/:contract_id",
            get(crud::get::<ContractRepository>)
                .put(crud::update::<ContractRepository>)
                .delete(crud::delete::<ContractRepository>),
        )
        // Services
        .route(
            "/api/postgresql/services/",
            get(crud::list::<ServiceRepository>).post(crud::create::<ServiceRepository>),
        )
        .route(
            "/api/postgresql/services/:service_id",
            get(crud::get::<ServiceRepository>)
                .put(crud::update::<ServiceRepository>)
                .delete(crud::delete::<ServiceRepository>),
        )
}
