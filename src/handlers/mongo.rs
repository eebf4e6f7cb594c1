use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use tracing::debug;

use crate::api::{AppState, PageLimits};
use crate::database::models::{CustomerDocument, CustomerProfile, CustomerSearch};
use crate::database::{ContractDocuments, CustomerDocuments, ServiceDocuments};
use crate::error::ApiError;

use super::crud;

pub fn routes() -> Router<AppState> {
    Router::new()
        // Customers
        .route(
            "/api/mongodb/customers/",
            get(crud::list::<CustomerDocuments>).post(crud::create::<CustomerDocuments>),
        )
        .route("/api/mongodb/customers/search/", get(search_customers))
        .route(
            "/api/mongodb/customers/:customer_id",
            get(crud::get::<CustomerDocuments>)
                .put(crud::update::<CustomerDocuments>)
                .delete(crud::delete::<CustomerDocuments>),
        )
        .route("/api/mongodb/customers/:customer_id/complete", get(customer_complete))
        // Contracts
        .route(
            "/api/mongodb/contracts/",
            get(crud::list::<ContractDocuments>).post(crud::create::<ContractDocuments>),
        )
        .route(
            "/api/mongodb/contracts/:customer_id",
            get(crud::get::<ContractDocuments>)
                .put(crud::update::<ContractDocuments>)
                .delete(crud::delete::<ContractDocuments>),
        )
        // Services
        .route(
            "/api/mongodb/services/",
            get(crud::list::<ServiceDocuments>).post(crud::create::<ServiceDocuments>),
        )
        .route(
            "/api/mongodb/services/:customer_id",
            get(crud::get::<ServiceDocuments>)
                .put(crud::update::<ServiceDocuments>)
                .delete(crud::delete::<ServiceDocuments>),
        )
}

/// GET /api/mongodb/customers/:customer_id/complete - customer with contract and service
async fn customer_complete(
    State(repo): State<CustomerDocuments>,
    customer_id: Result<Path<String>, PathRejection>,
) -> Result<Json<CustomerProfile>, ApiError> {
    let Path(customer_id) = customer_id?;
    repo.get_complete(&customer_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Customer not found"))
}

/// GET /api/mongodb/customers/search/ - equality search over customer fields
async fn search_customers(
    State(repo): State<CustomerDocuments>,
    State(limits): State<PageLimits>,
    query: Result<Query<CustomerSearch>, QueryRejection>,
) -> Result<Json<Vec<CustomerDocument>>, ApiError> {
    let Query(search) = query?;
    let page = limits.resolve(search.skip, search.limit)?;
    let criteria = search.criteria();
    debug!("Customer search over {} field(s)", criteria.len());
    Ok(Json(repo.search(&criteria, page.skip, page.limit).await?))
}
