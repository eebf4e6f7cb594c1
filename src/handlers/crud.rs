//! Store-agnostic CRUD handlers, instantiated per repository in the route tables.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRef, Path, Query, State};
use axum::Json;
use tracing::debug;

use crate::api::{AppState, MessageResponse, PageLimits, PageQuery};
use crate::database::{EntityRepository, OwnedRepository};
use crate::error::ApiError;

pub(crate) fn not_found<R: EntityRepository>() -> ApiError {
    ApiError::not_found(format!("{} not found", R::ENTITY))
}

/// POST collection - create a record
pub async fn create<R>(
    State(repo): State<R>,
    payload: Result<Json<R::Create>, JsonRejection>,
) -> Result<Json<R::Record>, ApiError>
where
    R: EntityRepository + FromRef<AppState>,
{
    let Json(fields) = payload?;
    let record = repo
        .create(fields)
        .await
        .map_err(|e| ApiError::rejected("create", R::ENTITY, e))?;
    Ok(Json(record))
}

/// GET collection - one page in identifier order
pub async fn list<R>(
    State(repo): State<R>,
    State(limits): State<PageLimits>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Vec<R::Record>>, ApiError>
where
    R: EntityRepository + FromRef<AppState>,
{
    let Query(query) = query?;
    let page = limits.resolve_query(query)?;
    debug!("Listing {}: skip={} limit={}", R::ENTITY, page.skip, page.limit);
    Ok(Json(repo.list(page.skip, page.limit).await?))
}

/// GET item
pub async fn get<R>(
    State(repo): State<R>,
    id: Result<Path<R::Key>, PathRejection>,
) -> Result<Json<R::Record>, ApiError>
where
    R: EntityRepository + FromRef<AppState>,
{
    let Path(id) = id?;
    repo.get(&id).await?.map(Json).ok_or_else(not_found::<R>)
}

/// PUT item - partial update; absent fields are left unchanged
pub async fn update<R>(
    State(repo): State<R>,
    id: Result<Path<R::Key>, PathRejection>,
    payload: Result<Json<R::Patch>, JsonRejection>,
) -> Result<Json<R::Record>, ApiError>
where
    R: EntityRepository + FromRef<AppState>,
{
    let Path(id) = id?;
    let Json(patch) = payload?;
    repo.update(&id, patch)
        .await
        .map_err(|e| ApiError::rejected("update", R::ENTITY, e))?
        .map(Json)
        .ok_or_else(not_found::<R>)
}

/// DELETE item
pub async fn delete<R>(
    State(repo): State<R>,
    id: Result<Path<R::Key>, PathRejection>,
) -> Result<MessageResponse, ApiError>
where
    R: EntityRepository + FromRef<AppState>,
{
    let Path(id) = id?;
    if repo.delete(&id).await? {
        Ok(MessageResponse::new(format!("{} deleted successfully", R::ENTITY)))
    } else {
        Err(not_found::<R>())
    }
}

/// GET records owned by one customer
pub async fn list_by_owner<R>(
    State(repo): State<R>,
    customer_id: Result<Path<R::Key>, PathRejection>,
) -> Result<Json<Vec<R::Record>>, ApiError>
where
    R: OwnedRepository + FromRef<AppState>,
{
    let Path(customer_id) = customer_id?;
    Ok(Json(repo.list_by_owner(&customer_id).await?))
}
