use std::collections::HashMap;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde_json::Value;

use crate::database::models::company::{Company, CompanyDetail, CompanyUpdate, NewCompany};
use crate::filter::CompanySearch;
use crate::middleware::{ApiResponse, ApiResult};
use crate::server::AppState;
use crate::services::CompanyService;
use crate::validation::parse_body;

/// POST /companies - admin only
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Company> {
    let Json(body) = body?;
    let data: NewCompany = parse_body(body, &[])?;

    let company = CompanyService::new(state.pool).create(data).await?;
    Ok(ApiResponse::created("newCompany", company))
}

/// GET /companies - optional name, minEmployees, maxEmployees filters
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> ApiResult<Vec<Company>> {
    let Query(query) = query?;
    let search = CompanySearch::from_query(&query)?;

    let companies = CompanyService::new(state.pool).find_all(&search).await?;
    Ok(ApiResponse::keyed("companies", companies))
}

/// GET /companies/:handle
pub async fn get(State(state): State<AppState>, Path(handle): Path<String>) -> ApiResult<CompanyDetail> {
    let company = CompanyService::new(state.pool).get(&handle).await?;
    Ok(ApiResponse::success(company))
}

/// PATCH /companies/:handle - admin only
pub async fn update(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Company> {
    let Json(body) = body?;
    let data = parse_body::<CompanyUpdate>(body, CompanyUpdate::IMMUTABLE)?.into_values();

    let company = CompanyService::new(state.pool).update(&handle, data).await?;
    Ok(ApiResponse::keyed("company", company))
}

/// DELETE /companies/:handle - admin only
pub async fn remove(State(state): State<AppState>, Path(handle): Path<String>) -> ApiResult<String> {
    let deleted = CompanyService::new(state.pool).remove(&handle).await?;
    Ok(ApiResponse::keyed("deleted", deleted))
}
