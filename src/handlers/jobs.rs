use std::collections::HashMap;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde_json::Value;

use crate::database::models::job::{Job, JobUpdate, NewJob};
use crate::error::ApiError;
use crate::filter::JobSearch;
use crate::middleware::{ApiResponse, ApiResult};
use crate::server::AppState;
use crate::services::JobService;
use crate::validation::parse_body;

/// A path id that is not an integer cannot name any job.
fn parse_job_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>()
        .map_err(|_| ApiError::not_found(format!("No job: {}", raw)))
}

/// POST /jobs - admin only
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Job> {
    let Json(body) = body?;
    let data: NewJob = parse_body(body, &[])?;

    let job = JobService::new(state.pool).create(data).await?;
    Ok(ApiResponse::created("newJob", job))
}

/// GET /jobs - optional title, minSalary, hasEquity, company_handle filters
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> ApiResult<Vec<Job>> {
    let Query(query) = query?;
    let search = JobSearch::from_query(&query)?;

    let jobs = JobService::new(state.pool).find_all(&search).await?;
    Ok(ApiResponse::keyed("jobs", jobs))
}

/// GET /jobs/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Job> {
    let id = parse_job_id(&id)?;

    let job = JobService::new(state.pool).get(id).await?;
    Ok(ApiResponse::success(job))
}

/// PATCH /jobs/:id - admin only
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Job> {
    let Json(body) = body?;
    let data = parse_body::<JobUpdate>(body, JobUpdate::IMMUTABLE)?.into_values();
    let id = parse_job_id(&id)?;

    let job = JobService::new(state.pool).update(id, data).await?;
    Ok(ApiResponse::keyed("job", job))
}

/// DELETE /jobs/:id - admin only
pub async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<String> {
    let id = parse_job_id(&id)?;

    let deleted = JobService::new(state.pool).remove(id).await?;
    Ok(ApiResponse::keyed("deleted", deleted.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_ids() {
        assert_eq!(parse_job_id("42").unwrap(), 42);
    }

    #[test]
    fn non_numeric_id_is_not_found() {
        let err = parse_job_id("abc").unwrap_err();
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "No job: abc"));
    }
}
