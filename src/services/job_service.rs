use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::job::{Job, NewJob, JOB_COLUMNS};
use crate::database::query_builder::QueryBuilder;
use crate::filter::{sql_for_partial_update, FieldValues, JobSearch, SqlParam, SqlResult};

/// All SQL for the `jobs` table
pub struct JobService {
    pool: PgPool,
}

impl JobService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a job unless an identical posting already exists
    pub async fn create(&self, data: NewJob) -> Result<Job, DatabaseError> {
        let duplicate_msg = || format!("Duplicate job: {} at {}", data.title, data.company_handle);

        // salary and equity are nullable; two NULLs count as the same posting
        let existing: Option<i32> = sqlx::query_scalar(
            "SELECT id FROM jobs \
             WHERE title = $1 \
             AND salary IS NOT DISTINCT FROM $2 \
             AND equity IS NOT DISTINCT FROM $3 \
             AND company_handle = $4",
        )
        .bind(&data.title)
        .bind(data.salary)
        .bind(&data.equity)
        .bind(&data.company_handle)
        .fetch_optional(&self.pool)
        .await?;

        if existing.is_some() {
            return Err(DatabaseError::Duplicate(duplicate_msg()));
        }

        let query = format!(
            "INSERT INTO jobs (title, salary, equity, company_handle) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {}",
            JOB_COLUMNS
        );

        let job = sqlx::query_as::<_, Job>(&query)
            .bind(&data.title)
            .bind(data.salary)
            .bind(&data.equity)
            .bind(&data.company_handle)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match DatabaseError::from(e) {
                DatabaseError::Duplicate(_) => DatabaseError::Duplicate(duplicate_msg()),
                DatabaseError::ForeignKeyViolation(_) => {
                    DatabaseError::ForeignKeyViolation(format!("No company: {}", data.company_handle))
                }
                other => other,
            })?;

        tracing::info!("Created job {} ({})", job.id, job.title);
        Ok(job)
    }

    /// Jobs matching the search, ordered by title
    pub async fn find_all(&self, search: &JobSearch) -> Result<Vec<Job>, DatabaseError> {
        let (where_clause, params) = search.to_where()?;
        let query = [
            format!("SELECT {} FROM jobs", JOB_COLUMNS),
            where_clause,
            "ORDER BY title".to_string(),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(" ");

        QueryBuilder::<Job>::new(SqlResult::new(query, params))
            .select_all(&self.pool)
            .await
    }

    pub async fn get(&self, id: i32) -> Result<Job, DatabaseError> {
        sqlx::query_as::<_, Job>(&format!("SELECT {} FROM jobs WHERE id = $1", JOB_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("No job: {}", id)))
    }

    /// Apply the supplied fields only; `id` is never part of the SET list
    pub async fn update(&self, id: i32, data: FieldValues) -> Result<Job, DatabaseError> {
        let company_handle = data.iter().find_map(|(field, value)| match (field.as_str(), value) {
            ("company_handle", SqlParam::Text(Some(handle))) => Some(handle.clone()),
            _ => None,
        });
        let update = sql_for_partial_update(data, &[])?;
        let query = format!(
            "UPDATE jobs SET {} WHERE id = ${} RETURNING {}",
            update.set_cols,
            update.next_param_index(),
            JOB_COLUMNS
        );

        let mut params = update.values;
        params.push(SqlParam::int(id));

        QueryBuilder::<Job>::new(SqlResult::new(query, params))
            .select_optional(&self.pool)
            .await
            .map_err(|e| match (e, &company_handle) {
                (DatabaseError::ForeignKeyViolation(_), Some(handle)) => {
                    DatabaseError::ForeignKeyViolation(format!("No company: {}", handle))
                }
                (other, _) => other,
            })?
            .ok_or_else(|| DatabaseError::NotFound(format!("No job: {}", id)))
    }

    pub async fn remove(&self, id: i32) -> Result<i32, DatabaseError> {
        let deleted: Option<i32> = sqlx::query_scalar("DELETE FROM jobs WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let deleted = deleted.ok_or_else(|| DatabaseError::NotFound(format!("No job: {}", id)))?;
        tracing::info!("Deleted job {}", deleted);
        Ok(deleted)
    }
}
