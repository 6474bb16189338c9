use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::company::{Company, CompanyDetail, NewCompany, COMPANY_COLUMNS, COMPANY_FIELD_COLUMNS};
use crate::database::models::job::{Job, JOB_COLUMNS};
use crate::database::query_builder::QueryBuilder;
use crate::filter::{sql_for_partial_update, CompanySearch, FieldValues, SqlParam, SqlResult};

/// All SQL for the `companies` table
pub struct CompanyService {
    pool: PgPool,
}

impl CompanyService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a company; a taken handle is a duplicate
    pub async fn create(&self, data: NewCompany) -> Result<Company, DatabaseError> {
        let existing: Option<String> = sqlx::query_scalar("SELECT handle FROM companies WHERE handle = $1")
            .bind(&data.handle)
            .fetch_optional(&self.pool)
            .await?;

        if existing.is_some() {
            return Err(DatabaseError::Duplicate(format!("Duplicate company: {}", data.handle)));
        }

        let query = format!(
            "INSERT INTO companies (handle, name, description, num_employees, logo_url) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {}",
            COMPANY_COLUMNS
        );

        let company = sqlx::query_as::<_, Company>(&query)
            .bind(&data.handle)
            .bind(&data.name)
            .bind(&data.description)
            .bind(data.num_employees)
            .bind(&data.logo_url)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match DatabaseError::from(e) {
                // Lost a race with a concurrent insert of the same handle
                DatabaseError::Duplicate(_) => DatabaseError::Duplicate(format!("Duplicate company: {}", data.handle)),
                other => other,
            })?;

        tracing::info!("Created company {}", company.handle);
        Ok(company)
    }

    /// Companies matching the search, ordered by name
    pub async fn find_all(&self, search: &CompanySearch) -> Result<Vec<Company>, DatabaseError> {
        let (where_clause, params) = search.to_where()?;
        let query = [
            format!("SELECT {} FROM companies", COMPANY_COLUMNS),
            where_clause,
            "ORDER BY name".to_string(),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(" ");

        QueryBuilder::<Company>::new(SqlResult::new(query, params))
            .select_all(&self.pool)
            .await
    }

    /// One company plus the jobs it has posted
    pub async fn get(&self, handle: &str) -> Result<CompanyDetail, DatabaseError> {
        let company = sqlx::query_as::<_, Company>(&format!(
            "SELECT {} FROM companies WHERE handle = $1",
            COMPANY_COLUMNS
        ))
        .bind(handle)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("No company: {}", handle)))?;

        let jobs = sqlx::query_as::<_, Job>(&format!(
            "SELECT {} FROM jobs WHERE company_handle = $1 ORDER BY id",
            JOB_COLUMNS
        ))
        .bind(handle)
        .fetch_all(&self.pool)
        .await?;

        Ok(CompanyDetail { company, jobs })
    }

    /// Apply the supplied fields only; the handle itself never changes
    pub async fn update(&self, handle: &str, data: FieldValues) -> Result<Company, DatabaseError> {
        let update = sql_for_partial_update(data, COMPANY_FIELD_COLUMNS)?;
        let query = format!(
            "UPDATE companies SET {} WHERE handle = ${} RETURNING {}",
            update.set_cols,
            update.next_param_index(),
            COMPANY_COLUMNS
        );

        let mut params = update.values;
        params.push(SqlParam::text(handle));

        QueryBuilder::<Company>::new(SqlResult::new(query, params))
            .select_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("No company: {}", handle)))
    }

    pub async fn remove(&self, handle: &str) -> Result<String, DatabaseError> {
        let deleted: Option<String> = sqlx::query_scalar("DELETE FROM companies WHERE handle = $1 RETURNING handle")
            .bind(handle)
            .fetch_optional(&self.pool)
            .await?;

        let deleted = deleted.ok_or_else(|| DatabaseError::NotFound(format!("No company: {}", handle)))?;
        tracing::info!("Deleted company {}", deleted);
        Ok(deleted)
    }
}
