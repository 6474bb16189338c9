use std::str::FromStr;

use clap::Subcommand;
use serde_json::json;
use sqlx::types::BigDecimal;

use crate::cli::{utils::output_success, OutputFormat};
use crate::config;
use crate::database::{DatabaseError, DatabaseManager, NewCompany, NewJob};
use crate::services::{CompanyService, JobService};

#[derive(Subcommand)]
pub enum DbCommands {
    #[command(about = "Create the companies and jobs tables")]
    Init {
        #[arg(long, help = "Database name (defaults to DATABASE_NAME)")]
        database: Option<String>,
    },

    #[command(about = "Insert a small demo data set")]
    Seed {
        #[arg(long, help = "Database name (defaults to DATABASE_NAME)")]
        database: Option<String>,
    },
}

pub async fn handle(cmd: DbCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        DbCommands::Init { database } => {
            let (pool, name) = connect(database).await?;
            DatabaseManager::apply_schema(&pool).await?;
            pool.close().await;

            output_success(
                output_format,
                &format!("Schema applied to '{}'", name),
                Some(json!({ "database": name })),
            )
        }
        DbCommands::Seed { database } => {
            let (pool, name) = connect(database).await?;
            let companies = CompanyService::new(pool.clone());
            let jobs = JobService::new(pool.clone());

            let mut inserted = 0;
            let mut skipped = 0;

            for company in demo_companies() {
                match companies.create(company).await {
                    Ok(_) => inserted += 1,
                    Err(DatabaseError::Duplicate(_)) => skipped += 1,
                    Err(e) => return Err(e.into()),
                }
            }
            for job in demo_jobs()? {
                match jobs.create(job).await {
                    Ok(_) => inserted += 1,
                    Err(DatabaseError::Duplicate(_)) => skipped += 1,
                    Err(e) => return Err(e.into()),
                }
            }
            pool.close().await;

            output_success(
                output_format,
                &format!("Seeded '{}'", name),
                Some(json!({ "database": name, "inserted": inserted, "skipped": skipped })),
            )
        }
    }
}

async fn connect(database: Option<String>) -> anyhow::Result<(sqlx::PgPool, String)> {
    let db_config = &config::config().database;
    let name = database.unwrap_or_else(|| db_config.name.clone());
    let pool = DatabaseManager::connect_to(db_config, &name).await?;
    Ok((pool, name))
}

fn demo_companies() -> Vec<NewCompany> {
    vec![
        NewCompany {
            handle: "anderson-arias-morrow".to_string(),
            name: "Anderson, Arias and Morrow".to_string(),
            description: "Somebody program how I. Face give away discussion view act inside.".to_string(),
            num_employees: Some(245),
            logo_url: Some("/logos/logo3.png".to_string()),
        },
        NewCompany {
            handle: "bauer-gallagher".to_string(),
            name: "Bauer-Gallagher".to_string(),
            description: "Difficult ready trip question produce produce someone.".to_string(),
            num_employees: Some(862),
            logo_url: None,
        },
        NewCompany {
            handle: "watson-davis".to_string(),
            name: "Watson-Davis".to_string(),
            description: "Year join loss.".to_string(),
            num_employees: Some(819),
            logo_url: Some("/logos/logo3.png".to_string()),
        },
    ]
}

fn demo_jobs() -> anyhow::Result<Vec<NewJob>> {
    Ok(vec![
        NewJob {
            title: "Conservator, furniture".to_string(),
            salary: Some(110000),
            equity: Some(BigDecimal::from_str("0")?),
            company_handle: "watson-davis".to_string(),
        },
        NewJob {
            title: "Information officer".to_string(),
            salary: Some(200000),
            equity: Some(BigDecimal::from_str("0.05")?),
            company_handle: "anderson-arias-morrow".to_string(),
        },
        NewJob {
            title: "Consulting civil engineer".to_string(),
            salary: Some(60000),
            equity: None,
            company_handle: "bauer-gallagher".to_string(),
        },
    ])
}
