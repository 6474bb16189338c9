#![allow(dead_code)]

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use once_cell::sync::Lazy;
use serde_json::Value;
use sqlx::{Executor, PgPool};
use tokio::sync::{Mutex, MutexGuard};
use tower::ServiceExt;

use jobly_api::auth;
use jobly_api::config;
use jobly_api::database::DatabaseManager;
use jobly_api::server::{app, AppState};

/// Database tests run against this database on the `DATABASE_URL` server.
pub const TEST_DATABASE: &str = "jobly_test";

// Tests that touch jobly_test share its rows, so they run one at a time
static DB_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

const SEED_SQL: &str = r#"
TRUNCATE companies, jobs RESTART IDENTITY CASCADE;

INSERT INTO companies (handle, name, num_employees, description, logo_url)
VALUES ('c1', 'C1', 1, 'Desc1', 'http://c1.img'),
       ('c2', 'C2', 2, 'Desc2', 'http://c2.img'),
       ('c3', 'C3', 3, 'Desc3', 'http://c3.img');

INSERT INTO jobs (title, salary, equity, company_handle)
VALUES ('J1', 100, 0.1, 'c1'),
       ('J2', 200, 0.2, 'c1'),
       ('J3', 300, 0, 'c1'),
       ('J4', NULL, NULL, 'c1'),
       ('Test Engineer', 70000, 0, 'c2'),
       ('test lead', 50000, NULL, 'c2'),
       ('Senior Tester', 80000, 0.05, 'c3');
"#;

pub struct TestDb {
    pub app: Router,
    pub pool: PgPool,
    _guard: MutexGuard<'static, ()>,
}

/// Router over a pool that never connects; enough for requests rejected
/// before any query runs.
pub fn offline_app() -> Result<Router> {
    let pool = DatabaseManager::connect_lazy("postgres://postgres@localhost:5432/jobly_test")?;
    Ok(app(AppState::new(pool)))
}

/// Freshly seeded jobly_test database. Fails when the server is unreachable.
pub async fn test_db() -> Result<TestDb> {
    let guard = DB_LOCK.lock().await;
    let _ = dotenvy::dotenv();

    let mut db_config = config::config().database.clone();
    db_config.max_connections = 2;
    db_config.connection_timeout = 5;

    let pool = DatabaseManager::connect_to(&db_config, TEST_DATABASE)
        .await
        .context("database tests need DATABASE_URL pointing at a server with a jobly_test database")?;
    DatabaseManager::apply_schema(&pool).await?;
    pool.execute(SEED_SQL).await.context("seed jobly_test")?;

    Ok(TestDb {
        app: app(AppState::new(pool.clone())),
        pool,
        _guard: guard,
    })
}

pub fn admin_token() -> Result<String> {
    Ok(auth::create_token("admin", true)?)
}

pub fn user_token() -> Result<String> {
    Ok(auth::create_token("u1", false)?)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let payload = body.map(|b| b.to_string());
    send_raw(app, method, uri, token, payload).await
}

pub async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<String>,
) -> Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).with_context(|| format!("{} returned non-JSON body", uri))?
    };
    Ok((status, value))
}
