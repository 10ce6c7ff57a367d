use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, Connection, PgConnection, PgPool};

use crate::error::AppError;

/// Maintenance database used for CREATE/DROP DATABASE.
const MAINTENANCE_DB: &str = "postgres";

/// PostgreSQL truncates identifiers longer than this many bytes.
const MAX_IDENTIFIER_LEN: usize = 63;

const CREATE_EMPLOYERS: &str = "CREATE TABLE IF NOT EXISTS employers (
    employer_id BIGINT PRIMARY KEY,
    employer_name TEXT NOT NULL,
    employer_url TEXT,
    CONSTRAINT unique_employers_name UNIQUE (employer_name)
)";

const CREATE_VACANCIES: &str = "CREATE TABLE IF NOT EXISTS vacancies (
    vacancy_id BIGINT PRIMARY KEY,
    vacancy_name TEXT NOT NULL,
    vacancy_url TEXT,
    vacancy_employer BIGINT REFERENCES employers(employer_id),
    vacancy_employer_name TEXT NOT NULL,
    salary_from INTEGER,
    salary_to INTEGER
)";

/// Open the single-connection pool used by the loader and the query menu.
pub async fn create_pool(options: &PgConnectOptions, db_name: &str) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options.clone().database(db_name))
        .await?;
    Ok(pool)
}

/// Quote a database name for interpolation into DDL.
/// Names can't be bound as parameters, so they are validated and double-quoted.
pub fn quote_ident(name: &str) -> Result<String, AppError> {
    if name.is_empty() {
        return Err(AppError::InvalidIdentifier("name is empty".to_string()));
    }
    if name.len() > MAX_IDENTIFIER_LEN {
        return Err(AppError::InvalidIdentifier(format!(
            "'{name}' is longer than {MAX_IDENTIFIER_LEN} bytes"
        )));
    }
    if name.contains('\0') {
        return Err(AppError::InvalidIdentifier(
            "name contains a NUL byte".to_string(),
        ));
    }
    Ok(format!("\"{}\"", name.replace('"', "\"\"")))
}

async fn connect_maintenance(options: &PgConnectOptions) -> Result<PgConnection, AppError> {
    let conn = options.clone().database(MAINTENANCE_DB).connect().await?;
    Ok(conn)
}

/// Drop the database if it exists and create it empty. All loaded data is lost.
pub async fn recreate_database(options: &PgConnectOptions, name: &str) -> Result<(), AppError> {
    let ident = quote_ident(name)?;
    let mut conn = connect_maintenance(options).await?;

    sqlx::query(&format!("DROP DATABASE IF EXISTS {ident}"))
        .execute(&mut conn)
        .await?;
    sqlx::query(&format!("CREATE DATABASE {ident}"))
        .execute(&mut conn)
        .await?;

    conn.close().await?;
    tracing::info!("Recreated database '{name}'");
    Ok(())
}

/// Create the database only when it does not exist yet.
/// Returns true if it was created.
pub async fn ensure_database(options: &PgConnectOptions, name: &str) -> Result<bool, AppError> {
    let ident = quote_ident(name)?;
    let mut conn = connect_maintenance(options).await?;

    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM pg_catalog.pg_database WHERE datname = $1)",
    )
    .bind(name)
    .fetch_one(&mut conn)
    .await?;

    if exists {
        tracing::info!("Keeping existing database '{name}'");
    } else {
        sqlx::query(&format!("CREATE DATABASE {ident}"))
            .execute(&mut conn)
            .await?;
        tracing::info!("Created database '{name}'");
    }

    conn.close().await?;
    Ok(!exists)
}

/// Create `employers` then `vacancies`; the foreign key needs that order.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(CREATE_EMPLOYERS).execute(pool).await?;
    sqlx::query(CREATE_VACANCIES).execute(pool).await?;
    Ok(())
}
