use sqlx::PgPool;

use crate::collectors::{self, JobBoard};
use crate::config::Config;
use crate::db;
use crate::error::AppError;
use crate::models::employer::Employer;
use crate::models::vacancy::Vacancy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub employers: usize,
    pub vacancies: usize,
}

/// Insert all employers, then all vacancies, in one transaction.
/// Any failed insert drops the transaction uncommitted, which rolls it back.
pub async fn load(
    pool: &PgPool,
    employers: &[Employer],
    vacancies: &[Vacancy],
) -> Result<LoadSummary, AppError> {
    let mut tx = pool.begin().await?;

    for employer in employers {
        employer.insert(&mut *tx).await?;
    }
    for vacancy in vacancies {
        vacancy.insert(&mut *tx).await?;
    }

    tx.commit().await?;

    Ok(LoadSummary {
        employers: employers.len(),
        vacancies: vacancies.len(),
    })
}

/// Full load phase: prepare the database, fetch from the board, insert.
pub async fn run(config: &Config, board: &dyn JobBoard) -> Result<LoadSummary, AppError> {
    let options = config.connect_options()?;

    if config.keep_existing {
        db::ensure_database(&options, &config.db_name).await?;
    } else {
        db::recreate_database(&options, &config.db_name).await?;
    }

    let pool = db::create_pool(&options, &config.db_name).await?;
    let result = populate(&pool, config, board).await;
    pool.close().await;

    let summary = result?;
    tracing::info!(
        "Loaded {} employers and {} vacancies into '{}'",
        summary.employers,
        summary.vacancies,
        config.db_name
    );
    Ok(summary)
}

async fn populate(
    pool: &PgPool,
    config: &Config,
    board: &dyn JobBoard,
) -> Result<LoadSummary, AppError> {
    db::ensure_tables(pool).await?;

    let employers = collectors::fetch_employers(board, &config.employer_ids).await;
    let vacancies = collectors::fetch_vacancies(board, &config.vacancy_query()).await;

    load(pool, &employers, &vacancies).await
}
