// Collector module.
// Defines the job board trait and the fetch steps that feed the loader.

pub mod hh;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::employer::Employer;
use crate::models::vacancy::Vacancy;

pub use hh::HeadHunter;

/// Filters for the single vacancy listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VacancyQuery {
    pub employer_ids: Vec<i64>,
    pub only_with_salary: bool,
    pub per_page: u32,
    pub page: u32,
}

/// Trait that job board clients implement.
/// One call per employer lookup, one call per vacancy page.
#[async_trait]
pub trait JobBoard: Send + Sync {
    /// Look up a single employer by its board id.
    async fn employer(&self, id: i64) -> Result<Employer, AppError>;

    /// Fetch one page of vacancies matching the query.
    async fn vacancies(&self, query: &VacancyQuery) -> Result<Vec<Vacancy>, AppError>;
}

/// Look up every employer in order, skipping the ones the board refuses.
pub async fn fetch_employers(board: &dyn JobBoard, ids: &[i64]) -> Vec<Employer> {
    let mut employers = Vec::with_capacity(ids.len());

    for &id in ids {
        match board.employer(id).await {
            Ok(employer) if employer.id == id => {
                tracing::info!(
                    "Fetched employer {id} '{}' ({} open vacancies)",
                    employer.name,
                    employer.open_vacancies
                );
                employers.push(employer);
            }
            Ok(employer) => {
                tracing::warn!(
                    "Employer lookup for {id} returned employer {}, skipping",
                    employer.id
                );
            }
            Err(e) => {
                tracing::warn!("Employer lookup for {id} failed: {e}");
            }
        }
    }

    employers
}

/// Fetch the configured vacancy page. Any failure yields no vacancies at all.
pub async fn fetch_vacancies(board: &dyn JobBoard, query: &VacancyQuery) -> Vec<Vacancy> {
    match board.vacancies(query).await {
        Ok(vacancies) => {
            tracing::info!(
                "Fetched {} vacancies (page {}, per_page {})",
                vacancies.len(),
                query.page,
                query.per_page
            );
            vacancies
        }
        Err(e) => {
            tracing::warn!("Vacancy request failed: {e}");
            Vec::new()
        }
    }
}
