use sqlx::PgPool;

use crate::error::AppError;
use crate::models::report::{CompanyVacancies, VacancyListing};

/// Read-only queries over a loaded vacancies database.
#[derive(Clone)]
pub struct VacancyReports {
    pool: PgPool,
}

impl VacancyReports {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Number of vacancies per company, by company name.
    pub async fn companies_and_vacancy_counts(&self) -> Result<Vec<CompanyVacancies>, AppError> {
        let rows = sqlx::query_as::<_, CompanyVacancies>(
            "SELECT employer_name, COUNT(*) AS vacancies_count
             FROM vacancies
             JOIN employers ON vacancies.vacancy_employer = employers.employer_id
             GROUP BY employer_name
             ORDER BY employer_name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn all_vacancies(&self) -> Result<Vec<VacancyListing>, AppError> {
        let rows = sqlx::query_as::<_, VacancyListing>(
            "SELECT vacancy_name, vacancy_url, salary_from, salary_to, employer_name
             FROM vacancies
             JOIN employers ON vacancies.vacancy_employer = employers.employer_id
             ORDER BY vacancy_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Mean of the disclosed starting salaries, rounded to two places.
    /// `None` when no vacancy discloses one.
    pub async fn average_starting_salary(&self) -> Result<Option<f64>, AppError> {
        let avg: Option<f64> =
            sqlx::query_scalar("SELECT ROUND(AVG(salary_from), 2)::float8 FROM vacancies")
                .fetch_one(&self.pool)
                .await?;
        Ok(avg)
    }

    pub async fn vacancies_above_average_salary(&self) -> Result<Vec<String>, AppError> {
        let names: Vec<String> = sqlx::query_scalar(
            "SELECT vacancy_name
             FROM vacancies
             WHERE salary_from > (SELECT AVG(salary_from) FROM vacancies)
             ORDER BY vacancy_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(names)
    }

    /// Vacancy names containing `keyword`, ignoring case. `%` and `_` match literally.
    /// Case folding uses the ICU root collation, so it does not depend on the
    /// database's LC_CTYPE.
    pub async fn vacancies_matching_keyword(&self, keyword: &str) -> Result<Vec<String>, AppError> {
        let names: Vec<String> = sqlx::query_scalar(
            "SELECT vacancy_name
             FROM vacancies
             WHERE vacancy_name COLLATE \"und-x-icu\" ILIKE ('%' || $1 || '%') ESCAPE '\\'
             ORDER BY vacancy_id",
        )
        .bind(escape_like(keyword))
        .fetch_all(&self.pool)
        .await?;
        Ok(names)
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}

/// Escape LIKE metacharacters using `\` as the escape character.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
