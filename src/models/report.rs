/// One row of the per-company vacancy count report.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CompanyVacancies {
    pub employer_name: String,
    pub vacancies_count: i64,
}

/// A vacancy joined with the name of its employer.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct VacancyListing {
    pub vacancy_name: String,
    pub vacancy_url: Option<String>,
    pub salary_from: Option<i32>,
    pub salary_to: Option<i32>,
    pub employer_name: String,
}
