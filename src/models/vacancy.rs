use sqlx::PgConnection;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vacancy {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub employer_id: i64,
    /// Denormalized copy of the employer's name.
    pub employer_name: String,
    pub salary_from: Option<i32>,
    pub salary_to: Option<i32>,
}

impl Vacancy {
    pub async fn insert(&self, conn: &mut PgConnection) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO vacancies (vacancy_id, vacancy_name, vacancy_url, vacancy_employer, vacancy_employer_name, salary_from, salary_to) VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(self.id)
        .bind(&self.name)
        .bind(&self.url)
        .bind(self.employer_id)
        .bind(&self.employer_name)
        .bind(self.salary_from)
        .bind(self.salary_to)
        .execute(conn)
        .await?;
        Ok(())
    }
}
