use sqlx::PgConnection;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employer {
    pub id: i64,
    pub name: String,
    pub site_url: String,
    /// Reported by the API at fetch time; not persisted.
    pub open_vacancies: i64,
}

impl Employer {
    pub async fn insert(&self, conn: &mut PgConnection) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO employers (employer_id, employer_name, employer_url) VALUES ($1, $2, $3)",
        )
        .bind(self.id)
        .bind(&self.name)
        .bind(&self.site_url)
        .execute(conn)
        .await?;
        Ok(())
    }
}
