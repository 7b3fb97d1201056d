//! Authors repository

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Author, AuthorInput},
};

const COLUMNS: &str = "id, first_name, family_name, date_of_birth, date_of_death";

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all authors by family name
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, Author>(&format!(
            "SELECT {} FROM authors ORDER BY family_name, first_name",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Author>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query_as::<_, Author>(&format!(
            "SELECT {} FROM authors WHERE id = ANY($1)",
            COLUMNS
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, Author>(&format!("SELECT {} FROM authors WHERE id = $1", COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn create(&self, input: &AuthorInput) -> AppResult<Author> {
        let row = sqlx::query_as::<_, Author>(&format!(
            r#"
            INSERT INTO authors (id, first_name, family_name, date_of_birth, date_of_death)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&input.first_name)
        .bind(&input.family_name)
        .bind(input.date_of_birth)
        .bind(input.date_of_death)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Replace every field of an existing author
    pub async fn update(&self, id: Uuid, input: &AuthorInput) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, Author>(&format!(
            r#"
            UPDATE authors
            SET first_name = $1, family_name = $2, date_of_birth = $3, date_of_death = $4
            WHERE id = $5
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(&input.first_name)
        .bind(&input.family_name)
        .bind(input.date_of_birth)
        .bind(input.date_of_death)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Books written by this author are left untouched
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
