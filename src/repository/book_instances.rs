//! Book instances repository

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{BookInstance, BookInstanceInput, BookInstanceStatus},
};

const COLUMNS: &str = "id, book_id, imprint, status, due_back";

#[derive(Clone)]
pub struct BookInstancesRepository {
    pool: Pool<Postgres>,
}

impl BookInstancesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<BookInstance>> {
        let rows = sqlx::query_as::<_, BookInstance>(&format!("SELECT {} FROM book_instances", COLUMNS))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        let rows = sqlx::query_as::<_, BookInstance>(&format!(
            "SELECT {} FROM book_instances WHERE book_id = $1 ORDER BY due_back",
            COLUMNS
        ))
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        let row = sqlx::query_as::<_, BookInstance>(&format!(
            "SELECT {} FROM book_instances WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn create(&self, input: &BookInstanceInput) -> AppResult<BookInstance> {
        let row = sqlx::query_as::<_, BookInstance>(&format!(
            r#"
            INSERT INTO book_instances (id, book_id, imprint, status, due_back)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(input.book_id)
        .bind(&input.imprint)
        .bind(input.status.as_str())
        .bind(input.due_back)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self, status: Option<BookInstanceStatus>) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM book_instances WHERE ($1::text IS NULL OR status = $1)",
        )
        .bind(status.map(|s| s.as_str()))
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
