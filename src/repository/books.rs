//! Books repository

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Book, BookInput},
};

const COLUMNS: &str = "id, title, author_id, summary, isbn, genre_ids";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all books by title
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(&format!("SELECT {} FROM books ORDER BY title", COLUMNS))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Book>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE id = ANY($1) ORDER BY title",
            COLUMNS
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE author_id = $1 ORDER BY title",
            COLUMNS
        ))
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE $1 = ANY(genre_ids) ORDER BY title",
            COLUMNS
        ))
        .bind(genre_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, Book>(&format!("SELECT {} FROM books WHERE id = $1", COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn create(&self, input: &BookInput) -> AppResult<Book> {
        let row = sqlx::query_as::<_, Book>(&format!(
            r#"
            INSERT INTO books (id, title, author_id, summary, isbn, genre_ids)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&input.title)
        .bind(input.author_id)
        .bind(&input.summary)
        .bind(&input.isbn)
        .bind(&input.genre_ids)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Replace every field of an existing book; the id is preserved
    pub async fn update(&self, id: Uuid, input: &BookInput) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, Book>(&format!(
            r#"
            UPDATE books
            SET title = $1, author_id = $2, summary = $3, isbn = $4, genre_ids = $5
            WHERE id = $6
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(&input.title)
        .bind(input.author_id)
        .bind(&input.summary)
        .bind(&input.isbn)
        .bind(&input.genre_ids)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Copies of the book are not removed
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
