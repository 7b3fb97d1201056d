//! Repository layer for database operations
//!
//! Services talk to the database through [`CatalogStore`]; [`Repository`] is the
//! PostgreSQL implementation. Reference resolution is never implicit: a caller
//! that needs a book's author asks for it with a second call.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        Author, AuthorInput, Book, BookInput, BookInstance, BookInstanceInput, BookInstanceStatus,
        Genre, GenreInput,
    },
};

/// Persistence operations used by the catalog services
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Check that the backing store answers
    async fn ping(&self) -> AppResult<()>;

    // Authors
    /// All authors, ordered by family name
    async fn list_authors(&self) -> AppResult<Vec<Author>>;
    async fn authors_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Author>>;
    async fn get_author(&self, id: Uuid) -> AppResult<Option<Author>>;
    async fn create_author(&self, input: &AuthorInput) -> AppResult<Author>;
    /// `None` when no author has this id
    async fn update_author(&self, id: Uuid, input: &AuthorInput) -> AppResult<Option<Author>>;
    /// `true` when a record was removed
    async fn delete_author(&self, id: Uuid) -> AppResult<bool>;
    async fn count_authors(&self) -> AppResult<i64>;

    // Genres
    /// All genres, ordered by name
    async fn list_genres(&self) -> AppResult<Vec<Genre>>;
    async fn genres_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>>;
    async fn get_genre(&self, id: Uuid) -> AppResult<Option<Genre>>;
    /// Case-insensitive lookup by exact name
    async fn find_genre_by_name(&self, name: &str) -> AppResult<Option<Genre>>;
    async fn create_genre(&self, input: &GenreInput) -> AppResult<Genre>;
    async fn update_genre(&self, id: Uuid, input: &GenreInput) -> AppResult<Option<Genre>>;
    async fn delete_genre(&self, id: Uuid) -> AppResult<bool>;
    async fn count_genres(&self) -> AppResult<i64>;

    // Books
    /// All books, ordered by title
    async fn list_books(&self) -> AppResult<Vec<Book>>;
    async fn books_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Book>>;
    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>>;
    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>>;
    async fn get_book(&self, id: Uuid) -> AppResult<Option<Book>>;
    async fn create_book(&self, input: &BookInput) -> AppResult<Book>;
    async fn update_book(&self, id: Uuid, input: &BookInput) -> AppResult<Option<Book>>;
    async fn delete_book(&self, id: Uuid) -> AppResult<bool>;
    async fn count_books(&self) -> AppResult<i64>;

    // Book instances
    async fn list_book_instances(&self) -> AppResult<Vec<BookInstance>>;
    async fn book_instances_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>>;
    async fn get_book_instance(&self, id: Uuid) -> AppResult<Option<BookInstance>>;
    async fn create_book_instance(&self, input: &BookInstanceInput) -> AppResult<BookInstance>;
    async fn delete_book_instance(&self, id: Uuid) -> AppResult<bool>;
    /// Count copies, optionally only those with the given status
    async fn count_book_instances(&self, status: Option<BookInstanceStatus>) -> AppResult<i64>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub authors: authors::AuthorsRepository,
    pub genres: genres::GenresRepository,
    pub books: books::BooksRepository,
    pub book_instances: book_instances::BookInstancesRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(pool.clone()),
            genres: genres::GenresRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            book_instances: book_instances::BookInstancesRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl CatalogStore for Repository {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.authors.list().await
    }

    async fn authors_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Author>> {
        self.authors.get_many(ids).await
    }

    async fn get_author(&self, id: Uuid) -> AppResult<Option<Author>> {
        self.authors.get_by_id(id).await
    }

    async fn create_author(&self, input: &AuthorInput) -> AppResult<Author> {
        self.authors.create(input).await
    }

    async fn update_author(&self, id: Uuid, input: &AuthorInput) -> AppResult<Option<Author>> {
        self.authors.update(id, input).await
    }

    async fn delete_author(&self, id: Uuid) -> AppResult<bool> {
        self.authors.delete(id).await
    }

    async fn count_authors(&self) -> AppResult<i64> {
        self.authors.count().await
    }

    async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        self.genres.list().await
    }

    async fn genres_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>> {
        self.genres.get_many(ids).await
    }

    async fn get_genre(&self, id: Uuid) -> AppResult<Option<Genre>> {
        self.genres.get_by_id(id).await
    }

    async fn find_genre_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        self.genres.find_by_name(name).await
    }

    async fn create_genre(&self, input: &GenreInput) -> AppResult<Genre> {
        self.genres.create(input).await
    }

    async fn update_genre(&self, id: Uuid, input: &GenreInput) -> AppResult<Option<Genre>> {
        self.genres.update(id, input).await
    }

    async fn delete_genre(&self, id: Uuid) -> AppResult<bool> {
        self.genres.delete(id).await
    }

    async fn count_genres(&self) -> AppResult<i64> {
        self.genres.count().await
    }

    async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.books.list().await
    }

    async fn books_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Book>> {
        self.books.get_many(ids).await
    }

    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        self.books.by_author(author_id).await
    }

    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>> {
        self.books.by_genre(genre_id).await
    }

    async fn get_book(&self, id: Uuid) -> AppResult<Option<Book>> {
        self.books.get_by_id(id).await
    }

    async fn create_book(&self, input: &BookInput) -> AppResult<Book> {
        self.books.create(input).await
    }

    async fn update_book(&self, id: Uuid, input: &BookInput) -> AppResult<Option<Book>> {
        self.books.update(id, input).await
    }

    async fn delete_book(&self, id: Uuid) -> AppResult<bool> {
        self.books.delete(id).await
    }

    async fn count_books(&self) -> AppResult<i64> {
        self.books.count().await
    }

    async fn list_book_instances(&self) -> AppResult<Vec<BookInstance>> {
        self.book_instances.list().await
    }

    async fn book_instances_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        self.book_instances.by_book(book_id).await
    }

    async fn get_book_instance(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        self.book_instances.get_by_id(id).await
    }

    async fn create_book_instance(&self, input: &BookInstanceInput) -> AppResult<BookInstance> {
        self.book_instances.create(input).await
    }

    async fn delete_book_instance(&self, id: Uuid) -> AppResult<bool> {
        self.book_instances.delete(id).await
    }

    async fn count_book_instances(&self, status: Option<BookInstanceStatus>) -> AppResult<i64> {
        self.book_instances.count(status).await
    }
}
