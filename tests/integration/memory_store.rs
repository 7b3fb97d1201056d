//! In-memory catalog store for router tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use uuid::Uuid;

use shelfmark_server::{
    api,
    models::{
        Author, AuthorInput, Book, BookInput, BookInstance, BookInstanceInput, BookInstanceStatus,
        Genre, GenreInput,
    },
    repository::CatalogStore,
    services::Services,
    AppConfig, AppError, AppResult, AppState,
};

#[derive(Default)]
struct Tables {
    authors: Vec<Author>,
    genres: Vec<Genre>,
    books: Vec<Book>,
    book_instances: Vec<BookInstance>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    /// Make every count query fail
    failing_counts: bool,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_failing_counts() -> Arc<Self> {
        Arc::new(Self {
            failing_counts: true,
            ..Self::default()
        })
    }

    fn count_guard(&self) -> AppResult<()> {
        if self.failing_counts {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    pub fn book_count(&self) -> usize {
        self.tables.lock().unwrap().books.len()
    }

    pub fn book_instances(&self) -> Vec<BookInstance> {
        self.tables.lock().unwrap().book_instances.clone()
    }
}

/// Router wired to the given store, as `main` wires it to PostgreSQL
pub fn app(store: Arc<MemoryStore>) -> Router {
    let state = AppState {
        config: Arc::new(AppConfig::default()),
        services: Arc::new(Services::new(store)),
    };
    api::router(state)
}

fn sorted_by<T, K: Ord>(mut rows: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    rows.sort_by_key(key);
    rows
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        let rows = self.tables.lock().unwrap().authors.clone();
        Ok(sorted_by(rows, |a| (a.family_name.clone(), a.first_name.clone())))
    }

    async fn authors_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Author>> {
        let t = self.tables.lock().unwrap();
        Ok(t.authors.iter().filter(|a| ids.contains(&a.id)).cloned().collect())
    }

    async fn get_author(&self, id: Uuid) -> AppResult<Option<Author>> {
        let t = self.tables.lock().unwrap();
        Ok(t.authors.iter().find(|a| a.id == id).cloned())
    }

    async fn create_author(&self, input: &AuthorInput) -> AppResult<Author> {
        let author = Author {
            id: Uuid::new_v4(),
            first_name: input.first_name.clone(),
            family_name: input.family_name.clone(),
            date_of_birth: input.date_of_birth,
            date_of_death: input.date_of_death,
        };
        self.tables.lock().unwrap().authors.push(author.clone());
        Ok(author)
    }

    async fn update_author(&self, id: Uuid, input: &AuthorInput) -> AppResult<Option<Author>> {
        let mut t = self.tables.lock().unwrap();
        Ok(t.authors.iter_mut().find(|a| a.id == id).map(|a| {
            a.first_name = input.first_name.clone();
            a.family_name = input.family_name.clone();
            a.date_of_birth = input.date_of_birth;
            a.date_of_death = input.date_of_death;
            a.clone()
        }))
    }

    async fn delete_author(&self, id: Uuid) -> AppResult<bool> {
        let mut t = self.tables.lock().unwrap();
        let before = t.authors.len();
        t.authors.retain(|a| a.id != id);
        Ok(t.authors.len() != before)
    }

    async fn count_authors(&self) -> AppResult<i64> {
        self.count_guard()?;
        Ok(self.tables.lock().unwrap().authors.len() as i64)
    }

    async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        let rows = self.tables.lock().unwrap().genres.clone();
        Ok(sorted_by(rows, |g| g.name.clone()))
    }

    async fn genres_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>> {
        let t = self.tables.lock().unwrap();
        let rows = t.genres.iter().filter(|g| ids.contains(&g.id)).cloned().collect();
        Ok(sorted_by(rows, |g: &Genre| g.name.clone()))
    }

    async fn get_genre(&self, id: Uuid) -> AppResult<Option<Genre>> {
        let t = self.tables.lock().unwrap();
        Ok(t.genres.iter().find(|g| g.id == id).cloned())
    }

    async fn find_genre_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let t = self.tables.lock().unwrap();
        Ok(t.genres.iter().find(|g| g.name.eq_ignore_ascii_case(name)).cloned())
    }

    async fn create_genre(&self, input: &GenreInput) -> AppResult<Genre> {
        let genre = Genre {
            id: Uuid::new_v4(),
            name: input.name.clone(),
        };
        self.tables.lock().unwrap().genres.push(genre.clone());
        Ok(genre)
    }

    async fn update_genre(&self, id: Uuid, input: &GenreInput) -> AppResult<Option<Genre>> {
        let mut t = self.tables.lock().unwrap();
        Ok(t.genres.iter_mut().find(|g| g.id == id).map(|g| {
            g.name = input.name.clone();
            g.clone()
        }))
    }

    async fn delete_genre(&self, id: Uuid) -> AppResult<bool> {
        let mut t = self.tables.lock().unwrap();
        let before = t.genres.len();
        t.genres.retain(|g| g.id != id);
        Ok(t.genres.len() != before)
    }

    async fn count_genres(&self) -> AppResult<i64> {
        self.count_guard()?;
        Ok(self.tables.lock().unwrap().genres.len() as i64)
    }

    async fn list_books(&self) -> AppResult<Vec<Book>> {
        let rows = self.tables.lock().unwrap().books.clone();
        Ok(sorted_by(rows, |b| b.title.clone()))
    }

    async fn books_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Book>> {
        let t = self.tables.lock().unwrap();
        Ok(t.books.iter().filter(|b| ids.contains(&b.id)).cloned().collect())
    }

    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        let t = self.tables.lock().unwrap();
        let rows = t.books.iter().filter(|b| b.author_id == author_id).cloned().collect();
        Ok(sorted_by(rows, |b: &Book| b.title.clone()))
    }

    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>> {
        let t = self.tables.lock().unwrap();
        let rows = t.books.iter().filter(|b| b.genre_ids.contains(&genre_id)).cloned().collect();
        Ok(sorted_by(rows, |b: &Book| b.title.clone()))
    }

    async fn get_book(&self, id: Uuid) -> AppResult<Option<Book>> {
        let t = self.tables.lock().unwrap();
        Ok(t.books.iter().find(|b| b.id == id).cloned())
    }

    async fn create_book(&self, input: &BookInput) -> AppResult<Book> {
        let book = Book {
            id: Uuid::new_v4(),
            title: input.title.clone(),
            author_id: input.author_id,
            summary: input.summary.clone(),
            isbn: input.isbn.clone(),
            genre_ids: input.genre_ids.clone(),
        };
        self.tables.lock().unwrap().books.push(book.clone());
        Ok(book)
    }

    async fn update_book(&self, id: Uuid, input: &BookInput) -> AppResult<Option<Book>> {
        let mut t = self.tables.lock().unwrap();
        Ok(t.books.iter_mut().find(|b| b.id == id).map(|b| {
            b.title = input.title.clone();
            b.author_id = input.author_id;
            b.summary = input.summary.clone();
            b.isbn = input.isbn.clone();
            b.genre_ids = input.genre_ids.clone();
            b.clone()
        }))
    }

    async fn delete_book(&self, id: Uuid) -> AppResult<bool> {
        let mut t = self.tables.lock().unwrap();
        let before = t.books.len();
        t.books.retain(|b| b.id != id);
        Ok(t.books.len() != before)
    }

    async fn count_books(&self) -> AppResult<i64> {
        self.count_guard()?;
        Ok(self.tables.lock().unwrap().books.len() as i64)
    }

    async fn list_book_instances(&self) -> AppResult<Vec<BookInstance>> {
        Ok(self.tables.lock().unwrap().book_instances.clone())
    }

    async fn book_instances_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        let t = self.tables.lock().unwrap();
        let rows = t.book_instances.iter().filter(|i| i.book_id == book_id).cloned().collect();
        Ok(sorted_by(rows, |i: &BookInstance| i.due_back))
    }

    async fn get_book_instance(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        let t = self.tables.lock().unwrap();
        Ok(t.book_instances.iter().find(|i| i.id == id).cloned())
    }

    async fn create_book_instance(&self, input: &BookInstanceInput) -> AppResult<BookInstance> {
        let instance = BookInstance {
            id: Uuid::new_v4(),
            book_id: input.book_id,
            imprint: input.imprint.clone(),
            status: input.status,
            due_back: input.due_back,
        };
        self.tables.lock().unwrap().book_instances.push(instance.clone());
        Ok(instance)
    }

    async fn delete_book_instance(&self, id: Uuid) -> AppResult<bool> {
        let mut t = self.tables.lock().unwrap();
        let before = t.book_instances.len();
        t.book_instances.retain(|i| i.id != id);
        Ok(t.book_instances.len() != before)
    }

    async fn count_book_instances(&self, status: Option<BookInstanceStatus>) -> AppResult<i64> {
        self.count_guard()?;
        let t = self.tables.lock().unwrap();
        let count = t
            .book_instances
            .iter()
            .filter(|i| status.map_or(true, |s| i.status == s))
            .count();
        Ok(count as i64)
    }
}
