//! Business logic services

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod home;

use std::sync::Arc;

use crate::repository::CatalogStore;

/// Shared handle on the persistence layer
pub type Store = Arc<dyn CatalogStore>;

/// Result of submitting a create/update form
#[derive(Debug)]
pub enum FormOutcome<T, F> {
    /// The record was written
    Saved(T),
    /// Validation failed; the form must be shown again
    Invalid(F),
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub store: Store,
    pub home: home::HomeService,
    pub authors: authors::AuthorsService,
    pub genres: genres::GenresService,
    pub books: books::BooksService,
    pub book_instances: book_instances::BookInstancesService,
}

impl Services {
    /// Create all services over the given store
    pub fn new(store: Store) -> Self {
        Self {
            home: home::HomeService::new(store.clone()),
            authors: authors::AuthorsService::new(store.clone()),
            genres: genres::GenresService::new(store.clone()),
            books: books::BooksService::new(store.clone()),
            book_instances: book_instances::BookInstancesService::new(store.clone()),
            store,
        }
    }
}
