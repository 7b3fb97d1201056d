//! Catalog summary for the home page

use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, models::BookInstanceStatus};

use super::Store;

/// Record counts shown on the home page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CatalogCounts {
    pub book_count: i64,
    pub book_instance_count: i64,
    pub book_instance_available_count: i64,
    pub author_count: i64,
    pub genre_count: i64,
}

#[derive(Clone)]
pub struct HomeService {
    store: Store,
}

impl HomeService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Run the five counts concurrently; the first failure wins
    pub async fn counts(&self) -> AppResult<CatalogCounts> {
        let store = &self.store;
        let (book_count, book_instance_count, book_instance_available_count, author_count, genre_count) =
            tokio::try_join!(
                store.count_books(),
                store.count_book_instances(None),
                store.count_book_instances(Some(BookInstanceStatus::Available)),
                store.count_authors(),
                store.count_genres(),
            )?;

        Ok(CatalogCounts {
            book_count,
            book_instance_count,
            book_instance_available_count,
            author_count,
            genre_count,
        })
    }
}
