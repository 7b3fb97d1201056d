//! Data models for the catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod form;
pub mod genre;

// Re-export commonly used types
pub use author::{Author, AuthorForm, AuthorInput};
pub use book::{Book, BookForm, BookInput, BookWithAuthor, GenreChoice};
pub use book_instance::{
    BookInstance, BookInstanceForm, BookInstanceInput, BookInstanceStatus, BookInstanceWithBook,
};
pub use form::{FieldError, FormList, Rejected};
pub use genre::{Genre, GenreForm, GenreInput};
