//! Catalog entity types: Book, ReadingList, Rating

pub mod book;
pub mod rating;
pub mod reading_list;

pub use book::Book;
pub use rating::Rating;
pub use reading_list::{ReadingList, STATUS_OPTIONS};
