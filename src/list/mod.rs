//! The user list: cache, refresh protocol and page window.

pub mod controller;
pub mod pagination;

pub use controller::{MutationEvent, RecordListController};
pub use pagination::{derive_page, page_count, Pagination, DEFAULT_PAGE_SIZE};
