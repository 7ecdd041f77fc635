mod catalog;
mod database;
mod domain;

pub mod test_utils;

// Persisted document field names

pub const ID_FIELD_NAME: &'static str = "id";
pub const SLUG_FIELD_NAME: &'static str = "slug";

pub const DATE_PUBLISHED_FIELD_NAME: &'static str = "datePublished";
pub const PUBLISH_DATE_FIELD_NAME: &'static str = "publishDate";
pub const CREATED_FIELD_NAME: &'static str = "createdAt";
pub const UPDATED_FIELD_NAME: &'static str = "updatedAt";

pub const VIEW_COUNT_FIELD_NAME: &'static str = "viewCount";
pub const CLICK_COUNT_FIELD_NAME: &'static str = "clickCount";
pub const LAST_VIEWED_FIELD_NAME: &'static str = "lastViewedAt";
pub const LAST_CLICKED_FIELD_NAME: &'static str = "lastClickedAt";

// expose domain module

pub use domain::*;

// expose catalog and database modules

pub use catalog::{StaticCatalog, load_catalog};
pub use database::{Database, DatabaseSettings, connect_to_database};
