//! database entity models for sea-orm.
//!
//! these entities map to database tables. enums are stored as their
//! lowercase string form and parsed back leniently.

pub mod api_key;
pub mod approved_uploader;
pub mod bookmark;
pub mod department;
pub mod resource;
pub mod subject;
pub mod tutorial;
pub mod user;
