//! # Comicpaint I/O
//!
//! Reading and writing comics as JSON documents, and the application
//! settings file. The on-disk document is exactly the in-memory shape:
//! `{"name": ..., "pieces": [[{"id", "color", "points": [{"x", "y"}]}]]}`.

pub mod settings;
pub mod store;

pub use settings::{AppSettings, StartView, ThemeSettings};
pub use store::{from_json, load, save, to_json, to_json_pretty, PersistError};
