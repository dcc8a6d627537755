//! # Comicpaint Core
//!
//! The drawing model behind the Comicpaint editor and viewer: points are
//! collected into colored pieces, pieces are layered into pictures, and
//! pictures are bound as the pages of a comic.
//!
//! Every edit on the model is a pure operation that borrows its input and
//! returns a new value (or a [`ModelError`]), so a failed edit never leaves a
//! half-modified picture behind. [`ComicDocument`] layers undo/redo on top via
//! the command journal in [`commands`].

pub mod color;
pub mod comic;
pub mod commands;
pub mod document;
pub mod error;
pub mod geometry;
pub mod picture;
pub mod piece;
pub mod spatial;

pub use color::Rgba;
pub use comic::Comic;
pub use document::ComicDocument;
pub use error::ModelError;
pub use geometry::{BBox, Point};
pub use picture::Picture;
pub use piece::{Piece, PieceId};
