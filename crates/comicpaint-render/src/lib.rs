//! # Comicpaint Render
//!
//! Everything a canvas or viewer front end needs to draw a comic without
//! knowing the model's internals: viewport math, per-page render frames in
//! z-order, SVG export, and page navigation for the viewer.
//!
//! Render frames are plain serializable data; the drawing backend that
//! consumes them lives outside this crate.

pub mod pager;
pub mod render_data;
pub mod svg;
pub mod viewport;

pub use pager::PageCursor;
pub use render_data::{RenderFrame, RenderPiece};
pub use svg::{picture_to_svg, SvgWriter};
pub use viewport::Viewport;
