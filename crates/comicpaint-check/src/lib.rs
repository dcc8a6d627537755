//! # Comicpaint Check
//!
//! Structural validation for comics that did not come out of the model's own
//! operations, such as documents read from disk. The model keeps piece ids
//! unique and points finite on every edit; this crate finds the places where
//! an arbitrary [`Comic`](comicpaint_core::Comic) breaks those rules, plus a
//! few softer problems worth telling the user about.

pub mod checker;
pub mod violation;

pub use checker::{check_comic, check_picture, Report};
pub use violation::{Severity, Violation, ViolationKind};
