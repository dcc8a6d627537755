use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of structural problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationKind {
    DuplicatePieceId,
    EmptyPieceId,
    NonFinitePoint,
    InvalidColor,
    EmptyComicName,
    EmptyPiece,
}

impl ViolationKind {
    pub fn severity(&self) -> Severity {
        match self {
            ViolationKind::DuplicatePieceId
            | ViolationKind::EmptyPieceId
            | ViolationKind::NonFinitePoint
            | ViolationKind::EmptyComicName => Severity::Error,
            ViolationKind::InvalidColor => Severity::Warning,
            ViolationKind::EmptyPiece => Severity::Info,
        }
    }
}

/// Severity level of a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A single problem with its location in the comic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub severity: Severity,
    pub message: String,
    /// Page index, absent for comic-level problems.
    pub page: Option<usize>,
    pub piece_id: Option<String>,
    pub point_index: Option<usize>,
}

impl Violation {
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            message: message.into(),
            page: None,
            piece_id: None,
            point_index: None,
        }
    }

    pub fn on_page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    pub fn on_piece(mut self, piece_id: &str) -> Self {
        self.piece_id = Some(piece_id.to_string());
        self
    }

    pub fn at_point(mut self, index: usize) -> Self {
        self.point_index = Some(index);
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.severity)?;
        if let Some(page) = self.page {
            write!(f, " page {}", page)?;
        }
        if let Some(id) = &self.piece_id {
            write!(f, " piece '{}'", id)?;
        }
        if let Some(index) = self.point_index {
            write!(f, " point {}", index)?;
        }
        write!(f, ": {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_order() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
        assert_eq!(ViolationKind::InvalidColor.severity(), Severity::Warning);
    }

    #[test]
    fn test_display_includes_location() {
        let v = Violation::new(ViolationKind::NonFinitePoint, "x is NaN")
            .on_page(1)
            .on_piece("a")
            .at_point(3);
        assert_eq!(v.to_string(), "Error page 1 piece 'a' point 3: x is NaN");
        let v = Violation::new(ViolationKind::EmptyComicName, "comic has no name");
        assert_eq!(v.to_string(), "Error: comic has no name");
    }
}
