use thiserror::Error;

/// Errors raised by drawing model operations.
///
/// Operations never partially apply: when one of these is returned the input
/// value is exactly as it was.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("A piece with id '{0}' already exists in this picture")]
    DuplicateId(String),

    #[error("No piece with id '{0}' in this picture")]
    PieceNotFound(String),

    #[error("Page {index} does not exist (comic has {len} pages)")]
    PageNotFound { index: usize, len: usize },

    #[error("Index {index} is out of range for a sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Point ({x}, {y}) has non-finite coordinates")]
    InvalidPoint { x: f64, y: f64 },
}

impl ModelError {
    /// True for both the piece and the page flavour of "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ModelError::PieceNotFound(_) | ModelError::PageNotFound { .. }
        )
    }
}

/// Check that `index` is a valid insertion slot for a sequence of `len` items.
pub(crate) fn check_insert_index(index: usize, len: usize) -> Result<(), ModelError> {
    if index > len {
        Err(ModelError::IndexOutOfRange { index, len })
    } else {
        Ok(())
    }
}

/// Check that `index` addresses an existing element (a final position after a move).
pub(crate) fn check_position_index(index: usize, len: usize) -> Result<(), ModelError> {
    if index >= len {
        Err(ModelError::IndexOutOfRange { index, len })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_grouping() {
        assert!(ModelError::PieceNotFound("a".into()).is_not_found());
        assert!(ModelError::PageNotFound { index: 3, len: 1 }.is_not_found());
        assert!(!ModelError::DuplicateId("a".into()).is_not_found());
    }

    #[test]
    fn test_index_checks() {
        assert!(check_insert_index(2, 2).is_ok());
        assert_eq!(
            check_insert_index(3, 2),
            Err(ModelError::IndexOutOfRange { index: 3, len: 2 })
        );
        assert!(check_position_index(1, 2).is_ok());
        assert!(check_position_index(2, 2).is_err());
        assert!(check_position_index(0, 0).is_err());
    }
}
