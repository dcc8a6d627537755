use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{check_insert_index, check_position_index, ModelError};
use crate::geometry::BBox;
use crate::piece::Piece;

/// An ordered layering of pieces. Later pieces render on top of earlier ones.
///
/// Piece ids are unique within a picture; every operation here preserves that.
/// A picture read from an untrusted source may break it, which is what
/// `comicpaint-check` is for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Picture {
    pieces: Vec<Piece>,
}

impl Picture {
    pub fn new() -> Self {
        Self { pieces: Vec::new() }
    }

    /// Build a picture from pieces in render order, rejecting duplicate ids.
    pub fn from_pieces(pieces: Vec<Piece>) -> Result<Self, ModelError> {
        let mut seen = HashSet::with_capacity(pieces.len());
        for piece in &pieces {
            if !seen.insert(piece.id.as_str()) {
                return Err(ModelError::DuplicateId(piece.id.clone()));
            }
        }
        Ok(Self { pieces })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn get(&self, id: &str) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.pieces.iter().position(|p| p.id == id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.position_of(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.pieces.iter().map(|p| p.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Bounding box of every piece that has points.
    pub fn bbox(&self) -> Option<BBox> {
        BBox::union_all(self.pieces.iter().filter_map(Piece::bbox))
    }

    // ── Pure edits ───────────────────────────────────────────────────

    /// Return a copy with `piece` inserted at `index`, or on top when `index` is `None`.
    #[must_use = "returns the updated picture"]
    pub fn insert_piece(&self, piece: Piece, index: Option<usize>) -> Result<Picture, ModelError> {
        if self.contains_id(&piece.id) {
            return Err(ModelError::DuplicateId(piece.id));
        }
        let index = index.unwrap_or(self.pieces.len());
        check_insert_index(index, self.pieces.len())?;

        log::debug!("Inserting piece '{}' at layer {}", piece.id, index);
        let mut next = self.clone();
        next.pieces.insert(index, piece);
        Ok(next)
    }

    /// Return a copy without the piece `id`; the others keep their relative order.
    #[must_use = "returns the updated picture"]
    pub fn remove_piece(&self, id: &str) -> Result<Picture, ModelError> {
        let index = self
            .position_of(id)
            .ok_or_else(|| ModelError::PieceNotFound(id.to_string()))?;

        log::debug!("Removing piece '{}' from layer {}", id, index);
        let mut next = self.clone();
        next.pieces.remove(index);
        Ok(next)
    }

    /// Return a copy with piece `id` moved so that it ends up at `new_index`.
    #[must_use = "returns the updated picture"]
    pub fn reorder_piece(&self, id: &str, new_index: usize) -> Result<Picture, ModelError> {
        let from = self
            .position_of(id)
            .ok_or_else(|| ModelError::PieceNotFound(id.to_string()))?;
        check_position_index(new_index, self.pieces.len())?;

        log::debug!("Moving piece '{}' from layer {} to {}", id, from, new_index);
        let mut next = self.clone();
        let piece = next.pieces.remove(from);
        next.pieces.insert(new_index, piece);
        Ok(next)
    }

    /// Return a copy with piece `id` replaced in place by `piece`.
    ///
    /// The replacement may carry a different id as long as it does not collide
    /// with another piece.
    #[must_use = "returns the updated picture"]
    pub fn replace_piece(&self, id: &str, piece: Piece) -> Result<Picture, ModelError> {
        let index = self
            .position_of(id)
            .ok_or_else(|| ModelError::PieceNotFound(id.to_string()))?;
        if piece.id != id && self.contains_id(&piece.id) {
            return Err(ModelError::DuplicateId(piece.id));
        }

        let mut next = self.clone();
        next.pieces[index] = piece;
        Ok(next)
    }

    /// Apply a fallible edit to one piece and put the result back in place.
    #[must_use = "returns the updated picture"]
    pub fn update_piece<F>(&self, id: &str, edit: F) -> Result<Picture, ModelError>
    where
        F: FnOnce(&Piece) -> Result<Piece, ModelError>,
    {
        let piece = self
            .get(id)
            .ok_or_else(|| ModelError::PieceNotFound(id.to_string()))?;
        let edited = edit(piece)?;
        self.replace_piece(id, edited)
    }
}

impl<'a> IntoIterator for &'a Picture {
    type Item = &'a Piece;
    type IntoIter = std::slice::Iter<'a, Piece>;

    fn into_iter(self) -> Self::IntoIter {
        self.pieces.iter()
    }
}
