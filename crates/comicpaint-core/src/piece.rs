use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::color::Rgba;
use crate::error::{check_insert_index, check_position_index, ModelError};
use crate::geometry::{BBox, Point};

/// Piece identifier, unique within the picture that holds the piece.
pub type PieceId = String;

/// An identified, colored, ordered run of points forming one drawable shape.
///
/// The point order is the drawing order of the path. A piece without points is
/// a valid placeholder that renders nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub color: String,
    pub points: Vec<Point>,
}

impl Piece {
    /// A piece with no points yet. Id uniqueness is checked when the piece is
    /// inserted into a picture.
    pub fn new(id: impl Into<PieceId>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            color: color.into(),
            points: Vec::new(),
        }
    }

    /// A piece with a freshly generated UUID id.
    pub fn with_generated_id(color: impl Into<String>) -> Self {
        Self::new(Uuid::new_v4().to_string(), color)
    }

    /// Build a piece from existing points, validating each one.
    pub fn from_points(
        id: impl Into<PieceId>,
        color: impl Into<String>,
        points: Vec<Point>,
    ) -> Result<Self, ModelError> {
        for p in &points {
            p.validate()?;
        }
        Ok(Self {
            id: id.into(),
            color: color.into(),
            points,
        })
    }

    /// Return a copy with `point` inserted at `index`, or appended when `index` is `None`.
    #[must_use = "returns the updated piece"]
    pub fn add_point(&self, point: Point, index: Option<usize>) -> Result<Piece, ModelError> {
        point.validate()?;
        let index = index.unwrap_or(self.points.len());
        check_insert_index(index, self.points.len())?;

        let mut next = self.clone();
        next.points.insert(index, point);
        Ok(next)
    }

    #[must_use = "returns the updated piece"]
    pub fn remove_point(&self, index: usize) -> Result<Piece, ModelError> {
        check_position_index(index, self.points.len())?;
        let mut next = self.clone();
        next.points.remove(index);
        Ok(next)
    }

    /// Return a copy with the point at `index` replaced by `point`.
    #[must_use = "returns the updated piece"]
    pub fn move_point(&self, index: usize, point: Point) -> Result<Piece, ModelError> {
        point.validate()?;
        check_position_index(index, self.points.len())?;
        let mut next = self.clone();
        next.points[index] = point;
        Ok(next)
    }

    #[must_use = "returns the updated piece"]
    pub fn recolor(&self, color: impl Into<String>) -> Piece {
        Piece {
            color: color.into(),
            ..self.clone()
        }
    }

    #[must_use = "returns the updated piece"]
    pub fn translate(&self, dx: f64, dy: f64) -> Result<Piece, ModelError> {
        let points = self
            .points
            .iter()
            .map(|p| {
                let moved = p.translate(dx, dy);
                moved.validate().map(|_| moved)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Piece {
            points,
            ..self.clone()
        })
    }

    pub fn bbox(&self) -> Option<BBox> {
        BBox::from_points(&self.points)
    }

    /// Parsed color, `None` when the color string is not understood.
    pub fn rgba(&self) -> Option<Rgba> {
        Rgba::parse(&self.color)
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
