use rstar::{Envelope, PointDistance, RTree, RTreeObject, AABB};

use crate::geometry::{BBox, Point};
use crate::picture::Picture;

/// An entry in the R-tree, referencing a piece by its layer in the picture.
#[derive(Debug, Clone)]
pub struct PieceEntry {
    /// Position of the piece in the picture (its z-order).
    pub layer: usize,
    pub piece_id: String,
    pub bbox: BBox,
}

impl RTreeObject for PieceEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.bbox.min.x, self.bbox.min.y],
            [self.bbox.max.x, self.bbox.max.y],
        )
    }
}

impl PointDistance for PieceEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        self.envelope().distance_2(point)
    }

    fn contains_point(&self, point: &[f64; 2]) -> bool {
        self.envelope().contains_point(point)
    }
}

/// Spatial index over one picture for picking and viewport culling.
///
/// Pieces without points have no extent and are not indexed. The index is a
/// snapshot; rebuild it after editing the picture.
pub struct PieceIndex {
    tree: RTree<PieceEntry>,
}

impl PieceIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    pub fn build(picture: &Picture) -> Self {
        let entries = picture
            .pieces()
            .iter()
            .enumerate()
            .filter_map(|(layer, piece)| {
                piece.bbox().map(|bbox| PieceEntry {
                    layer,
                    piece_id: piece.id.clone(),
                    bbox,
                })
            })
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// All entries whose bounding box contains the point, bottom layer first.
    pub fn query_point(&self, point: &Point) -> Vec<&PieceEntry> {
        let mut hits: Vec<&PieceEntry> = self
            .tree
            .locate_all_at_point(&[point.x, point.y])
            .collect();
        hits.sort_by_key(|e| e.layer);
        hits
    }

    /// The topmost piece whose bounding box contains the point.
    pub fn pick(&self, point: &Point) -> Option<&PieceEntry> {
        self.tree
            .locate_all_at_point(&[point.x, point.y])
            .max_by_key(|e| e.layer)
    }

    /// Entries intersecting the viewport, bottom layer first.
    pub fn query_viewport(&self, viewport: &BBox) -> Vec<&PieceEntry> {
        let envelope = AABB::from_corners(
            [viewport.min.x, viewport.min.y],
            [viewport.max.x, viewport.max.y],
        );
        let mut hits: Vec<&PieceEntry> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .collect();
        hits.sort_by_key(|e| e.layer);
        hits
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl Default for PieceIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Piece;

    fn rect(id: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> Piece {
        Piece::from_points(
            id,
            "#000",
            vec![
                Point::new(x0, y0),
                Point::new(x1, y0),
                Point::new(x1, y1),
                Point::new(x0, y1),
            ],
        )
        .unwrap()
    }

    fn layered() -> Picture {
        Picture::from_pieces(vec![
            rect("bottom", 0.0, 0.0, 10.0, 10.0),
            Piece::new("empty", "#fff"),
            rect("top", 5.0, 5.0, 15.0, 15.0),
            rect("far", 20.0, 20.0, 30.0, 30.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_pieces_not_indexed() {
        let index = PieceIndex::build(&layered());
        assert_eq!(index.len(), 3);
        assert!(PieceIndex::build(&Picture::new()).is_empty());
    }

    #[test]
    fn test_pick_prefers_top_layer() {
        let index = PieceIndex::build(&layered());

        let hit = index.pick(&Point::new(7.0, 7.0)).unwrap();
        assert_eq!(hit.piece_id, "top");
        assert_eq!(hit.layer, 2);

        let hits = index.query_point(&Point::new(7.0, 7.0));
        let ids: Vec<&str> = hits.iter().map(|e| e.piece_id.as_str()).collect();
        assert_eq!(ids, ["bottom", "top"]);

        assert_eq!(index.pick(&Point::new(2.0, 2.0)).unwrap().piece_id, "bottom");
        assert!(index.pick(&Point::new(17.0, 2.0)).is_none());
    }

    #[test]
    fn test_viewport_query() {
        let index = PieceIndex::build(&layered());
        let viewport = BBox::new(Point::new(-5.0, -5.0), Point::new(4.0, 4.0));
        let results = index.query_viewport(&viewport);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].piece_id, "bottom");

        let everything = BBox::new(Point::new(-100.0, -100.0), Point::new(100.0, 100.0));
        let layers: Vec<usize> = index
            .query_viewport(&everything)
            .iter()
            .map(|e| e.layer)
            .collect();
        assert_eq!(layers, [0, 2, 3]);
    }
}
