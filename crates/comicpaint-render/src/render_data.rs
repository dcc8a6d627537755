use serde::{Deserialize, Serialize};

use comicpaint_core::spatial::PieceIndex;
use comicpaint_core::{Picture, Piece, Rgba};

use crate::viewport::Viewport;

/// Color used for pieces whose color string does not parse.
pub const FALLBACK_COLOR: Rgba = Rgba {
    r: 255,
    g: 0,
    b: 255,
    a: 255,
};

/// A piece ready for drawing, in screen space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderPiece {
    pub id: String,
    /// Position in the picture; higher layers draw over lower ones.
    pub layer: usize,
    pub color: [f32; 4],
    /// Flat array of screen vertices: [x0, y0, x1, y1, ...]
    pub vertices: Vec<f64>,
    pub selected: bool,
}

/// Complete draw list for one page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderFrame {
    /// Pieces in draw order.
    pub pieces: Vec<RenderPiece>,
    pub viewport: Viewport,
    /// Pieces skipped because they have no points or lie off screen.
    pub culled: usize,
}

impl RenderFrame {
    pub fn empty(viewport: Viewport) -> Self {
        Self {
            pieces: Vec::new(),
            viewport,
            culled: 0,
        }
    }

    /// Build the draw list for `picture`, keeping its order.
    pub fn from_picture(picture: &Picture, viewport: &Viewport) -> Self {
        Self::from_index(picture, &PieceIndex::build(picture), viewport)
    }

    /// Build the draw list using an index already built for `picture`.
    ///
    /// The index must be a snapshot of this picture; it decides which layers
    /// are visible, the picture supplies their geometry.
    pub fn from_index(picture: &Picture, index: &PieceIndex, viewport: &Viewport) -> Self {
        let mut frame = Self::empty(*viewport);
        let pieces = picture.pieces();
        for entry in index.query_viewport(&viewport.visible_bounds()) {
            if let Some(piece) = pieces.get(entry.layer) {
                frame.pieces.push(render_piece(piece, entry.layer, viewport));
            }
        }
        frame.culled = pieces.len() - frame.pieces.len();
        log::trace!(
            "Render frame: {} pieces drawn, {} culled",
            frame.pieces.len(),
            frame.culled
        );
        frame
    }

    /// Mark the piece `id` as selected.
    pub fn with_selection(mut self, id: &str) -> Self {
        for piece in &mut self.pieces {
            piece.selected = piece.id == id;
        }
        self
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn render_piece(piece: &Piece, layer: usize, viewport: &Viewport) -> RenderPiece {
    let rgba = piece.rgba().unwrap_or_else(|| {
        log::debug!("Piece '{}' has unknown color '{}'", piece.id, piece.color);
        FALLBACK_COLOR
    });
    let vertices = piece
        .points
        .iter()
        .flat_map(|p| {
            let s = viewport.canvas_to_screen(*p);
            [s.x, s.y]
        })
        .collect();
    RenderPiece {
        id: piece.id.clone(),
        layer,
        color: rgba.to_f32_array(),
        vertices,
        selected: false,
    }
}
