//! SVG export of a single page. Pieces are written in picture order, so later
//! pieces cover earlier ones exactly as on the canvas.

use std::io::{self, Write};

use comicpaint_core::{BBox, Picture, Piece, Point};

/// Radius of the dot drawn for a piece with a single point.
const DOT_RADIUS: f64 = 0.5;

/// The SVG format writer.
#[derive(Debug)]
pub struct SvgWriter<W: Write> {
    writer: W,
}

impl<W: Write> SvgWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write `picture` as a standalone SVG document whose view box is
    /// `bounds`, or the picture's own bounding box when `None`.
    pub fn write_picture(&mut self, picture: &Picture, bounds: Option<BBox>) -> io::Result<()> {
        let bounds = bounds
            .or_else(|| picture.bbox())
            .unwrap_or_else(|| BBox::new(Point::new(0.0, 0.0), Point::new(0.0, 0.0)));

        self.begin(&bounds)?;
        for piece in picture {
            self.draw_piece(piece)?;
        }
        self.end()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn begin(&mut self, bounds: &BBox) -> io::Result<()> {
        writeln!(
            self.writer,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="{}" height="{}">"#,
            bounds.min.x,
            bounds.min.y,
            bounds.width(),
            bounds.height(),
            bounds.width(),
            bounds.height(),
        )
    }

    fn draw_piece(&mut self, piece: &Piece) -> io::Result<()> {
        let id = escape_attr(&piece.id);
        let color = escape_attr(&piece.color);
        match piece.points.as_slice() {
            [] => Ok(()),
            [p] => writeln!(
                self.writer,
                r#"  <circle id="{}" cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                id, p.x, p.y, DOT_RADIUS, color
            ),
            [first, rest @ ..] => {
                let mut d = format!("M {} {}", first.x, first.y);
                for p in rest {
                    d.push_str(&format!(" L {} {}", p.x, p.y));
                }
                d.push_str(" Z");
                writeln!(
                    self.writer,
                    r#"  <path id="{}" d="{}" fill="{}" stroke="{}"/>"#,
                    id, d, color, color
                )
            }
        }
    }

    fn end(&mut self) -> io::Result<()> {
        writeln!(self.writer, "</svg>")?;
        self.writer.flush()
    }
}

/// Render `picture` to an SVG string.
pub fn picture_to_svg(picture: &Picture) -> io::Result<String> {
    let mut svg = SvgWriter::new(Vec::new());
    svg.write_picture(picture, None)?;
    String::from_utf8(svg.into_inner()).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
