use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use comicpaint_check::{check_comic, Report};
use comicpaint_core::Comic;

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed comic document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Comic failed validation:\n{0}")]
    Invalid(Report),
}

pub fn to_json(comic: &Comic) -> Result<String, PersistError> {
    Ok(serde_json::to_string(comic)?)
}

pub fn to_json_pretty(comic: &Comic) -> Result<String, PersistError> {
    Ok(serde_json::to_string_pretty(comic)?)
}

/// Parse a comic document. No validation is done here; see [`load`].
pub fn from_json(json: &str) -> Result<Comic, PersistError> {
    Ok(serde_json::from_str(json)?)
}

/// Write a comic to `path` as pretty JSON.
///
/// Comics with validation errors (no name, duplicate ids, non-finite points)
/// are refused and nothing is written.
pub fn save(comic: &Comic, path: impl AsRef<Path>) -> Result<(), PersistError> {
    let path = path.as_ref();
    let report = check_comic(comic);
    if report.has_errors() {
        return Err(PersistError::Invalid(report));
    }
    let json = to_json_pretty(comic)?;
    fs::write(path, json)?;
    log::info!(
        "Saved comic '{}' ({} pages) to {}",
        comic.name,
        comic.page_count(),
        path.display()
    );
    Ok(())
}

/// Read and validate a comic from `path`.
///
/// Warnings are logged and the comic is returned; errors reject the document.
pub fn load(path: impl AsRef<Path>) -> Result<Comic, PersistError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)?;
    let comic = from_json(&json)?;
    let report = check_comic(&comic);
    if report.has_errors() {
        return Err(PersistError::Invalid(report));
    }
    for warning in report.warnings() {
        log::warn!("{}: {}", path.display(), warning);
    }
    log::info!(
        "Loaded comic '{}' ({} pages) from {}",
        comic.name,
        comic.page_count(),
        path.display()
    );
    Ok(comic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use comicpaint_check::ViolationKind;
    use comicpaint_core::{Picture, Piece, Point};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn sample() -> Comic {
        let a = Piece::from_points(
            "a",
            "#f00",
            vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
        )
        .unwrap();
        let b = Piece::from_points(
            "b",
            "#0f0",
            vec![Point::new(-2.5, 3.25), Point::new(4.0, 0.5), Point::new(0.0, 9.0)],
        )
        .unwrap();
        let page0 = Picture::from_pieces(vec![a, b]).unwrap();
        let page1 = Picture::from_pieces(vec![Piece::new("c", "navy")]).unwrap();
        Comic::with_pages("demo", vec![page0, Picture::new(), page1])
    }

    #[test]
    fn test_json_roundtrip() {
        let comic = sample();
        let back = from_json(&to_json(&comic).unwrap()).unwrap();
        assert_eq!(back, comic);
        let back = from_json(&to_json_pretty(&comic).unwrap()).unwrap();
        assert_eq!(back, comic);
    }

    #[test]
    fn test_json_roundtrip_preserves_exact_coordinates() {
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = || {
            seed = seed
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            (seed >> 11) as f64 / (1u64 << 53) as f64 * 1000.0
        };
        let mut points: Vec<Point> = (0..500).map(|_| Point::new(next(), next())).collect();
        points.push(Point::new(985.6906946328695, 1.0715660391465826e-75));
        points.push(Point::new(0.1, 1.0 / 3.0));

        let piece = Piece::from_points("dense", "#123456", points).unwrap();
        let page = Picture::from_pieces(vec![piece]).unwrap();
        let comic = Comic::with_pages("precise", vec![page]);

        let back = from_json(&to_json(&comic).unwrap()).unwrap();
        assert_eq!(back, comic);
        let back = from_json(&to_json_pretty(&comic).unwrap()).unwrap();
        assert_eq!(back, comic);
    }

    #[test]
    fn test_field_names_and_order() {
        let json = to_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["name"], "demo");
        let pages = value["pieces"].as_array().unwrap();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0][0]["id"], "a");
        assert_eq!(pages[0][1]["id"], "b");
        assert_eq!(pages[0][1]["color"], "#0f0");
        assert_eq!(pages[0][1]["points"][0]["x"], -2.5);
        assert_eq!(pages[0][1]["points"][2]["y"], 9.0);
        assert!(pages[1].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_reads_plain_document() {
        let json = r##"{"name":"demo","pieces":[[{"id":"a","color":"#f00","points":[{"x":0,"y":0},{"x":1,"y":1}]}]]}"##;
        let comic = from_json(json).unwrap();
        let page = comic.page(0).unwrap();
        assert_eq!(page.get("a").unwrap().points[1], Point::new(1.0, 1.0));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(from_json("{\"name\": 3}"), Err(PersistError::Json(_))));
    }

    #[test]
    fn test_save_and_load() {
        init_logger();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.json");
        let comic = sample();
        save(&comic, &path).unwrap();
        assert_eq!(load(&path).unwrap(), comic);
    }

    #[test]
    fn test_save_refuses_unnamed_comic() {
        init_logger();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unnamed.json");
        let err = save(&Comic::new(""), &path).unwrap_err();
        match err {
            PersistError::Invalid(report) => {
                assert_eq!(report.violations[0].kind, ViolationKind::EmptyComicName)
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_load_rejects_duplicate_ids() {
        init_logger();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dup.json");
        fs::write(
            &path,
            r##"{"name":"d","pieces":[[{"id":"a","color":"#000","points":[]},{"id":"a","color":"#fff","points":[]}]]}"##,
        )
        .unwrap();
        assert!(matches!(load(&path), Err(PersistError::Invalid(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load(dir.path().join("nope.json")),
            Err(PersistError::Io(_))
        ));
    }
}
