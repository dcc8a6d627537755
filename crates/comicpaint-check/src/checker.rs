use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use comicpaint_core::{Comic, Picture, Piece, Rgba};

use crate::violation::{Severity, Violation, ViolationKind};

/// The outcome of checking a comic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub violations: Vec<Violation>,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.violations.iter().any(|v| v.severity == Severity::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Violation> {
        self.by_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Violation> {
        self.by_severity(Severity::Warning)
    }

    pub fn by_severity(&self, severity: Severity) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.severity == severity)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    fn push(&mut self, violation: Violation) {
        match violation.severity {
            Severity::Error => log::warn!("{}", violation),
            Severity::Warning => log::info!("{}", violation),
            Severity::Info => log::debug!("{}", violation),
        }
        self.violations.push(violation);
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in &self.violations {
            writeln!(f, "{}", v)?;
        }
        Ok(())
    }
}

/// Check a whole comic, page by page.
pub fn check_comic(comic: &Comic) -> Report {
    let mut report = Report::default();
    if comic.name.trim().is_empty() {
        report.push(Violation::new(
            ViolationKind::EmptyComicName,
            "comic has no name",
        ));
    }
    for (index, page) in comic.pages().iter().enumerate() {
        check_page(page, Some(index), &mut report);
    }
    log::debug!(
        "Checked comic '{}': {} violation(s)",
        comic.name,
        report.violations.len()
    );
    report
}

/// Check a single picture outside of any comic.
pub fn check_picture(picture: &Picture) -> Report {
    let mut report = Report::default();
    check_page(picture, None, &mut report);
    report
}

fn check_page(picture: &Picture, page: Option<usize>, report: &mut Report) {
    let locate = |v: Violation| match page {
        Some(p) => v.on_page(p),
        None => v,
    };

    let mut seen = HashSet::new();
    for piece in picture {
        if piece.id.is_empty() {
            report.push(locate(Violation::new(
                ViolationKind::EmptyPieceId,
                "piece has an empty id",
            )));
        } else if !seen.insert(piece.id.as_str()) {
            report.push(locate(
                Violation::new(ViolationKind::DuplicatePieceId, "id is used more than once")
                    .on_piece(&piece.id),
            ));
        }
        for v in check_piece(piece) {
            report.push(locate(v));
        }
    }
}

fn check_piece(piece: &Piece) -> Vec<Violation> {
    let mut found = Vec::new();
    if Rgba::parse(&piece.color).is_none() {
        found.push(
            Violation::new(
                ViolationKind::InvalidColor,
                format!("unrecognized color '{}'", piece.color),
            )
            .on_piece(&piece.id),
        );
    }
    if piece.is_empty() {
        found.push(
            Violation::new(ViolationKind::EmptyPiece, "piece has no points").on_piece(&piece.id),
        );
    }
    for (i, p) in piece.points.iter().enumerate() {
        if !p.is_finite() {
            found.push(
                Violation::new(
                    ViolationKind::NonFinitePoint,
                    format!("point ({}, {}) is not finite", p.x, p.y),
                )
                .on_piece(&piece.id)
                .at_point(i),
            );
        }
    }
    found
}
