use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::comic::Comic;
use crate::commands::{Command, CommandHistory};
use crate::error::ModelError;

/// An editing session over one comic.
///
/// The document is where in-place editing happens: each command replaces the
/// held comic with the value the command derives from it, and the history
/// keeps enough snapshots to step back and forth.
#[derive(Debug, Serialize, Deserialize)]
pub struct ComicDocument {
    /// Session identifier.
    pub id: Uuid,
    comic: Comic,
    /// Set by every successful edit, cleared by [`ComicDocument::mark_saved`].
    #[serde(skip)]
    modified: bool,
    #[serde(skip)]
    command_history: CommandHistory,
}

impl ComicDocument {
    pub fn new(name: &str) -> Self {
        Self::from_comic(Comic::new(name))
    }

    pub fn from_comic(comic: Comic) -> Self {
        Self {
            id: Uuid::new_v4(),
            comic,
            modified: false,
            command_history: CommandHistory::new(),
        }
    }

    /// Keep at most `limit` undo steps.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.command_history = CommandHistory::with_limit(limit);
        self
    }

    pub fn comic(&self) -> &Comic {
        &self.comic
    }

    pub fn into_comic(self) -> Comic {
        self.comic
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    // ── Undo / Redo ──────────────────────────────────────────────────

    pub fn execute_command(&mut self, command: Box<dyn Command>) -> Result<(), ModelError> {
        self.comic = self.command_history.execute(command, &self.comic)?;
        self.modified = true;
        Ok(())
    }

    pub fn undo(&mut self) -> bool {
        match self.command_history.undo() {
            Some(comic) => {
                self.comic = comic;
                self.modified = true;
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.command_history.redo() {
            Some(comic) => {
                self.comic = comic;
                self.modified = true;
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.command_history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.command_history.can_redo()
    }

    pub fn history(&self) -> &CommandHistory {
        &self.command_history
    }

    // ── Serialization ────────────────────────────────────────────────

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{AddPageCommand, AddPieceCommand, RemovePieceCommand};
    use crate::picture::Picture;
    use crate::piece::Piece;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_document_create() {
        let doc = ComicDocument::new("demo");
        assert_eq!(doc.comic().name, "demo");
        assert!(doc.comic().is_empty());
        assert!(!doc.is_modified());
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_execute_undo_redo() {
        init_logger();
        let mut doc = ComicDocument::new("demo");
        doc.execute_command(Box::new(AddPageCommand::new(Picture::new())))
            .unwrap();
        doc.execute_command(Box::new(AddPieceCommand::new(0, Piece::new("a", "#f00"))))
            .unwrap();
        assert!(doc.is_modified());
        assert_eq!(doc.comic().total_pieces(), 1);

        assert!(doc.undo());
        assert_eq!(doc.comic().total_pieces(), 0);
        assert_eq!(doc.comic().page_count(), 1);
        assert!(doc.redo());
        assert_eq!(doc.comic().total_pieces(), 1);
        assert!(!doc.redo());
    }

    #[test]
    fn test_failed_command_leaves_document_untouched() {
        init_logger();
        let mut doc = ComicDocument::new("demo");
        let before = doc.comic().clone();
        let err = doc
            .execute_command(Box::new(RemovePieceCommand::new(0, "a")))
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(doc.comic(), &before);
        assert!(!doc.is_modified());
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_json_skips_history() {
        let mut doc = ComicDocument::new("demo");
        doc.execute_command(Box::new(AddPageCommand::new(Picture::new())))
            .unwrap();
        let json = doc.to_json().unwrap();
        let back = ComicDocument::from_json(&json).unwrap();
        assert_eq!(back.id, doc.id);
        assert_eq!(back.comic(), doc.comic());
        assert!(!back.can_undo());
        assert!(!back.is_modified());
    }
}
