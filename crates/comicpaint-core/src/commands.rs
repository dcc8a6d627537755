use crate::comic::Comic;
use crate::error::ModelError;
use crate::geometry::Point;
use crate::picture::Picture;
use crate::piece::Piece;

/// An edit for the undo/redo system.
///
/// Commands are pure: `apply` derives the next comic from the current one.
/// The history keeps the snapshots, so commands never need an inverse.
pub trait Command: std::fmt::Debug + Send {
    /// Produce the edited comic, or fail without side effects.
    fn apply(&self, comic: &Comic) -> Result<Comic, ModelError>;
    /// Human-readable description for the undo/redo history.
    fn description(&self) -> &str;
}

// ══════════════════════════════════════════════════════════════════════
// Piece-level commands
// ══════════════════════════════════════════════════════════════════════

/// Insert a piece into a page (on top when `index` is `None`).
#[derive(Debug)]
pub struct AddPieceCommand {
    pub page: usize,
    pub piece: Piece,
    pub index: Option<usize>,
}

impl AddPieceCommand {
    pub fn new(page: usize, piece: Piece) -> Self {
        Self {
            page,
            piece,
            index: None,
        }
    }

    pub fn at(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

impl Command for AddPieceCommand {
    fn apply(&self, comic: &Comic) -> Result<Comic, ModelError> {
        comic.update_page(self.page, |p| p.insert_piece(self.piece.clone(), self.index))
    }

    fn description(&self) -> &str {
        "Add piece"
    }
}

/// Remove a piece from a page by id.
#[derive(Debug)]
pub struct RemovePieceCommand {
    pub page: usize,
    pub piece_id: String,
}

impl RemovePieceCommand {
    pub fn new(page: usize, piece_id: impl Into<String>) -> Self {
        Self {
            page,
            piece_id: piece_id.into(),
        }
    }
}

impl Command for RemovePieceCommand {
    fn apply(&self, comic: &Comic) -> Result<Comic, ModelError> {
        comic.update_page(self.page, |p| p.remove_piece(&self.piece_id))
    }

    fn description(&self) -> &str {
        "Remove piece"
    }
}

/// Move a piece to another layer of the same page.
#[derive(Debug)]
pub struct ReorderPieceCommand {
    pub page: usize,
    pub piece_id: String,
    pub new_index: usize,
}

impl ReorderPieceCommand {
    pub fn new(page: usize, piece_id: impl Into<String>, new_index: usize) -> Self {
        Self {
            page,
            piece_id: piece_id.into(),
            new_index,
        }
    }
}

impl Command for ReorderPieceCommand {
    fn apply(&self, comic: &Comic) -> Result<Comic, ModelError> {
        comic.update_page(self.page, |p| p.reorder_piece(&self.piece_id, self.new_index))
    }

    fn description(&self) -> &str {
        "Reorder piece"
    }
}

/// Change the color of a piece.
#[derive(Debug)]
pub struct RecolorPieceCommand {
    pub page: usize,
    pub piece_id: String,
    pub color: String,
}

impl RecolorPieceCommand {
    pub fn new(page: usize, piece_id: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            page,
            piece_id: piece_id.into(),
            color: color.into(),
        }
    }
}

impl Command for RecolorPieceCommand {
    fn apply(&self, comic: &Comic) -> Result<Comic, ModelError> {
        comic.update_page(self.page, |p| {
            p.update_piece(&self.piece_id, |piece| Ok(piece.recolor(self.color.clone())))
        })
    }

    fn description(&self) -> &str {
        "Recolor piece"
    }
}

/// Translate every point of a piece by a delta.
#[derive(Debug)]
pub struct MovePieceCommand {
    pub page: usize,
    pub piece_id: String,
    pub delta: Point,
}

impl MovePieceCommand {
    pub fn new(page: usize, piece_id: impl Into<String>, delta: Point) -> Self {
        Self {
            page,
            piece_id: piece_id.into(),
            delta,
        }
    }
}

impl Command for MovePieceCommand {
    fn apply(&self, comic: &Comic) -> Result<Comic, ModelError> {
        comic.update_page(self.page, |p| {
            p.update_piece(&self.piece_id, |piece| {
                piece.translate(self.delta.x, self.delta.y)
            })
        })
    }

    fn description(&self) -> &str {
        "Move piece"
    }
}

// ══════════════════════════════════════════════════════════════════════
// Point-level commands
// ══════════════════════════════════════════════════════════════════════

/// Add a point to a piece (appended when `index` is `None`).
#[derive(Debug)]
pub struct AddPointCommand {
    pub page: usize,
    pub piece_id: String,
    pub point: Point,
    pub index: Option<usize>,
}

impl AddPointCommand {
    pub fn new(page: usize, piece_id: impl Into<String>, point: Point) -> Self {
        Self {
            page,
            piece_id: piece_id.into(),
            point,
            index: None,
        }
    }

    pub fn at(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

impl Command for AddPointCommand {
    fn apply(&self, comic: &Comic) -> Result<Comic, ModelError> {
        comic.update_page(self.page, |p| {
            p.update_piece(&self.piece_id, |piece| piece.add_point(self.point, self.index))
        })
    }

    fn description(&self) -> &str {
        "Add point"
    }
}

#[derive(Debug)]
pub struct RemovePointCommand {
    pub page: usize,
    pub piece_id: String,
    pub index: usize,
}

impl RemovePointCommand {
    pub fn new(page: usize, piece_id: impl Into<String>, index: usize) -> Self {
        Self {
            page,
            piece_id: piece_id.into(),
            index,
        }
    }
}

impl Command for RemovePointCommand {
    fn apply(&self, comic: &Comic) -> Result<Comic, ModelError> {
        comic.update_page(self.page, |p| {
            p.update_piece(&self.piece_id, |piece| piece.remove_point(self.index))
        })
    }

    fn description(&self) -> &str {
        "Remove point"
    }
}

/// Drag a single point to a new position.
#[derive(Debug)]
pub struct MovePointCommand {
    pub page: usize,
    pub piece_id: String,
    pub index: usize,
    pub to: Point,
}

impl MovePointCommand {
    pub fn new(page: usize, piece_id: impl Into<String>, index: usize, to: Point) -> Self {
        Self {
            page,
            piece_id: piece_id.into(),
            index,
            to,
        }
    }
}

impl Command for MovePointCommand {
    fn apply(&self, comic: &Comic) -> Result<Comic, ModelError> {
        comic.update_page(self.page, |p| {
            p.update_piece(&self.piece_id, |piece| piece.move_point(self.index, self.to))
        })
    }

    fn description(&self) -> &str {
        "Move point"
    }
}

// ══════════════════════════════════════════════════════════════════════
// Page-level commands
// ══════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub struct AddPageCommand {
    pub picture: Picture,
    pub index: Option<usize>,
}

impl AddPageCommand {
    pub fn new(picture: Picture) -> Self {
        Self {
            picture,
            index: None,
        }
    }

    pub fn at(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

impl Command for AddPageCommand {
    fn apply(&self, comic: &Comic) -> Result<Comic, ModelError> {
        comic.insert_page(self.picture.clone(), self.index)
    }

    fn description(&self) -> &str {
        "Add page"
    }
}

#[derive(Debug)]
pub struct RemovePageCommand {
    pub index: usize,
}

impl RemovePageCommand {
    pub fn new(index: usize) -> Self {
        Self { index }
    }
}

impl Command for RemovePageCommand {
    fn apply(&self, comic: &Comic) -> Result<Comic, ModelError> {
        comic.remove_page(self.index)
    }

    fn description(&self) -> &str {
        "Remove page"
    }
}

#[derive(Debug)]
pub struct ReorderPageCommand {
    pub index: usize,
    pub new_index: usize,
}

impl ReorderPageCommand {
    pub fn new(index: usize, new_index: usize) -> Self {
        Self { index, new_index }
    }
}

impl Command for ReorderPageCommand {
    fn apply(&self, comic: &Comic) -> Result<Comic, ModelError> {
        comic.reorder_page(self.index, self.new_index)
    }

    fn description(&self) -> &str {
        "Reorder page"
    }
}

#[derive(Debug)]
pub struct RenameComicCommand {
    pub name: String,
}

impl RenameComicCommand {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Command for RenameComicCommand {
    fn apply(&self, comic: &Comic) -> Result<Comic, ModelError> {
        Ok(comic.rename(self.name.clone()))
    }

    fn description(&self) -> &str {
        "Rename comic"
    }
}

// ══════════════════════════════════════════════════════════════════════
// History
// ══════════════════════════════════════════════════════════════════════

/// One applied command with the comic before and after it.
#[derive(Debug)]
struct HistoryEntry {
    command: Box<dyn Command>,
    before: Comic,
    after: Comic,
}

/// Manages the undo/redo history stack.
#[derive(Debug, Default)]
pub struct CommandHistory {
    undo_stack: Vec<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
    /// Maximum number of undo steps kept; `None` keeps everything.
    limit: Option<usize>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            limit: None,
        }
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::new()
        }
    }

    /// Apply `command` to `current` and record it.
    ///
    /// On failure nothing is recorded and the redo stack is left alone.
    pub fn execute(
        &mut self,
        command: Box<dyn Command>,
        current: &Comic,
    ) -> Result<Comic, ModelError> {
        let next = command.apply(current)?;
        log::debug!("Executed '{}'", command.description());
        self.undo_stack.push(HistoryEntry {
            command,
            before: current.clone(),
            after: next.clone(),
        });
        // Executing a new command clears the redo stack.
        self.redo_stack.clear();
        if let Some(limit) = self.limit {
            if self.undo_stack.len() > limit {
                let excess = self.undo_stack.len() - limit;
                self.undo_stack.drain(..excess);
            }
        }
        Ok(next)
    }

    /// Step back one command, returning the comic as it was before it.
    pub fn undo(&mut self) -> Option<Comic> {
        let entry = self.undo_stack.pop()?;
        log::debug!("Undo '{}'", entry.command.description());
        let before = entry.before.clone();
        self.redo_stack.push(entry);
        Some(before)
    }

    /// Re-apply the last undone command, returning the comic after it.
    pub fn redo(&mut self) -> Option<Comic> {
        let entry = self.redo_stack.pop()?;
        log::debug!("Redo '{}'", entry.command.description());
        let after = entry.after.clone();
        self.undo_stack.push(entry);
        Some(after)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().map(|e| e.command.description())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(|e| e.command.description())
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
