use serde::{Deserialize, Serialize};

use crate::error::{check_insert_index, check_position_index, ModelError};
use crate::picture::Picture;

/// A named, ordered sequence of pictures (pages).
///
/// Pages are stored under the key `pieces` when serialized, matching the
/// documents written by earlier versions of the editor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comic {
    pub name: String,
    #[serde(rename = "pieces", alias = "pages", default)]
    pages: Vec<Picture>,
}

impl Comic {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pages: Vec::new(),
        }
    }

    pub fn with_pages(name: impl Into<String>, pages: Vec<Picture>) -> Self {
        Self {
            name: name.into(),
            pages,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn pages(&self) -> &[Picture] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Result<&Picture, ModelError> {
        self.pages.get(index).ok_or(ModelError::PageNotFound {
            index,
            len: self.pages.len(),
        })
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Number of pieces across all pages.
    pub fn total_pieces(&self) -> usize {
        self.pages.iter().map(Picture::len).sum()
    }

    // ── Pure edits ───────────────────────────────────────────────────

    #[must_use = "returns the updated comic"]
    pub fn rename(&self, name: impl Into<String>) -> Comic {
        Comic {
            name: name.into(),
            pages: self.pages.clone(),
        }
    }

    /// Return a copy with `picture` inserted at `index`, or appended when `index` is `None`.
    #[must_use = "returns the updated comic"]
    pub fn insert_page(&self, picture: Picture, index: Option<usize>) -> Result<Comic, ModelError> {
        let index = index.unwrap_or(self.pages.len());
        check_insert_index(index, self.pages.len())?;

        log::debug!("Inserting page at {} in comic '{}'", index, self.name);
        let mut next = self.clone();
        next.pages.insert(index, picture);
        Ok(next)
    }

    #[must_use = "returns the updated comic"]
    pub fn remove_page(&self, index: usize) -> Result<Comic, ModelError> {
        self.page(index)?;

        log::debug!("Removing page {} from comic '{}'", index, self.name);
        let mut next = self.clone();
        next.pages.remove(index);
        Ok(next)
    }

    /// Return a copy with page `index` moved so that it ends up at `new_index`.
    #[must_use = "returns the updated comic"]
    pub fn reorder_page(&self, index: usize, new_index: usize) -> Result<Comic, ModelError> {
        self.page(index)?;
        check_position_index(new_index, self.pages.len())?;

        log::debug!("Moving page {} to {} in comic '{}'", index, new_index, self.name);
        let mut next = self.clone();
        let page = next.pages.remove(index);
        next.pages.insert(new_index, page);
        Ok(next)
    }

    /// Return a copy with page `index` replaced by `picture`.
    #[must_use = "returns the updated comic"]
    pub fn replace_page(&self, index: usize, picture: Picture) -> Result<Comic, ModelError> {
        self.page(index)?;
        let mut next = self.clone();
        next.pages[index] = picture;
        Ok(next)
    }

    /// Apply a fallible edit to one page and put the result back in place.
    #[must_use = "returns the updated comic"]
    pub fn update_page<F>(&self, index: usize, edit: F) -> Result<Comic, ModelError>
    where
        F: FnOnce(&Picture) -> Result<Picture, ModelError>,
    {
        let edited = edit(self.page(index)?)?;
        self.replace_page(index, edited)
    }
}
