use serde::{Deserialize, Serialize};

use comicpaint_core::{Comic, Picture};

/// Current page of the viewer.
///
/// The cursor only stores an index; every move is clamped against the comic
/// it is given, so a cursor stays usable after pages are added or removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    index: usize,
}

impl PageCursor {
    pub fn new() -> Self {
        Self { index: 0 }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The page under the cursor, `None` for a comic without pages.
    pub fn current<'a>(&self, comic: &'a Comic) -> Option<&'a Picture> {
        comic.pages().get(self.clamped(comic))
    }

    /// Advance one page. Returns false when already on the last page.
    pub fn next(&mut self, comic: &Comic) -> bool {
        self.go_to(comic, self.clamped(comic) + 1)
    }

    /// Step back one page. Returns false when already on the first page.
    pub fn previous(&mut self, comic: &Comic) -> bool {
        match self.clamped(comic).checked_sub(1) {
            Some(index) => self.go_to(comic, index),
            None => false,
        }
    }

    /// Jump to `index`, clamped to the last page. Returns whether the cursor moved.
    pub fn go_to(&mut self, comic: &Comic, index: usize) -> bool {
        let target = index.min(comic.page_count().saturating_sub(1));
        let moved = target != self.index;
        self.index = target;
        moved
    }

    pub fn first(&mut self, comic: &Comic) -> bool {
        self.go_to(comic, 0)
    }

    pub fn last(&mut self, comic: &Comic) -> bool {
        self.go_to(comic, usize::MAX)
    }

    pub fn is_first(&self, comic: &Comic) -> bool {
        self.clamped(comic) == 0
    }

    pub fn is_last(&self, comic: &Comic) -> bool {
        self.clamped(comic) + 1 >= comic.page_count()
    }

    fn clamped(&self, comic: &Comic) -> usize {
        self.index.min(comic.page_count().saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comicpaint_core::Piece;

    fn comic(pages: usize) -> Comic {
        let pictures = (0..pages)
            .map(|i| Picture::from_pieces(vec![Piece::new(format!("p{i}"), "#000")]).unwrap())
            .collect();
        Comic::with_pages("demo", pictures)
    }

    fn current_id(cursor: &PageCursor, comic: &Comic) -> String {
        cursor.current(comic).unwrap().pieces()[0].id.clone()
    }

    #[test]
    fn test_navigation() {
        let c = comic(3);
        let mut cursor = PageCursor::new();
        assert_eq!(current_id(&cursor, &c), "p0");
        assert!(!cursor.previous(&c));
        assert!(cursor.next(&c));
        assert!(cursor.next(&c));
        assert_eq!(current_id(&cursor, &c), "p2");
        assert!(cursor.is_last(&c));
        assert!(!cursor.next(&c));
        assert!(cursor.previous(&c));
        assert_eq!(cursor.index(), 1);
    }

    #[test]
    fn test_jumps_are_clamped() {
        let c = comic(4);
        let mut cursor = PageCursor::new();
        assert!(cursor.go_to(&c, 99));
        assert_eq!(cursor.index(), 3);
        assert!(cursor.first(&c));
        assert!(cursor.is_first(&c));
        assert!(cursor.last(&c));
        assert_eq!(cursor.index(), 3);
    }

    #[test]
    fn test_shrinking_comic() {
        let mut cursor = PageCursor::new();
        cursor.go_to(&comic(5), 4);
        let smaller = comic(2);
        assert_eq!(current_id(&cursor, &smaller), "p1");
        assert!(!cursor.is_first(&smaller));
        assert!(cursor.previous(&smaller));
        assert_eq!(cursor.index(), 0);

        cursor.go_to(&comic(5), 4);
        let single = comic(1);
        assert_eq!(current_id(&cursor, &single), "p0");
        assert!(cursor.is_last(&single));
        assert!(cursor.is_first(&single));
    }

    #[test]
    fn test_empty_comic() {
        let empty = Comic::new("empty");
        let mut cursor = PageCursor::new();
        assert!(cursor.current(&empty).is_none());
        assert!(!cursor.next(&empty));
        assert!(!cursor.last(&empty));
        assert!(cursor.is_last(&empty));
    }
}
