//! Line selection state machine.

use crate::model::LineRange;

/// The reviewer's current line selection.
///
/// Empty is `{0, 0}`. Otherwise a single contiguous range in new-side
/// numbering (diff mode) or plain numbering (file mode), `start <= end`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    /// First selected line; also the anchor for extending.
    pub start: u32,
    /// Last selected line.
    pub end: u32,
}

impl Selection {
    /// The empty selection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.start == 0
    }

    /// Replace the selection with a single line.
    pub fn click(&mut self, line: u32) {
        self.start = line;
        self.end = line;
    }

    /// Extend from the current anchor to `line`.
    ///
    /// Without an anchor this behaves like [`Selection::click`]. If `line`
    /// precedes the anchor the bounds are swapped.
    pub fn extend(&mut self, line: u32) {
        if self.is_empty() {
            self.click(line);
            return;
        }
        self.end = line;
        if self.end < self.start {
            std::mem::swap(&mut self.start, &mut self.end);
        }
    }

    /// Reset to empty.
    pub fn clear(&mut self) {
        *self = Self::empty();
    }

    /// Whether `line` is selected.
    pub fn contains(&self, line: u32) -> bool {
        !self.is_empty() && self.start <= line && line <= self.end
    }

    /// The selected range, if any.
    pub fn range(&self) -> Option<LineRange> {
        (!self.is_empty()).then(|| LineRange::new(self.start, self.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_click_replaces_selection() {
        let mut sel = Selection::empty();
        sel.click(5);
        assert_eq!(sel, Selection { start: 5, end: 5 });

        sel.extend(8);
        sel.click(2);
        assert_eq!(sel, Selection { start: 2, end: 2 });
    }

    #[test]
    fn test_extend_backwards_swaps() {
        let mut sel = Selection::empty();
        sel.click(5);
        sel.extend(2);
        assert_eq!(sel, Selection { start: 2, end: 5 });
    }

    #[test]
    fn test_extend_without_anchor_is_click() {
        let mut sel = Selection::empty();
        sel.extend(7);
        assert_eq!(sel, Selection { start: 7, end: 7 });
    }

    #[test]
    fn test_contains_and_clear() {
        let mut sel = Selection::empty();
        assert!(!sel.contains(0));
        assert_eq!(sel.range(), None);

        sel.click(3);
        sel.extend(6);
        assert!(sel.contains(3));
        assert!(sel.contains(6));
        assert!(!sel.contains(7));
        assert_eq!(sel.range(), Some(LineRange::new(3, 6)));

        sel.clear();
        assert!(sel.is_empty());
    }
}
