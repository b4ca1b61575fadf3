//! Pagination arithmetic.

use std::ops::Range;

use serde::Deserialize;
use serde::Serialize;

/// A relative or absolute navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageAction {
    First,
    Prev,
    Next,
    Last,
    /// 1-based page number.
    Goto(usize),
}

/// The visible slice of a result set.
///
/// `offset` is always a multiple of `page_size` and lies in
/// `[0, total_rows)`, or is 0 when there are no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub offset: usize,
    pub page_size: usize,
    pub total_rows: usize,
}

impl Window {
    /// Normalizes `offset` against `total_rows` and applies `action`.
    ///
    /// An offset past the end restarts at the first page; a misaligned one
    /// snaps down to its page. After the action the offset is clamped to the
    /// last page, so `Next` on the last page stays there. `Goto` outside
    /// `1..=pages` is ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use gbrowse_lib::page::{PageAction, Window};
    ///
    /// let window = Window::compute(0, 5, 7, Some(PageAction::Next));
    /// assert_eq!(window.offset, 5);
    /// assert_eq!(window.range(), 5..7);
    /// ```
    pub fn compute(offset: usize, page_size: usize, total_rows: usize, action: Option<PageAction>) -> Self {
        let page_size = page_size.max(1);
        let last = last_offset(total_rows, page_size);

        let mut offset = if offset >= total_rows {
            if offset > 0 {
                log::debug!("offset {} past {} rows, restarting at first page", offset, total_rows);
            }
            0
        } else {
            offset - offset % page_size
        };

        match action {
            Some(PageAction::First) => offset = 0,
            Some(PageAction::Prev) => offset = offset.saturating_sub(page_size),
            Some(PageAction::Next) => offset += page_size,
            Some(PageAction::Last) => offset = last,
            Some(PageAction::Goto(page)) => {
                if page >= 1 && page <= total_rows.div_ceil(page_size) {
                    offset = (page - 1) * page_size;
                } else {
                    log::warn!("ignoring jump to page {} of {} rows", page, total_rows);
                }
            }
            None => {}
        }

        Self {
            offset: offset.min(last),
            page_size,
            total_rows,
        }
    }

    /// Current page, 1-based.
    pub fn page(&self) -> usize {
        self.offset / self.page_size + 1
    }

    /// Number of pages, at least 1.
    pub fn page_count(&self) -> usize {
        self.total_rows.div_ceil(self.page_size).max(1)
    }

    /// One past the last visible row.
    pub fn end(&self) -> usize {
        (self.offset + self.page_size).min(self.total_rows)
    }

    /// Positions of the visible rows.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }

    /// Whether first/prev navigation means anything.
    pub fn has_previous(&self) -> bool {
        self.offset > 0
    }

    /// Whether next/last navigation means anything.
    pub fn has_next(&self) -> bool {
        self.offset + self.page_size < self.total_rows
    }
}

fn last_offset(total_rows: usize, page_size: usize) -> usize {
    if total_rows == 0 {
        0
    } else {
        (total_rows - 1) / page_size * page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_and_prev() {
        let window = Window::compute(0, 5, 7, Some(PageAction::Next));
        assert_eq!((window.offset, window.end()), (5, 7));
        let window = Window::compute(window.offset, 5, 7, Some(PageAction::Prev));
        assert_eq!(window.offset, 0);
        let window = Window::compute(0, 5, 7, Some(PageAction::Prev));
        assert_eq!(window.offset, 0);
    }

    #[test]
    fn test_last_and_first() {
        assert_eq!(Window::compute(0, 5, 11, Some(PageAction::Last)).offset, 10);
        assert_eq!(Window::compute(0, 5, 10, Some(PageAction::Last)).offset, 5);
        assert_eq!(Window::compute(10, 5, 11, Some(PageAction::First)).offset, 0);
    }

    #[test]
    fn test_next_on_last_page_stays() {
        assert_eq!(Window::compute(5, 5, 7, Some(PageAction::Next)).offset, 5);
    }

    #[test]
    fn test_misaligned_offset_snaps_down() {
        assert_eq!(Window::compute(7, 5, 20, None).offset, 5);
    }

    #[test]
    fn test_offset_past_end_restarts() {
        assert_eq!(Window::compute(40, 5, 12, None).offset, 0);
        assert_eq!(Window::compute(40, 5, 0, Some(PageAction::Last)).offset, 0);
    }

    #[test]
    fn test_goto_bounds() {
        assert_eq!(Window::compute(0, 5, 12, Some(PageAction::Goto(3))).offset, 10);
        assert_eq!(Window::compute(5, 5, 12, Some(PageAction::Goto(4))).offset, 5);
        assert_eq!(Window::compute(5, 5, 12, Some(PageAction::Goto(0))).offset, 5);
    }

    #[test]
    fn test_page_numbers() {
        let window = Window::compute(10, 5, 12, None);
        assert_eq!((window.page(), window.page_count()), (3, 3));
        assert!(window.has_previous());
        assert!(!window.has_next());
        assert_eq!(Window::compute(0, 5, 0, None).page_count(), 1);
    }

    #[test]
    fn test_any_action_sequence_stays_in_range() {
        let actions = [
            PageAction::Next,
            PageAction::Next,
            PageAction::Last,
            PageAction::Next,
            PageAction::Prev,
            PageAction::First,
            PageAction::Prev,
            PageAction::Goto(2),
            PageAction::Last,
        ];
        for total in 0..40 {
            for page_size in [1, 3, 5, 10] {
                let mut offset = 0;
                for action in actions {
                    let window = Window::compute(offset, page_size, total, Some(action));
                    offset = window.offset;
                    assert_eq!(offset % page_size, 0);
                    assert!(offset < total || (total == 0 && offset == 0));
                }
            }
        }
    }
}
