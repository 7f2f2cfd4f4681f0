//! Page arithmetic

use serde::Serialize;

/// Number of pages needed to show `total` records, never less than one.
///
/// # Example
///
/// ```
/// use usergrid_lib::grid::total_pages;
///
/// assert_eq!(total_pages(23, 10), 3);
/// assert_eq!(total_pages(0, 10), 1);
/// ```
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total.div_ceil(page_size).max(1)
}

/// Current page, page size and the total they are measured against.
///
/// Pages are 1-based. `page` always satisfies `1 <= page <= total_pages()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageState {
    page: usize,
    page_size: usize,
    total: usize,
}

impl PageState {
    /// Starts at page 1 of an empty collection.
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            total: 0,
        }
    }

    /// Returns the current page.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns the page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the record count pages are computed from.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Returns the number of pages.
    pub fn total_pages(&self) -> usize {
        total_pages(self.total, self.page_size)
    }

    /// Records a new total and clamps the page into range.
    ///
    /// Returns `true` if the page had to move.
    pub fn reconcile(&mut self, total: usize) -> bool {
        self.total = total;
        self.clamp()
    }

    /// Jumps to `page`, clamped into `1..=total_pages()`.
    ///
    /// Returns `true` if the page changed.
    pub fn go_to(&mut self, page: usize) -> bool {
        let target = page.clamp(1, self.total_pages());
        let changed = target != self.page;
        self.page = target;
        changed
    }

    /// Moves one page forward; no-op on the last page.
    pub fn next(&mut self) -> bool {
        self.can_next() && self.go_to(self.page + 1)
    }

    /// Moves one page back; no-op on the first page.
    pub fn prev(&mut self) -> bool {
        self.can_prev() && self.go_to(self.page - 1)
    }

    pub fn can_prev(&self) -> bool {
        self.page > 1
    }

    pub fn can_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Changes the page size and clamps the page.
    ///
    /// The page number is kept where it still exists, so switching from
    /// page 3 of 10 to a size of 20 over 23 records lands on page 2.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        let page_size = page_size.max(1);
        let changed = page_size != self.page_size;
        self.page_size = page_size;
        self.clamp() || changed
    }

    /// Index of the first record on the current page.
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.page_size
    }

    /// The current page of `rows`.
    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let start = self.offset().min(rows.len());
        let end = (start + self.page_size).min(rows.len());
        &rows[start..end]
    }

    fn clamp(&mut self) -> bool {
        let last = self.total_pages();
        if self.page > last {
            self.page = last;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(208, 50), 5);
    }

    #[test]
    fn test_twenty_three_records_by_ten() {
        let rows: Vec<usize> = (1..=23).collect();
        let mut pages = PageState::new(10);
        pages.reconcile(rows.len());

        assert_eq!(pages.total_pages(), 3);
        assert!(!pages.can_prev());
        assert_eq!(pages.slice(&rows), &rows[0..10]);

        assert!(pages.next());
        assert!(pages.next());
        assert_eq!(pages.page(), 3);
        assert_eq!(pages.slice(&rows), &[21, 22, 23]);
        assert!(!pages.can_next());
        assert!(!pages.next());
        assert_eq!(pages.page(), 3);
    }

    #[test]
    fn test_page_size_change_clamps() {
        let mut pages = PageState::new(10);
        pages.reconcile(23);
        pages.go_to(3);

        assert!(pages.set_page_size(20));
        assert_eq!(pages.page(), 2);
        assert_eq!(pages.total_pages(), 2);
    }

    #[test]
    fn test_shrinking_total_clamps() {
        let mut pages = PageState::new(10);
        pages.reconcile(50);
        pages.go_to(5);

        assert!(pages.reconcile(12));
        assert_eq!(pages.page(), 2);
        assert!(pages.reconcile(0));
        assert_eq!(pages.page(), 1);
        assert!(!pages.reconcile(0));
    }

    #[test]
    fn test_go_to_out_of_range() {
        let mut pages = PageState::new(5);
        pages.reconcile(12);
        assert!(pages.go_to(99));
        assert_eq!(pages.page(), 3);
        assert!(pages.go_to(0));
        assert_eq!(pages.page(), 1);
    }

    #[test]
    fn test_prev_on_first_page() {
        let mut pages = PageState::new(10);
        pages.reconcile(30);
        assert!(!pages.prev());
        assert_eq!(pages.page(), 1);
    }

    #[test]
    fn test_slice_past_end() {
        let rows = [1, 2, 3];
        let mut pages = PageState::new(2);
        pages.reconcile(10);
        pages.go_to(5);
        assert!(pages.slice(&rows).is_empty());
    }
}
