//! Pagination over the derived view.

/// Page sizes the size selector offers.
pub const PAGE_SIZES: [usize; 4] = [5, 10, 25, 50];

/// Page size used before the operator picks one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of pages needed for `len` items, never less than one.
pub fn page_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size).max(1)
}

/// Clamp a requested 1-based page index into `[1, page_count]`.
///
/// Out-of-range requests are clamped silently, never an error.
pub fn clamp_index(page: usize, page_count: usize) -> usize {
    page.clamp(1, page_count.max(1))
}

/// One page of the derived view plus paging metadata.
#[derive(Debug, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub window: &'a [T],
    pub page_count: usize,
}

impl<T> Page<'_, T> {
    /// Pagination controls are hidden when everything fits on one page.
    pub fn single_page(&self) -> bool {
        self.page_count <= 1
    }
}

/// Take the bounded window of `items` for the given page.
///
/// An empty sequence yields an empty window and a page count of one.
pub fn paginate<T>(items: &[T], page_size: usize, page_index: usize) -> Page<'_, T> {
    let count = page_count(items.len(), page_size);
    let index = clamp_index(page_index, count);
    let start = (index - 1) * page_size;
    let end = (start + page_size).min(items.len());
    let window = if start >= items.len() { &[] } else { &items[start..end] };

    Page {
        window,
        page_count: count,
    }
}

/// The up-to-five page numbers the controls display, centered on the current
/// page and pinned at both ends of the range.
pub fn page_links(page_index: usize, page_count: usize) -> Vec<usize> {
    (0..page_count.min(5))
        .map(|i| {
            if page_count <= 5 || page_index <= 3 {
                i + 1
            } else if page_index >= page_count - 2 {
                page_count - 4 + i
            } else {
                page_index - 2 + i
            }
        })
        .collect()
}

/// Active page size and 1-based page index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    page_size: usize,
    page_index: usize,
}

impl Default for PageSpec {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_index: 1,
        }
    }
}

impl PageSpec {
    /// Start on page one with the given size, falling back to the default for
    /// sizes outside the selectable set.
    pub fn new(page_size: usize) -> Self {
        let mut spec = Self::default();
        spec.set_page_size(page_size);
        spec
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Change the page size and return to page one. Sizes outside
    /// [`PAGE_SIZES`] are rejected, leaving the spec unchanged.
    pub fn set_page_size(&mut self, size: usize) -> bool {
        if !PAGE_SIZES.contains(&size) {
            return false;
        }
        self.page_size = size;
        self.page_index = 1;
        true
    }

    /// Return to page one (used when the view spec changes).
    pub fn reset(&mut self) {
        self.page_index = 1;
    }

    /// Jump to a page, clamped into range.
    pub fn go_to(&mut self, page: usize, page_count: usize) {
        self.page_index = clamp_index(page, page_count);
    }

    pub fn first(&mut self) {
        self.page_index = 1;
    }

    pub fn last(&mut self, page_count: usize) {
        self.page_index = page_count.max(1);
    }

    pub fn next(&mut self, page_count: usize) {
        self.page_index = clamp_index(self.page_index + 1, page_count);
    }

    pub fn previous(&mut self) {
        self.page_index = self.page_index.saturating_sub(1).max(1);
    }

    /// Pull the index back into range after the view shrank.
    pub fn clamp(&mut self, page_count: usize) {
        self.page_index = clamp_index(self.page_index, page_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_view_on_one_page() {
        let items: Vec<i32> = (1..=7).collect();
        let page = paginate(&items, 10, 1);

        assert_eq!(page.page_count, 1);
        assert_eq!(page.window, items.as_slice());
        assert!(page.single_page());
    }

    #[test]
    fn test_empty_sequence() {
        let items: Vec<i32> = Vec::new();
        let page = paginate(&items, 10, 1);

        assert_eq!(page.page_count, 1);
        assert!(page.window.is_empty());
        assert!(page.single_page());
    }

    #[test]
    fn test_window_second_page_of_two() {
        let items = [10, 20];
        let page = paginate(&items, 1, 2);

        assert_eq!(page.page_count, 2);
        assert_eq!(page.window, &[20]);
    }

    #[test]
    fn test_last_window_truncated() {
        let items: Vec<i32> = (1..=12).collect();
        let page = paginate(&items, 5, 3);

        assert_eq!(page.page_count, 3);
        assert_eq!(page.window, &[11, 12]);
    }

    #[test]
    fn test_go_to_clamps_both_ends() {
        let mut spec = PageSpec::new(5);

        spec.go_to(99, 3);
        assert_eq!(spec.page_index(), 3);

        spec.go_to(0, 3);
        assert_eq!(spec.page_index(), 1);
    }

    #[test]
    fn test_next_previous_clamp() {
        let mut spec = PageSpec::new(5);

        spec.previous();
        assert_eq!(spec.page_index(), 1);

        spec.next(2);
        assert_eq!(spec.page_index(), 2);
        spec.next(2);
        assert_eq!(spec.page_index(), 2);
    }

    #[test]
    fn test_set_page_size_resets_index() {
        let mut spec = PageSpec::new(5);
        spec.go_to(3, 4);

        assert!(spec.set_page_size(25));
        assert_eq!(spec.page_size(), 25);
        assert_eq!(spec.page_index(), 1);
    }

    #[test]
    fn test_set_page_size_rejects_unknown_sizes() {
        let mut spec = PageSpec::new(5);
        spec.go_to(2, 4);

        assert!(!spec.set_page_size(7));
        assert_eq!(spec.page_size(), 5);
        assert_eq!(spec.page_index(), 2);
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut spec = PageSpec::new(5);
        spec.go_to(3, 3);

        spec.clamp(2);
        assert_eq!(spec.page_index(), 2);

        spec.clamp(0);
        assert_eq!(spec.page_index(), 1);
    }

    #[test]
    fn test_page_links_small_range() {
        assert_eq!(page_links(1, 3), [1, 2, 3]);
        assert_eq!(page_links(3, 3), [1, 2, 3]);
    }

    #[test]
    fn test_page_links_pinned_at_ends() {
        assert_eq!(page_links(1, 9), [1, 2, 3, 4, 5]);
        assert_eq!(page_links(9, 9), [5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_page_links_centered_in_middle() {
        assert_eq!(page_links(5, 9), [3, 4, 5, 6, 7]);
    }
}
