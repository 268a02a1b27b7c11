//! Page-window derivation for the visible directory list.

/// Default number of professors per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Page sizes offered by the front-end. Any positive size is accepted.
pub const PAGE_SIZE_OPTIONS: &[usize] = &[10, 20, 50, 100];

/// One page of a slice plus its position.
#[derive(Debug, PartialEq, Eq)]
pub struct PageWindow<'a, T> {
    pub items: &'a [T],
    /// 1-indexed, always within `1..=max(1, total_pages)`.
    pub page: usize,
    /// `0` when the input is empty.
    pub total_pages: usize,
}

impl<T> PageWindow<'_, T> {
    pub fn has_prev(&self) -> bool {
        self.total_pages > 0 && self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Number of pages needed for `len` items. A zero page size counts as 1.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}

/// Clamp a requested page into `1..=max(1, total_pages)`.
pub fn clamp_page(requested: usize, total_pages: usize) -> usize {
    requested.max(1).min(total_pages.max(1))
}

/// Slice `visible` into the page nearest to `requested_page`.
///
/// # Examples
///
/// ```
/// use outreach_core::pagination::paginate;
/// let items = [1, 2, 3, 4, 5];
/// let window = paginate(&items, 2, 9);
/// assert_eq!(window.items, &[5]);
/// assert_eq!(window.page, 3);
/// assert_eq!(window.total_pages, 3);
/// ```
pub fn paginate<T>(visible: &[T], page_size: usize, requested_page: usize) -> PageWindow<'_, T> {
    let page_size = page_size.max(1);
    let total = total_pages(visible.len(), page_size);
    let page = clamp_page(requested_page, total);

    let start = ((page - 1) * page_size).min(visible.len());
    let end = (start + page_size).min(visible.len());

    PageWindow {
        items: &visible[start..end],
        page,
        total_pages: total,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_has_no_pages_and_no_controls() {
        let items: [u8; 0] = [];
        let window = paginate(&items, 10, 3);
        assert!(window.items.is_empty());
        assert_eq!(window.page, 1);
        assert_eq!(window.total_pages, 0);
        assert!(!window.has_prev());
        assert!(!window.has_next());
    }

    #[test]
    fn first_of_two_single_item_pages() {
        let items = [1, 2];
        let window = paginate(&items, 1, 1);
        assert_eq!(window.items, &[1]);
        assert_eq!(window.total_pages, 2);
        assert!(!window.has_prev());
        assert!(window.has_next());
    }

    #[test]
    fn requested_page_past_end_is_clamped() {
        let items = [1, 2, 3];
        let window = paginate(&items, 2, 7);
        assert_eq!(window.page, 2);
        assert_eq!(window.items, &[3]);
        assert!(window.has_prev());
        assert!(!window.has_next());
    }

    #[test]
    fn page_zero_is_treated_as_first_page() {
        let items = [1, 2, 3];
        assert_eq!(paginate(&items, 2, 0).page, 1);
    }

    #[test]
    fn zero_page_size_is_treated_as_one() {
        let items = [1, 2, 3];
        let window = paginate(&items, 0, 2);
        assert_eq!(window.items, &[2]);
        assert_eq!(window.total_pages, 3);
    }

    #[test]
    fn clamped_page_and_length_bounds_hold_for_all_inputs() {
        let items: Vec<usize> = (0..23).collect();
        for len in 0..=items.len() {
            for page_size in 1..=8 {
                for requested in 0..=10 {
                    let window = paginate(&items[..len], page_size, requested);
                    assert!(window.page >= 1);
                    assert!(window.page <= window.total_pages.max(1));
                    assert!(window.items.len() <= page_size);
                    if len > 0 {
                        assert!(!window.items.is_empty());
                    }
                }
            }
        }
    }

    #[test]
    fn paginate_is_idempotent_on_clamped_page() {
        let items: Vec<usize> = (0..11).collect();
        let first = paginate(&items, 4, 99);
        let second = paginate(&items, 4, first.page);
        assert_eq!(first, second);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 5), 0);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(6, 5), 2);
    }
}
