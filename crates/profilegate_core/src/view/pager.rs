//! Fixed-size pagination helpers.

/// One page of rows plus position metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub rows: Vec<T>,
    /// Zero-based page index actually shown.
    pub index: usize,
    /// Always at least 1, even for an empty set.
    pub page_count: usize,
    pub total_rows: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    /// Converts the rows, keeping position metadata.
    pub fn map_rows<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            rows: self.rows.into_iter().map(f).collect(),
            index: self.index,
            page_count: self.page_count,
            total_rows: self.total_rows,
            page_size: self.page_size,
        }
    }
}

/// Number of pages needed for `total_rows`; never zero.
pub fn page_count(total_rows: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total_rows.div_ceil(page_size).max(1)
}

/// Slices `items` into page `index`, clamping to the last page.
pub fn paginate<T: Clone>(items: &[T], index: usize, page_size: usize) -> Page<T> {
    let page_count = page_count(items.len(), page_size);
    let index = index.min(page_count - 1);
    let start = index.saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());

    Page {
        rows: items[start..end].to_vec(),
        index,
        page_count,
        total_rows: items.len(),
        page_size,
    }
}

#[cfg(test)]
mod tests {
    use super::{page_count, paginate};

    #[test]
    fn page_count_rounds_up_and_never_zero() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(100, 10), 10);
    }

    #[test]
    fn last_page_is_partial() {
        let items = (0..23).collect::<Vec<_>>();
        let page = paginate(&items, 2, 10);
        assert_eq!(page.rows, vec![20, 21, 22]);
        assert_eq!(page.page_count, 3);
    }

    #[test]
    fn map_rows_keeps_position() {
        let items = (0..15).collect::<Vec<_>>();
        let page = paginate(&items, 1, 10).map_rows(|n| n * 2);
        assert_eq!(page.rows, vec![20, 22, 24, 26, 28]);
        assert_eq!((page.index, page.page_count, page.total_rows), (1, 2, 15));
    }

    #[test]
    fn out_of_range_index_clamps() {
        let items = (0..5).collect::<Vec<_>>();
        let page = paginate(&items, 7, 10);
        assert_eq!(page.index, 0);
        assert_eq!(page.rows.len(), 5);
    }
}
