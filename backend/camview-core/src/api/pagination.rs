/// Rows per page in list views.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// One page of a client-side paginated list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 1-based.
    pub number: usize,
    pub page_count: usize,
    pub total: usize,
}

impl<T> Page<'_, T> {
    pub fn has_next(&self) -> bool {
        self.number < self.page_count
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }
}

/// Slice `items` into page `number` (1-based) of `page_size` rows.
///
/// Page 0 is treated as page 1. A page past the end is empty.
pub fn paginate<T>(items: &[T], number: usize, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let number = number.max(1);
    let start = (number - 1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());

    Page {
        items: &items[start..end],
        number,
        page_count: items.len().div_ceil(page_size),
        total: items.len(),
    }
}
