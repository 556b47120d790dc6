use serde::Serialize;

/// Zero-based `offset`/`limit` window over an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub offset: usize,
    pub limit: usize,
}

impl PageRequest {
    pub fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }

    /// Window for a 1-based page number; page `0` is treated as the first page.
    ///
    /// The offset saturates at `usize::MAX`, which is past every row.
    pub fn of_page(page: usize, per_page: usize) -> Self {
        let page = page.max(1);
        Self {
            offset: (page - 1).saturating_mul(per_page),
            limit: per_page,
        }
    }
}

/// One page of results alongside the number of rows matching the query
/// without the window applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
}

impl<T> PageResult<T> {
    pub fn new(items: Vec<T>, total: usize, page: PageRequest) -> Self {
        Self {
            items,
            total,
            offset: page.offset,
            limit: page.limit,
        }
    }

    /// Number of pages of `limit` rows needed to cover `total`.
    pub fn total_pages(&self) -> usize {
        if self.limit == 0 {
            return 0;
        }
        self.total.div_ceil(self.limit)
    }

    /// 1-based number of this page.
    pub fn page(&self) -> usize {
        if self.limit == 0 {
            return 1;
        }
        self.offset / self.limit + 1
    }

    pub fn has_next(&self) -> bool {
        self.offset.saturating_add(self.items.len()) < self.total
    }

    pub fn map<U, F>(self, f: F) -> PageResult<U>
    where
        F: FnMut(T) -> U,
    {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            offset: self.offset,
            limit: self.limit,
        }
    }
}

/// Works out the total row count from the page alone when that is possible.
///
/// A first page shorter than its limit holds every matching row, and a
/// non-empty page shorter than its limit is the last one, so in both cases
/// the total is `offset + len`. Otherwise `None` is returned and a count
/// query is needed.
pub fn total_from_page(page: PageRequest, len: usize) -> Option<usize> {
    if page.offset == 0 {
        if page.limit == 0 || len < page.limit {
            return Some(len);
        }
        return None;
    }
    if len != 0 && len < page.limit {
        return page.offset.checked_add(len);
    }
    None
}
