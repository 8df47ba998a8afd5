//! Page arithmetic for paginated list endpoints.

/// Rows per page when the client does not ask for a size
pub const DEFAULT_PER_PAGE: u64 = 25;
/// Upper bound for a client requested page size
pub const MAX_PER_PAGE: u64 = 100;

/// A resolved page within a list of `total` items
///
/// Pages are 1-based. Out of range requests are clamped rather than rejected, so a request
/// for page 9 of a 3 page list returns page 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl Pagination {
    pub fn new(page: Option<u64>, per_page: Option<u64>, total: u64) -> Self {
        let per_page = per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE);
        let total_pages = total.div_ceil(per_page).max(1);
        let page = page.unwrap_or(1).clamp(1, total_pages);

        Self {
            page,
            per_page,
            total,
            total_pages,
        }
    }

    /// 0-based page index as used by the SeaORM paginator
    pub fn page_index(&self) -> u64 {
        self.page - 1
    }

    /// 1-based index of the first item on the page, 0 for an empty list
    pub fn start(&self) -> u64 {
        if self.total == 0 {
            return 0;
        }

        (self.page - 1) * self.per_page + 1
    }

    /// 1-based index of the last item on the page, 0 for an empty list
    pub fn end(&self) -> u64 {
        (self.page * self.per_page).min(self.total)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Display number of the `position`th (1-based) row on this page
    pub fn display_index(&self, position: u64) -> u64 {
        (self.page - 1) * self.per_page + position
    }
}
