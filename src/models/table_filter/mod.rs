#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

/// Sort column and direction as given by a listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortSpec {
    pub column: String,
    pub dir: SortDir,
}

impl SortSpec {
    /// `dir` is descending only when it is exactly `"desc"`.
    pub fn from_params(sort: Option<&str>, dir: Option<&str>) -> Self {
        let dir = match dir {
            Some("desc") => SortDir::Desc,
            _ => SortDir::Asc,
        };
        SortSpec {
            column: sort.unwrap_or_default().to_string(),
            dir,
        }
    }
}

/// Clamped page window: `page >= 1`, `1 <= per_page <= 100`.
///
/// Fields are only reachable through `new`, so every `Paging` is clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    page: usize,
    per_page: usize,
}

impl Default for Paging {
    fn default() -> Self {
        Paging { page: 1, per_page: 25 }
    }
}

impl Paging {
    pub const MAX_PER_PAGE: usize = 100;

    pub fn new(page: usize, per_page: usize) -> Self {
        Paging {
            page: page.max(1),
            per_page: per_page.clamp(1, Self::MAX_PER_PAGE),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Items before this page. Saturates for pages far past any real data.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }

    /// Number of pages for `total_count` items, never less than 1.
    pub fn total_pages(&self, total_count: usize) -> usize {
        total_count.div_ceil(self.per_page.max(1)).max(1)
    }
}
