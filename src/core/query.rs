//! List query parameters: pagination, sorting, filtering
//!
//! Pages are 1-indexed from the caller's perspective and converted to a
//! zero-based row skip of `(page - 1) * offset`, limited to `offset` rows.

/// Sort direction, expressed on the wire as `1` (ascending) / `-1` (descending)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse the wire flag; anything but `1` / `-1` is rejected by the caller
    pub fn from_flag(flag: i32) -> Option<Self> {
        match flag {
            1 => Some(SortOrder::Asc),
            -1 => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

/// A resolved sort column and direction
#[derive(Debug, Clone)]
pub struct SortSpec {
    pub field: String,
    pub order: SortOrder,
}

/// Parameters accepted by every list operation.
///
/// `page` and `offset` are optional; the access layer resolves them against
/// its configured defaults. `filter` is an equality filter on one column
/// (reading lists use it for `status`), applied before pagination.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub offset: Option<u32>,
    pub sort: Option<SortSpec>,
    pub filter: Option<(String, String)>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort = Some(SortSpec { field: field.into(), order });
        self
    }

    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filter = Some((field.into(), value.into()));
        self
    }

    /// Page number, minimum 1
    pub fn resolved_page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Page size, falling back to the configured default, minimum 1
    pub fn resolved_offset(&self, default_offset: u32) -> u32 {
        self.offset.unwrap_or(default_offset).max(1)
    }

    /// Zero-based number of rows to skip. Widened before multiplying so an
    /// oversized page number skips past everything instead of overflowing.
    pub fn skip(&self, default_offset: u32) -> usize {
        (self.resolved_page() as usize - 1) * self.resolved_offset(default_offset) as usize
    }
}
