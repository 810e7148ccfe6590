// src/domain/pagination.rs

/// Number of articles on one page, for every backend.
pub const PER_PAGE: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
}

impl PageRequest {
    /// Page numbers are 1-based; zero is treated as the first page.
    pub fn new(page: u32) -> Self {
        Self { page: page.max(1) }
    }

    pub fn first() -> Self {
        Self::new(1)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        PER_PAGE
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(PER_PAGE)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page(),
            per_page: request.per_page(),
        }
    }

    pub fn last_page(&self) -> u32 {
        if self.total == 0 || self.per_page == 0 {
            1
        } else {
            u32::try_from((self.total - 1) / u64::from(self.per_page) + 1).unwrap_or(u32::MAX)
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
        }
    }
}
