/// Current page of a paginated listing. Pages start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    page: u32,
}

impl PageCursor {
    pub fn new() -> Self {
        Self { page: 1 }
    }

    /// Clamp to the first page for zero
    pub fn at(page: u32) -> Self {
        Self { page: page.max(1) }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn next(&mut self) -> u32 {
        self.page = self.page.saturating_add(1);
        self.page
    }

    /// Step back one page; stays on page 1
    pub fn prev(&mut self) -> u32 {
        if self.has_prev() {
            self.page -= 1;
        }
        self.page
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new()
    }
}
