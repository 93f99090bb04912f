/*
[INPUT]:  Task slice in server order, sort toggle, page cursor
[OUTPUT]: Display-ordered rows for the current page
[POS]:    Presentational model - task table ordering and paging
[UPDATE]: When adding sortable columns or paging behavior
*/

use taskpanel_client::Task;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Sort state of the name column. Cycles like a table header toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Unsorted,
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn next(self) -> Self {
        match self {
            SortOrder::Unsorted => SortOrder::Ascending,
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Unsorted,
        }
    }

    pub fn indicator(self) -> &'static str {
        match self {
            SortOrder::Unsorted => "",
            SortOrder::Ascending => " ^",
            SortOrder::Descending => " v",
        }
    }
}

/// Rows in display order. Never reorders the underlying slice.
pub fn sorted_rows(tasks: &[Task], order: SortOrder) -> Vec<&Task> {
    let mut rows: Vec<&Task> = tasks.iter().collect();
    match order {
        SortOrder::Unsorted => {}
        SortOrder::Ascending => rows.sort_by(|a, b| a.name.cmp(&b.name)),
        SortOrder::Descending => rows.sort_by(|a, b| b.name.cmp(&a.name)),
    }
    rows
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    page_size: usize,
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    pub fn next(&mut self, total: usize) {
        if self.page + 1 < self.page_count(total) {
            self.page += 1;
        }
    }

    pub fn prev(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    /// Pull the cursor back after the list shrank.
    pub fn clamp(&mut self, total: usize) {
        let last = self.page_count(total) - 1;
        if self.page > last {
            self.page = last;
        }
    }

    /// Offset of the first row of the current page
    pub fn offset(&self) -> usize {
        self.page * self.page_size
    }

    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let start = self.offset().min(rows.len());
        let end = (start + self.page_size).min(rows.len());
        &rows[start..end]
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
