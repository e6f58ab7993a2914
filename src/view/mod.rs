//! Table view pipeline: search, then sort, then page.
//!
//! Every view is derived from one [`RecordStore`] snapshot in a single call, so
//! a caller never sees a page computed against an older filter result.

pub mod order;
pub mod page;
pub mod query;

use crate::model::StudentRecord;
use crate::store::RecordStore;
use order::{SortKey, SortState};
use serde::Serialize;

/// Inputs for one pass of the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewQuery {
    pub search: String,
    pub sort: Option<SortState>,
    pub page: usize,
    pub page_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub rows: Vec<StudentRecord>,
    pub search: String,
    pub sort: Option<SortState>,
    pub page: usize,
    pub page_size: usize,
    pub total_rows: usize,
    /// At least 1, so an empty result still renders a (disabled) pager.
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub revision: u64,
}

/// Runs the pipeline for exactly the requested page. A page past the end
/// yields no rows.
pub fn compute(store: &RecordStore, q: &ViewQuery) -> TableView {
    build(store, q, false)
}

/// Same as [`compute`] but pulls the page back into range first.
pub fn compute_clamped(store: &RecordStore, q: &ViewQuery) -> TableView {
    build(store, q, true)
}

fn build(store: &RecordStore, q: &ViewQuery, clamp: bool) -> TableView {
    let filtered = query::filter(store.all(), &q.search);
    let sorted = order::apply(&filtered, q.sort);
    let total_rows = sorted.len();
    let pages = page::total_pages(total_rows, q.page_size);
    let page_index = if clamp {
        page::clamp_page(q.page, total_rows, q.page_size)
    } else {
        q.page
    };
    let rows = page::paginate(&sorted, q.page_size, page_index);

    TableView {
        rows,
        search: q.search.clone(),
        sort: q.sort,
        page: page_index,
        page_size: q.page_size,
        total_rows,
        total_pages: pages.max(1),
        has_prev: pages > 0 && page_index > 1,
        has_next: page_index < pages,
        revision: store.revision(),
    }
}

/// Search term, sort state and current page held between requests.
#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    search: String,
    sort: Option<SortState>,
    page: usize,
    page_size: usize,
}

impl TableState {
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            sort: None,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn query(&self) -> ViewQuery {
        ViewQuery {
            search: self.search.clone(),
            sort: self.sort,
            page: self.page,
            page_size: self.page_size,
        }
    }

    /// A new term starts again from the first page.
    pub fn set_search(&mut self, term: &str) {
        self.search = term.trim().to_string();
        self.page = 1;
    }

    pub fn click_sort(&mut self, key: SortKey) -> SortState {
        let next = SortState::clicked(self.sort, key);
        self.sort = Some(next);
        next
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn next_page(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.page_size);
    }

    /// Recomputes the view from `store` and remembers the clamped page.
    pub fn render(&mut self, store: &RecordStore) -> TableView {
        let view = compute_clamped(store, &self.query());
        self.page = view.page;
        view
    }
}
