//! Headless list-view controller: pagination, sorting, filtering, and
//! debounced search over a paginated resource.
//!
//! The controller owns no HTTP machinery. Mutators mark it dirty;
//! [`ListController::take_request`] hands out at most one sequence-tagged
//! request per change, the caller performs the fetch, and
//! [`ListController::apply`] folds the outcome back in, discarding responses
//! that lost the race against a newer request.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::Error;
use crate::resources::types::Page;

/// Allowed page sizes for list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    Five,
    Ten,
    TwentyFive,
    Fifty,
}

impl PageSize {
    /// All selectable page sizes, in display order
    pub const ALL: [PageSize; 4] = [
        PageSize::Five,
        PageSize::Ten,
        PageSize::TwentyFive,
        PageSize::Fifty,
    ];

    /// The numeric page size
    pub fn get(self) -> u32 {
        match self {
            PageSize::Five => 5,
            PageSize::Ten => 10,
            PageSize::TwentyFive => 25,
            PageSize::Fifty => 50,
        }
    }

    /// Parse a numeric page size, rejecting values outside the allowed set
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            5 => Some(PageSize::Five),
            10 => Some(PageSize::Ten),
            25 => Some(PageSize::TwentyFive),
            50 => Some(PageSize::Fifty),
            _ => None,
        }
    }
}

/// Sort direction for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// The query-string value for this direction
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

/// Snapshot of everything a list fetch depends on.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub page: u32,
    pub page_size: u32,
    pub sort: Option<Sort>,
    pub search: String,
    pub filters: BTreeMap<String, String>,
}

impl ListQuery {
    /// Render the query as request parameters.
    ///
    /// Pagination is offset-based (`start`/`length`), the convention the
    /// server reads. Empty values are included here and dropped at the
    /// request layer.
    pub fn params(&self) -> Vec<(String, String)> {
        let start = (self.page - 1) * self.page_size;
        let mut params = vec![
            ("start".to_string(), start.to_string()),
            ("length".to_string(), self.page_size.to_string()),
        ];
        if let Some(sort) = &self.sort {
            params.push(("sort".to_string(), sort.field.clone()));
            params.push(("direction".to_string(), sort.direction.as_str().to_string()));
        }
        if !self.search.is_empty() {
            params.push(("search".to_string(), self.search.clone()));
        }
        for (key, value) in &self.filters {
            params.push((key.clone(), value.clone()));
        }
        params
    }
}

/// A sequence-tagged fetch request handed to the caller.
#[derive(Debug, Clone)]
pub struct ListRequest {
    pub seq: u64,
    pub query: ListQuery,
}

/// State machine for one paginated, filterable list view.
#[derive(Debug)]
pub struct ListController<T> {
    page: u32,
    page_size: PageSize,
    sort: Option<Sort>,
    filters: BTreeMap<String, String>,
    search_draft: String,
    search: String,
    debounce: Duration,
    debounce_due: Option<Instant>,
    items: Vec<T>,
    total: u64,
    loading: bool,
    error: Option<String>,
    dirty: bool,
    issued_seq: u64,
    applied_seq: u64,
    pending_delete: Option<i64>,
}

impl<T> ListController<T> {
    /// Create a controller. It starts dirty so the first
    /// [`take_request`](Self::take_request) fetches the initial page.
    pub fn new(page_size: PageSize, debounce: Duration) -> Self {
        Self {
            page: 1,
            page_size,
            sort: None,
            filters: BTreeMap::new(),
            search_draft: String::new(),
            search: String::new(),
            debounce,
            debounce_due: None,
            items: Vec::new(),
            total: 0,
            loading: false,
            error: None,
            dirty: true,
            issued_seq: 0,
            applied_seq: 0,
            pending_delete: None,
        }
    }

    // --- dependencies: every change marks the controller dirty ---

    /// Go to a page (1-based; clamped to at least 1).
    pub fn set_page(&mut self, page: u32) {
        let page = page.max(1);
        if page != self.page {
            self.page = page;
            self.dirty = true;
        }
    }

    /// Change the page size.
    pub fn set_page_size(&mut self, page_size: PageSize) {
        if page_size != self.page_size {
            self.page_size = page_size;
            self.dirty = true;
        }
    }

    /// Column header click: same column flips direction, a new column sorts
    /// ascending.
    pub fn toggle_sort(&mut self, field: &str) {
        self.sort = match self.sort.take() {
            Some(sort) if sort.field == field => Some(Sort {
                field: sort.field,
                direction: sort.direction.flipped(),
            }),
            _ => Some(Sort {
                field: field.to_string(),
                direction: SortDirection::Asc,
            }),
        };
        self.dirty = true;
    }

    /// Merge a filter value in. Always snaps back to page 1 because the
    /// result set changes shape under the current page.
    pub fn set_filter(&mut self, key: &str, value: &str) {
        self.filters.insert(key.to_string(), value.to_string());
        self.page = 1;
        self.dirty = true;
    }

    /// Record a keystroke in the search box. Nothing is committed until the
    /// debounce window elapses without further input; `loading` stays false
    /// the whole time.
    pub fn set_search_input(&mut self, text: &str, now: Instant) {
        self.search_draft = text.to_string();
        self.debounce_due = Some(now + self.debounce);
    }

    /// Advance the debounce clock. Commits the draft (and resets to page 1)
    /// once the window has elapsed; returns whether a commit happened.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.debounce_due {
            Some(due) if now >= due => {
                self.debounce_due = None;
                if self.search_draft != self.search {
                    self.search = self.search_draft.clone();
                    self.page = 1;
                    self.dirty = true;
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    // --- fetch cycle ---

    /// Take the pending fetch request, if any state changed since the last
    /// one. Each call issues a new monotonic sequence number.
    pub fn take_request(&mut self) -> Option<ListRequest> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        self.issued_seq += 1;
        self.loading = true;
        Some(ListRequest {
            seq: self.issued_seq,
            query: ListQuery {
                page: self.page,
                page_size: self.page_size.get(),
                sort: self.sort.clone(),
                search: self.search.clone(),
                filters: self.filters.clone(),
            },
        })
    }

    /// Fold a fetch outcome back into the controller.
    ///
    /// Responses older than the newest already applied are discarded, so a
    /// slow page-2 response cannot overwrite a fast page-3 one. Failures set
    /// `error` and leave the previously shown items intact.
    pub fn apply(&mut self, seq: u64, result: Result<Page<T>, Error>) {
        if seq <= self.applied_seq {
            debug!(seq, applied = self.applied_seq, "discarding stale list response");
            return;
        }
        self.applied_seq = seq;
        if seq >= self.issued_seq {
            self.loading = false;
        }
        match result {
            Ok(page) => {
                self.total = page.total();
                self.items = page.data;
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err.user_message());
            }
        }
    }

    // --- delete confirmation ---

    /// Stage a record for deletion, pending confirmation.
    pub fn request_delete(&mut self, id: i64) {
        self.pending_delete = Some(id);
    }

    /// The record currently awaiting delete confirmation, if any.
    pub fn pending_delete(&self) -> Option<i64> {
        self.pending_delete
    }

    /// Confirm the staged deletion. Returns the id the caller must now
    /// DELETE; no network call happens before this.
    pub fn confirm_delete(&mut self) -> Option<i64> {
        self.pending_delete.take()
    }

    /// Cancel the staged deletion. No network call is made.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Drop locally every item matching the predicate after a successful
    /// delete, adjusting the total without a refetch.
    pub fn remove_where<F: Fn(&T) -> bool>(&mut self, f: F) {
        let before = self.items.len();
        self.items.retain(|item| !f(item));
        let removed = (before - self.items.len()) as u64;
        self.total = self.total.saturating_sub(removed);
    }

    // --- derived display state ---

    /// Total page count: `ceil(total / page_size)`.
    pub fn total_pages(&self) -> u32 {
        let size = self.page_size.get() as u64;
        self.total.div_ceil(size) as u32
    }

    /// The "Showing X to Y of Z" range line, or `None` when the result set
    /// is empty and the view should render its empty-state row instead.
    pub fn range_text(&self) -> Option<String> {
        if self.total == 0 {
            return None;
        }
        let size = self.page_size.get() as u64;
        let lower = (self.page as u64 - 1) * size + 1;
        let upper = (self.page as u64 * size).min(self.total);
        Some(format!("Showing {} to {} of {}", lower, upper, self.total))
    }

    // --- accessors ---

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn sort(&self) -> Option<&Sort> {
        self.sort.as_ref()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn search_draft(&self) -> &str {
        &self.search_draft
    }

    pub fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> ListController<i32> {
        ListController::new(PageSize::Ten, Duration::from_millis(500))
    }

    fn page_of(items: Vec<i32>, total: u64) -> Page<i32> {
        Page {
            data: items,
            total: Some(total),
            records_total: None,
            meta: None,
        }
    }

    #[test]
    fn take_request_is_one_shot_per_change() {
        let mut ctl = controller();
        assert!(ctl.take_request().is_some(), "initial load");
        assert!(ctl.take_request().is_none());

        ctl.set_page(2);
        let req = ctl.take_request().unwrap();
        assert_eq!(req.query.page, 2);
        assert!(ctl.take_request().is_none());

        // no-op change issues nothing
        ctl.set_page(2);
        assert!(ctl.take_request().is_none());
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut ctl = controller();
        let first = ctl.take_request().unwrap();
        ctl.set_page(2);
        let second = ctl.take_request().unwrap();

        ctl.apply(second.seq, Ok(page_of(vec![3, 4], 23)));
        assert_eq!(ctl.items(), &[3, 4]);
        assert!(!ctl.loading());

        // the older response resolves late and must not win
        ctl.apply(first.seq, Ok(page_of(vec![1, 2], 99)));
        assert_eq!(ctl.items(), &[3, 4]);
        assert_eq!(ctl.total(), 23);
    }

    #[test]
    fn failure_keeps_stale_items_visible() {
        let mut ctl = controller();
        let req = ctl.take_request().unwrap();
        ctl.apply(req.seq, Ok(page_of(vec![1, 2, 3], 3)));

        ctl.set_page(2);
        let req = ctl.take_request().unwrap();
        ctl.apply(req.seq, Err(Error::server(500, "boom")));

        assert_eq!(ctl.items(), &[1, 2, 3]);
        assert_eq!(ctl.total(), 3);
        assert_eq!(ctl.error(), Some("boom"));
        assert!(!ctl.loading());
    }

    #[test]
    fn loading_survives_a_stale_error() {
        let mut ctl = controller();
        let first = ctl.take_request().unwrap();
        ctl.set_page(2);
        let _second = ctl.take_request().unwrap();

        // losing request fails while the newer one is still in flight
        ctl.apply(first.seq, Err(Error::server(500, "slow loser")));
        assert!(ctl.loading());
    }

    #[test]
    fn query_params_use_offset_convention() {
        let mut ctl = controller();
        ctl.set_page(3);
        ctl.toggle_sort("email");
        ctl.set_filter("role", "2");
        let req = ctl.take_request().unwrap();
        // set_filter reset the page
        assert_eq!(req.query.page, 1);

        ctl.set_page(3);
        let req = ctl.take_request().unwrap();
        let params = req.query.params();
        assert!(params.contains(&("start".to_string(), "20".to_string())));
        assert!(params.contains(&("length".to_string(), "10".to_string())));
        assert!(params.contains(&("sort".to_string(), "email".to_string())));
        assert!(params.contains(&("direction".to_string(), "asc".to_string())));
        assert!(params.contains(&("role".to_string(), "2".to_string())));
    }

    #[test]
    fn remove_where_adjusts_total() {
        let mut ctl = controller();
        let req = ctl.take_request().unwrap();
        ctl.apply(req.seq, Ok(page_of(vec![1, 2, 3], 23)));

        ctl.remove_where(|&item| item == 2);
        assert_eq!(ctl.items(), &[1, 3]);
        assert_eq!(ctl.total(), 22);
    }
}
