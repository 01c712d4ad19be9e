//! One state object per list page.
//!
//! Holds the fetched rows together with everything the user changed on the
//! page (filters, sort, page, selection). Views are recomputed from it on
//! demand; nothing here suspends or performs I/O.

use super::aggregate::{summarize, AggregateSpec, SummaryStats};
use super::field::TableRecord;
use super::filter::{self, FilterSpec};
use super::pagination::{PageToken, PaginationState};
use super::selection::SelectionSet;
use super::sort::{self, SortSpec};
use crate::shared::api_utils::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Ready,
    /// Message shown next to the retry button
    Failed(String),
}

/// Identifies one fetch. Results carrying an outdated ticket are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(pub(super) u64);

#[derive(Debug, Clone)]
pub struct ListState<T> {
    source: Vec<T>,
    status: LoadStatus,
    pub filter: FilterSpec,
    pub sort: Option<SortSpec>,
    pub pagination: PaginationState,
    pub selection: SelectionSet,
    epoch: u64,
}

impl<T: TableRecord> ListState<T> {
    pub fn new(page_size: usize, default_sort: Option<SortSpec>) -> Self {
        Self {
            source: Vec::new(),
            status: LoadStatus::Idle,
            filter: FilterSpec::default(),
            sort: default_sort,
            pagination: PaginationState::new(page_size),
            selection: SelectionSet::new(),
            epoch: 0,
        }
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            LoadStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn source(&self) -> &[T] {
        &self.source
    }

    /// Start a fetch (initial load, retry, or refresh after a bulk action).
    /// Any fetch still in flight is superseded.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.epoch += 1;
        self.status = LoadStatus::Loading;
        LoadTicket(self.epoch)
    }

    /// Apply a fetch result. Returns `false` when the ticket is stale and the
    /// result was ignored.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Vec<T>, ApiError>) -> bool {
        if ticket.0 != self.epoch || self.status != LoadStatus::Loading {
            log::debug!("dropping stale list response (ticket {}, current {})", ticket.0, self.epoch);
            return false;
        }
        match result {
            Ok(rows) => {
                self.source = rows;
                self.status = LoadStatus::Ready;
                let pruned = self.selection.prune_to(&self.source);
                if pruned > 0 {
                    log::debug!("selection: dropped {} ids missing after reload", pruned);
                }
                self.recount();
            }
            Err(err) => {
                log::warn!("list load failed: {}", err);
                self.status = LoadStatus::Failed(err.to_string());
            }
        }
        true
    }

    /// Page teardown: whatever is in flight must not land anymore.
    pub fn cancel(&mut self) {
        self.epoch += 1;
        if self.status == LoadStatus::Loading {
            self.status = LoadStatus::Idle;
        }
    }

    /// New filter from the filter panel; always back to page 1.
    /// Selected rows the new filter hides are unselected.
    pub fn set_filter(&mut self, filter: FilterSpec) {
        self.filter = filter;
        self.pagination.reset();
        self.recount();
        let visible: Vec<String> = self
            .filtered()
            .iter()
            .map(|r| r.record_id().into_owned())
            .collect();
        let pruned = self.selection.prune(visible.iter().map(String::as_str));
        if pruned > 0 {
            log::debug!("selection: dropped {} ids hidden by the filter", pruned);
        }
    }

    pub fn set_search(&mut self, search: &str) {
        let mut filter = self.filter.clone();
        filter.search = Some(search.to_string());
        self.set_filter(filter);
    }

    pub fn clear_filter(&mut self) {
        self.set_filter(FilterSpec::default());
    }

    /// Column header click.
    pub fn toggle_sort(&mut self, field: &str) {
        self.sort = Some(SortSpec::toggle(self.sort.as_ref(), field));
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.pagination.go_to(page);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.pagination.set_page_size(page_size);
        self.recount();
    }

    /// Rows passing the current filter, in source order.
    pub fn filtered(&self) -> Vec<&T> {
        let rows: Vec<&T> = self.source.iter().collect();
        filter::apply(&rows, &self.filter)
    }

    /// filter -> sort -> page
    pub fn view(&self, window_delta: usize) -> ListView<'_, T> {
        let filtered = self.filtered();
        let sorted = match &self.sort {
            Some(spec) => sort::sort(&filtered, spec),
            None => filtered,
        };
        let page_rows = self.pagination.slice(&sorted).to_vec();
        let page_ids: Vec<_> = page_rows.iter().map(|r| r.record_id()).collect();
        let all_page_selected = self.selection.all_selected(page_ids.iter().map(|id| &**id));

        ListView {
            total_filtered: sorted.len(),
            window: self.pagination.window(window_delta),
            range_label: self.pagination.range_label(),
            all_page_selected,
            rows: sorted,
            page_rows,
        }
    }

    /// Summary over the filtered rows (not just the visible page).
    pub fn summary(&self, spec: &AggregateSpec) -> SummaryStats {
        summarize(&self.filtered(), spec)
    }

    /// Rows to export: the selection if there is one, otherwise the whole filtered set.
    pub fn export_rows(&self) -> Vec<&T> {
        let filtered = self.filtered();
        if self.selection.is_empty() {
            filtered
        } else {
            self.selection.selected_records(&filtered)
        }
    }

    pub fn toggle_all_on_current_page(&mut self, window_delta: usize) {
        let ids: Vec<String> = self
            .view(window_delta)
            .page_rows
            .iter()
            .map(|r| r.record_id().into_owned())
            .collect();
        self.selection.toggle_all_on_current_page(ids);
    }

    fn recount(&mut self) {
        let total = self.filtered().len();
        self.pagination.set_total_records(total);
    }
}

/// Render-ready projection of a [`ListState`].
#[derive(Debug)]
pub struct ListView<'a, T> {
    /// Filtered and sorted rows, all pages.
    pub rows: Vec<&'a T>,
    pub page_rows: Vec<&'a T>,
    pub total_filtered: usize,
    pub window: Vec<PageToken>,
    pub range_label: String,
    pub all_page_selected: bool,
}

impl<T> ListView<'_, T> {
    /// Zero matches: render the "nothing found" block instead of an empty table.
    pub fn is_empty_result(&self) -> bool {
        self.total_filtered == 0
    }
}
