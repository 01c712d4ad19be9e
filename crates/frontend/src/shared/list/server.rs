//! Server-paginated lists: constraints go to the server, the returned page is
//! rendered as is. Only the page strip, selection and export run locally.

use contracts::shared::list_query::{ListQuery, ListResponse};

use super::field::TableRecord;
use super::filter::FilterSpec;
use super::pagination::{PageToken, PaginationState};
use super::selection::SelectionSet;
use super::state::{LoadStatus, LoadTicket};
use crate::shared::api_utils::ApiError;

/// `GET` query for one page under `filter`.
pub fn build_query(filter: &FilterSpec, page: usize, limit: usize) -> ListQuery {
    let mut query = ListQuery::new(
        u32::try_from(page.max(1)).unwrap_or(u32::MAX),
        u32::try_from(limit.max(1)).unwrap_or(u32::MAX),
    );
    for (key, value) in filter.to_query_params() {
        if key == "search" {
            query = query.with_search(value);
        } else {
            query = query.with_filter(key, value);
        }
    }
    query
}

#[derive(Debug, Clone)]
pub struct ServerListState<T> {
    rows: Vec<T>,
    status: LoadStatus,
    pub filter: FilterSpec,
    pub pagination: PaginationState,
    pub selection: SelectionSet,
    epoch: u64,
}

impl<T: TableRecord> ServerListState<T> {
    pub fn new(page_size: usize) -> Self {
        Self {
            rows: Vec::new(),
            status: LoadStatus::Idle,
            filter: FilterSpec::default(),
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

    /// Rows of the current page, in server order.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn query(&self) -> ListQuery {
        build_query(
            &self.filter,
            self.pagination.current_page(),
            self.pagination.page_size(),
        )
    }

    /// Start fetching the current page. Any fetch still in flight is superseded.
    pub fn begin_load(&mut self) -> (LoadTicket, ListQuery) {
        self.epoch += 1;
        self.status = LoadStatus::Loading;
        (LoadTicket(self.epoch), self.query())
    }

    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<ListResponse<T>, ApiError>,
    ) -> bool {
        if ticket.0 != self.epoch || self.status != LoadStatus::Loading {
            log::debug!("dropping stale page response (ticket {}, current {})", ticket.0, self.epoch);
            return false;
        }
        match result {
            Ok(page) => {
                self.pagination = PaginationState::from_server(
                    self.pagination.current_page(),
                    self.pagination.page_size(),
                    usize::try_from(page.total_results).unwrap_or(usize::MAX),
                    page.total_pages as usize,
                );
                self.rows = page.results;
                self.status = LoadStatus::Ready;
            }
            Err(err) => {
                log::warn!("page load failed: {}", err);
                self.status = LoadStatus::Failed(err.to_string());
            }
        }
        true
    }

    pub fn cancel(&mut self) {
        self.epoch += 1;
        if self.status == LoadStatus::Loading {
            self.status = LoadStatus::Idle;
        }
    }

    /// New constraints; back to page 1. The caller reloads afterwards.
    pub fn set_filter(&mut self, filter: FilterSpec) {
        self.filter = filter;
        self.pagination.reset();
        self.selection.clear();
    }

    pub fn set_search(&mut self, search: &str) {
        let mut filter = self.filter.clone();
        filter.search = Some(search.to_string());
        self.set_filter(filter);
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.pagination.go_to(page);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.pagination.set_page_size(page_size);
    }

    pub fn all_page_selected(&self) -> bool {
        let ids: Vec<_> = self.rows.iter().map(|r| r.record_id()).collect();
        self.selection.all_selected(ids.iter().map(|id| &**id))
    }

    pub fn toggle_all_on_current_page(&mut self) {
        let ids: Vec<String> = self.rows.iter().map(|r| r.record_id().into_owned()).collect();
        self.selection.toggle_all_on_current_page(ids);
    }

    pub fn window(&self, delta: usize) -> Vec<PageToken> {
        self.pagination.window(delta)
    }

    pub fn is_empty_result(&self) -> bool {
        self.status == LoadStatus::Ready && self.rows.is_empty()
    }

    /// Rows to export from this page: the selected ones, or the whole page.
    pub fn export_rows(&self) -> Vec<&T> {
        let rows: Vec<&T> = self.rows.iter().collect();
        if self.selection.is_empty() {
            rows
        } else {
            self.selection.selected_records(&rows)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list::filter::FieldConstraint;
    use serde_json::{json, Map, Value};

    type Row = Map<String, Value>;

    fn page(ids: &[&str], total_results: u64, total_pages: u32) -> ListResponse<Row> {
        ListResponse {
            results: ids
                .iter()
                .map(|id| json!({"_id": id}).as_object().cloned().unwrap())
                .collect(),
            total_results,
            total_pages,
        }
    }

    #[test]
    fn test_build_query() {
        let filter = FilterSpec::new()
            .with_search("  cakes ")
            .with(FieldConstraint::range_input("NSV", "100", ""))
            .with(FieldConstraint::equals("city", "Pune"))
            .with(FieldConstraint::contains("name", " "));
        let query = build_query(&filter, 3, 20);
        assert_eq!(query.page, 3);
        assert_eq!(query.limit, 20);
        assert_eq!(query.search.as_deref(), Some("cakes"));
        assert_eq!(query.filters.get("NSV_min").map(String::as_str), Some("100"));
        assert_eq!(query.filters.get("city").map(String::as_str), Some("Pune"));
        assert_eq!(query.filters.len(), 2);

        let query = build_query(&FilterSpec::new(), 0, 0);
        assert_eq!((query.page, query.limit), (1, 1));
    }

    #[test]
    fn test_page_load_uses_server_counts() {
        let mut state: ServerListState<Row> = ServerListState::new(2);
        state.go_to_page(2);
        let (ticket, query) = state.begin_load();
        assert_eq!(query.page, 1); // nothing known yet, clamped to the first page

        assert!(state.finish_load(ticket, Ok(page(&["a", "b"], 5, 3))));
        assert_eq!(state.pagination.total_pages(), 3);
        assert_eq!(state.pagination.range_label(), "1–2 of 5");

        state.go_to_page(3);
        let (ticket, query) = state.begin_load();
        assert_eq!(query.page, 3);
        state.finish_load(ticket, Ok(page(&["e"], 5, 3)));
        assert_eq!(state.rows().len(), 1);
        assert!(!state.pagination.has_next());
    }

    #[test]
    fn test_stale_page_is_dropped_and_errors_surface() {
        let mut state: ServerListState<Row> = ServerListState::new(10);
        let (first, _) = state.begin_load();
        let (second, _) = state.begin_load();
        assert!(!state.finish_load(first, Ok(page(&["x"], 1, 1))));
        assert!(state.finish_load(second, Err(ApiError::Network("offline".into()))));
        assert_eq!(state.error(), Some("Request failed: offline"));
        assert!(!state.is_empty_result());
    }

    #[test]
    fn test_filter_change_resets_page_and_selection() {
        let mut state: ServerListState<Row> = ServerListState::new(2);
        let (ticket, _) = state.begin_load();
        state.finish_load(ticket, Ok(page(&["a", "b"], 6, 3)));
        state.go_to_page(3);
        state.toggle_all_on_current_page();
        assert!(state.all_page_selected());
        assert_eq!(state.export_rows().len(), 2);

        state.set_search("pune");
        assert_eq!(state.pagination.current_page(), 1);
        assert!(state.selection.is_empty());
        assert_eq!(state.query().search.as_deref(), Some("pune"));
    }

    #[test]
    fn test_empty_page() {
        let mut state: ServerListState<Row> = ServerListState::new(10);
        let (ticket, _) = state.begin_load();
        state.finish_load(ticket, Ok(page(&[], 0, 0)));
        assert!(state.is_empty_result());
        assert_eq!(state.window(2), Vec::<PageToken>::new());
    }
}
