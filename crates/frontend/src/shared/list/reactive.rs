//! Signal wiring for list pages.
//!
//! The page keeps its whole list state in one `RwSignal`. Loads and bulk
//! actions run on `spawn_local`; their results are written back through
//! `try_update`, so a page that was torn down in the meantime just drops them.

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;
use std::future::Future;

use super::field::TableRecord;
use super::selection::SelectionSet;
use super::server::ServerListState;
use super::sort::SortSpec;
use super::state::ListState;
use crate::shared::api_utils::{self, ApiError};
use crate::shared::bulk_actions::{BulkOutcome, DeleteStrategy};
use crate::shared::config::config;

/// Page state with a row selection, client- or server-paginated.
pub trait HasSelection {
    fn selection(&self) -> &SelectionSet;
    fn selection_mut(&mut self) -> &mut SelectionSet;

    /// Deleted rows leave the selection; rows that failed stay selected for a retry.
    fn after_bulk(&mut self, outcome: &BulkOutcome) {
        self.selection_mut().forget(outcome.succeeded_ids());
    }
}

impl<T> HasSelection for ListState<T> {
    fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    fn selection_mut(&mut self) -> &mut SelectionSet {
        &mut self.selection
    }
}

impl<T> HasSelection for ServerListState<T> {
    fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    fn selection_mut(&mut self) -> &mut SelectionSet {
        &mut self.selection
    }
}

pub fn create_state<T>(default_sort: Option<SortSpec>) -> RwSignal<ListState<T>>
where
    T: TableRecord + Send + Sync + 'static,
{
    RwSignal::new(ListState::new(config().list.page_size, default_sort))
}

pub fn create_server_state<T>() -> RwSignal<ServerListState<T>>
where
    T: TableRecord + Send + Sync + 'static,
{
    RwSignal::new(ServerListState::new(config().list.page_size))
}

/// Neighbours shown around the current page in the page strip.
pub fn window_delta() -> usize {
    config().list.window_delta
}

/// Page-size selector change on a client-side list.
pub fn set_page_size<T>(state: RwSignal<ListState<T>>, requested: usize)
where
    T: TableRecord + Send + Sync + 'static,
{
    let size = config().list.checked_page_size(requested);
    state.update(|s| s.set_page_size(size));
}

/// Fetch the whole collection and hand it to the page state.
pub fn spawn_load<T, F, Fut>(state: RwSignal<ListState<T>>, fetch: F)
where
    T: TableRecord + Send + Sync + 'static,
    F: FnOnce() -> Fut + 'static,
    Fut: Future<Output = Result<Vec<T>, ApiError>> + 'static,
{
    let Some(ticket) = state.try_update(|s| s.begin_load()) else {
        return;
    };
    spawn_local(async move {
        let result = fetch().await;
        if state.try_update(|s| s.finish_load(ticket, result)).is_none() {
            log::debug!("list page closed before its rows arrived");
        }
    });
}

/// Fetch the current server page of `resource`.
pub fn spawn_server_load<T>(state: RwSignal<ServerListState<T>>, resource: &'static str)
where
    T: TableRecord + DeserializeOwned + Send + Sync + 'static,
{
    let Some((ticket, query)) = state.try_update(|s| s.begin_load()) else {
        return;
    };
    spawn_local(async move {
        let result = api_utils::fetch_page::<T>(resource, &query).await;
        if state.try_update(|s| s.finish_load(ticket, result)).is_none() {
            log::debug!("list page closed before page {} arrived", query.page);
        }
    });
}

/// Delete every selected row, unselect what was deleted, then reload.
///
/// `reload` runs whatever the outcome so the table mirrors the server again.
/// `None` when nothing was selected or the page is gone.
pub async fn run_bulk_delete<L, S, R>(state: RwSignal<L>, strategy: &S, reload: R) -> Option<BulkOutcome>
where
    L: HasSelection + Send + Sync + 'static,
    S: DeleteStrategy + ?Sized,
    R: FnOnce(RwSignal<L>),
{
    let ids = state.try_with_untracked(|s| s.selection().ids())?;
    if ids.is_empty() {
        return None;
    }
    let outcome = strategy.delete(&ids).await;
    log::info!("{}", outcome.summary("Bulk delete"));
    state.try_update(|s| s.after_bulk(&outcome));
    reload(state);
    Some(outcome)
}

/// [`run_bulk_delete`] on `spawn_local`; `on_done` receives the tally for the notification.
pub fn spawn_bulk_delete<L, S, R, D>(state: RwSignal<L>, strategy: S, reload: R, on_done: D)
where
    L: HasSelection + Send + Sync + 'static,
    S: DeleteStrategy + 'static,
    R: FnOnce(RwSignal<L>) + 'static,
    D: FnOnce(BulkOutcome) + 'static,
{
    spawn_local(async move {
        if let Some(outcome) = run_bulk_delete(state, &strategy, reload).await {
            on_done(outcome);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::bulk_actions::fan_out;
    use async_trait::async_trait;
    use futures::executor::block_on;
    use serde_json::{json, Map, Value};

    type Row = Map<String, Value>;

    /// Deletes everything except the ids listed in `reject`.
    struct RejectingDelete {
        reject: Vec<&'static str>,
    }

    #[async_trait(?Send)]
    impl DeleteStrategy for RejectingDelete {
        async fn delete(&self, ids: &[String]) -> BulkOutcome {
            fan_out(ids, |id| async move {
                if self.reject.iter().any(|rejected| *rejected == id) {
                    Err(ApiError::Http(409))
                } else {
                    Ok(())
                }
            })
            .await
        }
    }

    fn selected_state(ids: &[&str]) -> RwSignal<ListState<Row>> {
        let mut state = ListState::new(10, None);
        let ticket = state.begin_load();
        let rows = ["a", "b", "c"]
            .iter()
            .map(|id| json!({"_id": id}).as_object().cloned().unwrap())
            .collect();
        state.finish_load(ticket, Ok(rows));
        for id in ids {
            state.selection.toggle_one(id);
        }
        RwSignal::new(state)
    }

    #[test]
    fn test_partial_failure_keeps_failed_ids_and_reloads() {
        let state = selected_state(&["a", "b", "c"]);
        let strategy = RejectingDelete { reject: vec!["b"] };
        let mut seen_on_reload = None;
        let outcome = block_on(run_bulk_delete(state, &strategy, |s| {
            seen_on_reload = Some(s.with_untracked(|st| st.selection.ids()));
        }));

        let outcome = outcome.unwrap();
        assert_eq!(outcome.summary("Delete"), "Delete: 2 ok, 1 failed");
        assert_eq!(seen_on_reload, Some(vec!["b".to_string()]));
        state.with_untracked(|s| assert_eq!(s.selection.ids(), vec!["b"]));
    }

    #[test]
    fn test_total_failure_still_reloads() {
        let state = selected_state(&["a", "c"]);
        let strategy = RejectingDelete { reject: vec!["a", "c"] };
        let mut reloaded = false;
        let outcome = block_on(run_bulk_delete(state, &strategy, |_| reloaded = true));
        assert_eq!(outcome.map(|o| o.failure_count()), Some(2));
        assert!(reloaded);
        state.with_untracked(|s| assert_eq!(s.selection.ids(), vec!["a", "c"]));
    }

    #[test]
    fn test_empty_selection_does_nothing() {
        let state = selected_state(&[]);
        let strategy = RejectingDelete { reject: Vec::new() };
        let mut reloaded = false;
        assert!(block_on(run_bulk_delete(state, &strategy, |_| reloaded = true)).is_none());
        assert!(!reloaded);
    }

    #[test]
    fn test_create_state_starts_idle() {
        let state = create_state::<Map<String, Value>>(Some(SortSpec::desc("totalNSV")));
        set_page_size(state, 50);
        state.with_untracked(|s| {
            assert!(!s.is_loading());
            assert_eq!(s.pagination.page_size(), 50);
            assert_eq!(s.sort, Some(SortSpec::desc("totalNSV")));
        });
    }

    #[test]
    fn test_selection_access_is_shared() {
        let mut state: ServerListState<Map<String, Value>> = ServerListState::new(10);
        state.selection_mut().toggle_one("a");
        state.selection_mut().toggle_one("b");
        state.selection_mut().forget(["a"]);
        assert_eq!(HasSelection::selection(&state).ids(), vec!["b"]);
    }
}
