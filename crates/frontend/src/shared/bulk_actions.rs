//! Bulk actions over the selected rows.
//!
//! Requests for all ids are issued at once and awaited together. A failing id
//! never aborts the batch: successes and failures are tallied separately and
//! the page reloads from the server afterwards.

use async_trait::async_trait;
use contracts::shared::list_query::{BulkDeleteRequest, BulkDeleteResponse};
use futures::future::join_all;
use serde::de::DeserializeOwned;
use std::future::Future;

use crate::shared::api_utils::{self, ApiError};

/// Per-id results of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome<T = ()> {
    pub succeeded: Vec<(String, T)>,
    pub failed: Vec<(String, ApiError)>,
}

impl<T> Default for BatchOutcome<T> {
    fn default() -> Self {
        Self {
            succeeded: Vec::new(),
            failed: Vec::new(),
        }
    }
}

impl<T> BatchOutcome<T> {
    pub fn success_count(&self) -> usize {
        self.succeeded.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }

    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn succeeded_ids(&self) -> Vec<&str> {
        self.succeeded.iter().map(|(id, _)| id.as_str()).collect()
    }

    /// Message for the notification after the batch.
    pub fn summary(&self, action: &str) -> String {
        if self.failed.is_empty() {
            format!("{}: {} ok", action, self.success_count())
        } else {
            format!(
                "{}: {} ok, {} failed",
                action,
                self.success_count(),
                self.failure_count()
            )
        }
    }
}

/// Outcome of a bulk delete.
pub type BulkOutcome = BatchOutcome<()>;

/// Run `op` for every id concurrently and collect the results in id order.
pub async fn fan_out<T, F, Fut>(ids: &[String], op: F) -> BatchOutcome<T>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let requests = ids.iter().map(|id| {
        let request = op(id.clone());
        async move { (id.clone(), request.await) }
    });

    let mut outcome = BatchOutcome::default();
    for (id, result) in join_all(requests).await {
        match result {
            Ok(value) => outcome.succeeded.push((id, value)),
            Err(err) => {
                log::warn!("bulk action failed for {}: {}", id, err);
                outcome.failed.push((id, err));
            }
        }
    }
    outcome
}

/// Full records of the selected ids for a bulk export, one `GET` per id.
pub async fn fetch_selected<T: DeserializeOwned>(resource: &str, ids: &[String]) -> BatchOutcome<T> {
    fan_out(ids, |id| async move { api_utils::fetch_one::<T>(resource, &id).await }).await
}

/// How a resource deletes several rows.
#[async_trait(?Send)]
pub trait DeleteStrategy {
    async fn delete(&self, ids: &[String]) -> BulkOutcome;
}

/// One `DELETE <resource>/<id>` per selected row.
#[derive(Debug, Clone)]
pub struct PerIdDelete {
    resource: String,
}

impl PerIdDelete {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
        }
    }
}

#[async_trait(?Send)]
impl DeleteStrategy for PerIdDelete {
    async fn delete(&self, ids: &[String]) -> BulkOutcome {
        fan_out(ids, |id| {
            let resource = self.resource.clone();
            async move { api_utils::delete_one(&resource, &id).await }
        })
        .await
    }
}

/// A single `DELETE <resource>/bulk-delete` carrying `{ ids }`.
#[derive(Debug, Clone)]
pub struct BulkEndpointDelete {
    resource: String,
}

impl BulkEndpointDelete {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
        }
    }
}

#[async_trait(?Send)]
impl DeleteStrategy for BulkEndpointDelete {
    async fn delete(&self, ids: &[String]) -> BulkOutcome {
        let path = format!("{}/bulk-delete", self.resource);
        let body = BulkDeleteRequest { ids: ids.to_vec() };
        let response = api_utils::delete_with_body::<_, BulkDeleteResponse>(&path, &body).await;
        outcome_from_bulk_response(ids, response)
    }
}

/// Split a bulk-delete answer into per-id results. A failed request fails every id.
pub fn outcome_from_bulk_response(
    ids: &[String],
    response: Result<BulkDeleteResponse, ApiError>,
) -> BulkOutcome {
    let mut outcome = BulkOutcome::default();
    match response {
        Ok(answer) => {
            for id in ids {
                if answer.failed_ids.contains(id) {
                    outcome.failed.push((id.clone(), ApiError::Rejected));
                } else {
                    outcome.succeeded.push((id.clone(), ()));
                }
            }
            if answer.deleted_count as usize != outcome.success_count() {
                log::warn!(
                    "bulk delete: server reports {} deleted, {} ids not rejected",
                    answer.deleted_count,
                    outcome.success_count()
                );
            }
        }
        Err(err) => {
            log::warn!("bulk delete request failed: {}", err);
            outcome.failed = ids.iter().map(|id| (id.clone(), err.clone())).collect();
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fan_out_tallies_partial_failure() {
        let outcome = block_on(fan_out(&ids(&["a", "b", "c"]), |id| async move {
            if id == "b" {
                Err(ApiError::Http(500))
            } else {
                Ok(())
            }
        }));
        assert_eq!(outcome.succeeded_ids(), vec!["a", "c"]);
        assert_eq!(outcome.failed, vec![("b".to_string(), ApiError::Http(500))]);
        assert!(!outcome.is_complete_success());
        assert_eq!(outcome.summary("Delete"), "Delete: 2 ok, 1 failed");
    }

    #[test]
    fn test_fan_out_carries_values() {
        let outcome = block_on(fan_out(&ids(&["1", "22"]), |id| async move { Ok(id.len()) }));
        assert_eq!(
            outcome.succeeded,
            vec![("1".to_string(), 1), ("22".to_string(), 2)]
        );
        assert_eq!(outcome.summary("Export"), "Export: 2 ok");
    }

    #[test]
    fn test_fan_out_issues_every_request_before_awaiting() {
        let started = RefCell::new(Vec::new());
        let outcome = block_on(fan_out(&ids(&["x", "y"]), |id| {
            started.borrow_mut().push(id.clone());
            async move { Ok::<_, ApiError>(()) }
        }));
        assert_eq!(*started.borrow(), vec!["x", "y"]);
        assert_eq!(outcome.success_count(), 2);
    }

    #[test]
    fn test_bulk_response_split() {
        let response = BulkDeleteResponse {
            deleted_count: 2,
            failed_ids: vec!["b".to_string()],
        };
        let outcome = outcome_from_bulk_response(&ids(&["a", "b", "c"]), Ok(response));
        assert_eq!(outcome.succeeded_ids(), vec!["a", "c"]);
        assert_eq!(outcome.failure_count(), 1);

        let outcome = outcome_from_bulk_response(&ids(&["a", "b"]), Err(ApiError::Http(403)));
        assert_eq!(outcome.success_count(), 0);
        assert_eq!(outcome.failure_count(), 2);
    }

    struct RecordingDelete {
        calls: RefCell<Vec<Vec<String>>>,
    }

    #[async_trait(?Send)]
    impl DeleteStrategy for RecordingDelete {
        async fn delete(&self, ids: &[String]) -> BulkOutcome {
            self.calls.borrow_mut().push(ids.to_vec());
            fan_out(ids, |_| async { Ok(()) }).await
        }
    }

    #[test]
    fn test_strategy_is_injectable() {
        let strategy = RecordingDelete {
            calls: RefCell::new(Vec::new()),
        };
        let boxed: &dyn DeleteStrategy = &strategy;
        let outcome = block_on(boxed.delete(&ids(&["p1", "p2"])));
        assert!(outcome.is_complete_success());
        assert_eq!(strategy.calls.borrow().len(), 1);
    }
}
