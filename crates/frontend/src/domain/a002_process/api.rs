use contracts::domain::a002_process::dto::ProcessDto;
use contracts::shared::list_query::{ListQuery, ListResponse};

use crate::shared::api_utils::{self, ApiError};
use crate::shared::bulk_actions::BulkEndpointDelete;

pub const RESOURCE: &str = "/api/processes";

pub async fn fetch_page(query: &ListQuery) -> Result<ListResponse<ProcessDto>, ApiError> {
    api_utils::fetch_page(RESOURCE, query).await
}

pub fn delete_strategy() -> BulkEndpointDelete {
    BulkEndpointDelete::new(RESOURCE)
}
