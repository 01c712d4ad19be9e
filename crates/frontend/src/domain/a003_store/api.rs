use contracts::domain::a003_store::dto::StoreDto;
use contracts::shared::list_query::{ListQuery, ListResponse};

use crate::shared::api_utils::{self, ApiError};
use crate::shared::bulk_actions::PerIdDelete;

pub const RESOURCE: &str = "/api/stores";

pub async fn fetch_page(query: &ListQuery) -> Result<ListResponse<StoreDto>, ApiError> {
    api_utils::fetch_page(RESOURCE, query).await
}

pub fn delete_strategy() -> PerIdDelete {
    PerIdDelete::new(RESOURCE)
}
