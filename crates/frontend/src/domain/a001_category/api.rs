use contracts::domain::a001_category::dto::CategoryDto;
use contracts::shared::list_query::{ListQuery, ListResponse};

use crate::shared::api_utils::{self, ApiError};
use crate::shared::bulk_actions::PerIdDelete;

pub const RESOURCE: &str = "/api/categories";

pub async fn fetch_page(query: &ListQuery) -> Result<ListResponse<CategoryDto>, ApiError> {
    api_utils::fetch_page(RESOURCE, query).await
}

/// Categories have no bulk endpoint: one `DELETE` per row.
pub fn delete_strategy() -> PerIdDelete {
    PerIdDelete::new(RESOURCE)
}
