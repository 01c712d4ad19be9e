use contracts::projections::p901_store_performance::dto::StorePerformanceDto;

use crate::shared::api_utils::{self, ApiError};

pub const RESOURCE: &str = "/api/all-stores-performance";

pub async fn fetch_all() -> Result<Vec<StorePerformanceDto>, ApiError> {
    api_utils::fetch_all(RESOURCE).await
}
