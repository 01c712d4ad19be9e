use contracts::projections::p900_city_performance::dto::CityPerformanceDto;

use crate::shared::api_utils::{self, ApiError};

pub const RESOURCE: &str = "/api/all-cities-performance";

/// Every city at once; the page filters, sorts and pages locally.
pub async fn fetch_all() -> Result<Vec<CityPerformanceDto>, ApiError> {
    api_utils::fetch_all(RESOURCE).await
}
