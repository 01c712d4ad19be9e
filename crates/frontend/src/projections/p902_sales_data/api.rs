//! Sales lines are served twice: the full dump behind the "all sales" page and
//! a server-paginated resource behind the sales register.

use contracts::projections::p902_sales_data::dto::SaleRecordDto;
use contracts::shared::list_query::{ListQuery, ListResponse};

use crate::shared::api_utils::{self, ApiError};
use crate::shared::bulk_actions::BulkEndpointDelete;

pub const ALL_RESOURCE: &str = "/api/all-sales-data";
pub const RESOURCE: &str = "/api/sales";

pub async fn fetch_all() -> Result<Vec<SaleRecordDto>, ApiError> {
    api_utils::fetch_all(ALL_RESOURCE).await
}

pub async fn fetch_page(query: &ListQuery) -> Result<ListResponse<SaleRecordDto>, ApiError> {
    api_utils::fetch_page(RESOURCE, query).await
}

pub fn delete_strategy() -> BulkEndpointDelete {
    BulkEndpointDelete::new(RESOURCE)
}
