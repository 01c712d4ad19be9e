//! In-memory table engine shared by every list page:
//! filter -> sort -> paginate, plus summaries and row selection.

pub mod aggregate;
pub mod field;
pub mod filter;
pub mod pagination;
pub mod reactive;
pub mod selection;
pub mod server;
pub mod sort;
pub mod state;

pub use field::{FieldValue, TableRecord};
pub use filter::{FieldConstraint, FilterSpec};
pub use pagination::{PageToken, PaginationState};
pub use sort::{SortDirection, SortSpec};
pub use state::{ListState, LoadStatus};
