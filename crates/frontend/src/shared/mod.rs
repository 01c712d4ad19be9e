pub mod api_utils;
pub mod bulk_actions;
pub mod config;
pub mod export;
pub mod list;
