pub mod a001_category;
pub mod a002_process;
pub mod a003_store;
