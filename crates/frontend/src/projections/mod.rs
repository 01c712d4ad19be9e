pub mod p900_city_performance;
pub mod p901_store_performance;
pub mod p902_sales_data;
