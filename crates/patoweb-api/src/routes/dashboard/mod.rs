//! Dashboard routes

pub mod api;
pub mod page;

pub use api::{api_categories, api_history, api_series, api_summary};
pub use page::page_dashboard;
