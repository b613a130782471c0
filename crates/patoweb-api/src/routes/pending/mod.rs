//! Pending-dues board routes

pub mod api;
pub mod page;

pub use api::api_pending;
pub use page::htmx_pending_list;
