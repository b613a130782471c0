//! Login gate routes

pub mod page;

pub use page::{page_login, post_login, post_logout};
