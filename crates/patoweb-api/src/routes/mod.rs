//! Route modules

pub mod dashboard;
pub mod pending;
pub mod session;
