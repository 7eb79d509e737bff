//! In-memory session storage

pub mod log_store;
