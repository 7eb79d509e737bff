//! Console data models

pub mod log_entry;
pub mod panels;
