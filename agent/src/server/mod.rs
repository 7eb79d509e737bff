//! Local HTTP surface over the console session

pub mod handlers;
pub mod serve;
pub mod state;
