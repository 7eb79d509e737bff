//! AutoDeploy Agent Library
//!
//! A simulated deployment console: a command triggers a scripted sequence of
//! timed log lines. Nothing is actually built or deployed.

pub mod app;
pub mod deploy;
pub mod errors;
pub mod filesys;
pub mod logs;
pub mod models;
pub mod server;
pub mod storage;
pub mod store;
pub mod terminal;
pub mod utils;
