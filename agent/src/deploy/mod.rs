//! Simulated deployment playback

pub mod fsm;
pub mod runner;
pub mod script;
