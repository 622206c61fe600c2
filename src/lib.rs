//! tally - a terminal client for the letter counter agent
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod models;
pub mod state;
pub mod traits;
pub mod ui;
