//! Platform abstraction
//!
//! Wall-clock access for the native binary and the browser build. The game
//! core never reads the clock itself; callers stamp events with these.

#[cfg(target_arch = "wasm32")]
pub mod web;

use chrono::{Local, Utc};

/// Current Unix timestamp in milliseconds
pub fn now_millis() -> f64 {
    Utc::now().timestamp_millis() as f64
}

/// Current Unix timestamp in seconds
pub fn unix_secs() -> i64 {
    Utc::now().timestamp()
}

/// Local wall-clock time for session records
pub fn local_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Seed for a fresh session when none is configured
pub fn entropy_seed() -> u64 {
    rand::random()
}
