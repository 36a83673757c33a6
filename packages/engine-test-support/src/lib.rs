//! Shared helpers for engine tests: logging setup and unique ids.

pub mod logging;
pub mod unique_helpers;
