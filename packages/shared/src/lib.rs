//! Utilities shared by the signal relay binaries.

pub mod logger;
pub mod time;
