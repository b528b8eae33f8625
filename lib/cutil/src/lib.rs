//! # CUtil - Common Utilities Library
//!
//! ## Features
//!
//! - `time`: Local time formatting for log lines and generated file names

#[cfg(feature = "time")]
pub mod time;
