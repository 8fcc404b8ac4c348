//! Configuration sources.

pub mod environment;
pub mod file;
pub mod global_file;
