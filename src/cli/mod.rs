//! CLI-specific utilities for butterfly-ev
//!
//! This module contains code specific to the command-line interface,
//! separate from the encoding library.

pub mod report;

pub use report::{format_layout, format_name_check};
