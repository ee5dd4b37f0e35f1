//! Shared utilities.

mod glob;

pub use glob::{compile_glob, compile_glob_list};
