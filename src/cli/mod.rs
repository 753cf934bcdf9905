//! Command-line interface module.

mod args;
pub mod build;
pub mod common;
pub mod reset;
pub mod salt;

pub use args::{Cli, Commands};
