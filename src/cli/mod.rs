//! Command-line interface module.

mod args;
mod common;
pub mod generate;
pub mod init;
pub mod matte;
pub mod pack;
pub mod place;

pub use args::{Cli, Commands, GenerateArgs};
