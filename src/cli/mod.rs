pub mod args;
pub mod commands;

pub use args::Cli;
pub use commands::{render, resolve_options, run};
