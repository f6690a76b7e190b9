pub mod cli;
pub mod complete;
pub mod load_config;
pub mod output;

pub use cli::{run, Cli, Commands};
