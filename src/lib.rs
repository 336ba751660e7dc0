// Core infrastructure modules
pub mod config;
pub mod core;

// Feature-specific modules
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod repl;
pub mod results_grid;

#[cfg(test)]
mod test_utils;
