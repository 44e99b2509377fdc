pub mod catalog;
pub mod commands;
pub mod drift;
pub mod errors;
pub mod fs;
pub mod graph;
pub mod models;
pub mod parser;
pub mod scan;
pub mod utils;
pub mod validate;
pub mod validation;

/// ASCII art logo for weft CLI
pub const LOGO: &str = "\
  ┬ ┬┌─┐┌─┐┌┬┐
  │││├┤ ├┤  │
  └┴┘└─┘┴   ┴";
