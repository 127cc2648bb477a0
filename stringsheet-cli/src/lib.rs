//! CLI library for testing purposes

pub mod cli;
pub mod convert;
pub mod generate;
pub mod logging;

pub use convert::run_convert_command;
pub use generate::run_generate_command;
