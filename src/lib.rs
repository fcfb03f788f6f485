pub mod cli;
pub mod config;
pub mod errors;
pub mod file_ops;
pub mod logging;
pub mod model;
pub mod utils;
