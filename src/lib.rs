pub mod analyzers;
pub mod clean;
pub mod config;
pub mod errors;
pub mod filter;
pub mod output;
pub mod parser;
pub mod records;
