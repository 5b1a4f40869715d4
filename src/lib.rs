pub mod config;
pub mod display;
pub mod errors;
pub mod invoke;
pub mod output;
pub mod plot;
pub mod sweep;
pub mod threads;
pub mod types;
