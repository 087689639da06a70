pub mod config;
pub mod global;
pub mod headlines;
pub mod http;
pub mod types;
