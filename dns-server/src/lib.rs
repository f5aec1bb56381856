pub mod config;
pub mod errors;
pub mod resolver;
pub mod server;
pub mod upstream;
