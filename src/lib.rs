pub mod client;
pub mod config;
pub mod error;
pub mod interpret;
pub mod preview;
pub mod relay;
pub mod server;
