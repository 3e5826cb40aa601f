// remon-api: Async Rust client for the Remon solution configuration service

pub mod client;
pub mod error;
pub mod filters;
pub mod groups;
pub mod models;
pub mod release;
pub mod settings;
pub mod transport;

pub use client::ConfigClient;
pub use error::Error;
pub use release::ReleaseClient;
pub use transport::TransportOptions;
