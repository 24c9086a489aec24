/// Typed async HTTP client for the bundle backend
pub mod client;

pub use client::{BackendClient, GenerateParams};
