//! HTTP client adapter for the Drishti backend.

pub mod api;
pub mod endpoint;

#[cfg(test)]
mod mock_backend;

pub use api::{Backend, DrishtiApi};
pub use endpoint::Endpoint;
