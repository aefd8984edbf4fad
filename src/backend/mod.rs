//! Backend client for the hosted row API and its remote functions

mod client;
mod error;
mod traits;

pub use client::BackendClient;
pub use error::BackendError;
pub use traits::BackendClientTrait;

#[cfg(test)]
pub use traits::MockBackendClientTrait;
