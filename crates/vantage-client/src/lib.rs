//! Vantage Client - typed service calls for the admin API
//!
//! This crate provides:
//! - HTTP client that decodes the uniform response envelope
//! - `ClientError`, which keeps domain failures apart from transport failures
//! - API client with typed methods for order and user endpoints
//! - Request-generation tokens that discard responses to superseded requests

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod generation;
pub mod http;

pub use api::VantageApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, ErrorKind};
pub use generation::{RequestGeneration, Ticket};
pub use http::VantageHttpClient;
