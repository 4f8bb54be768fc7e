//! File server API client and types.

pub mod client;
pub mod error;

pub use client::{ApiClient, RequestOptions};
pub use error::{ErrorResponse, ResponseClass, api_error, classify_status};
