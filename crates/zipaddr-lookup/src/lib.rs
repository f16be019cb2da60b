//! Postal-code to address lookup against a zipcloud-style search API.
//!
//! [`lookup`] is the request-scoped entry point: it encodes the postal code,
//! issues exactly one GET with bounded connect/read timeouts, classifies the
//! response by status class and always yields a renderable [`LookupView`].
//! [`AddressClient`] exposes the same request as a fallible call for callers
//! that want the typed [`LookupError`].

pub mod classify;
pub mod client;
pub mod encode;
pub mod error;
pub mod handler;
pub mod types;
pub mod view;

pub use client::{AddressClient, LookupConfig};
pub use encode::encode_query;
pub use error::LookupError;
pub use handler::lookup;
pub use types::{Address, LookupRequest, LookupResult};
pub use view::{LookupView, RenderedView};
