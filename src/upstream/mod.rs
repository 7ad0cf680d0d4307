//! Upstream price provider integration.
//!
//! # Data Flow
//! ```text
//! QuoteService
//!     → client.rs (GET provider URL under a child deadline)
//!     → parse nested `<pair>.bid` string
//!     → Quote | UpstreamError
//! ```
//!
//! # Design Decisions
//! - One attempt per call; the service never retries
//! - Status is checked before the body is parsed
//! - Missing `bid` handling is an explicit policy, not an accident of parsing

pub mod client;
pub mod types;

pub use client::{parse_quote, UpstreamClient};
pub use types::{UpstreamError, UpstreamResult};
