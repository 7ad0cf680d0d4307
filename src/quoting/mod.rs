//! Quote relay pipeline.

pub mod service;
pub mod types;

pub use service::QuoteService;
pub use types::{Quote, QuoteError, QuoteResponse, Stage};
