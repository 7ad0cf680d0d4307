//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, one task per connection)
//!     → request.rs (request ID)
//!     → quote.rs (QuoteService pipeline)
//!     → response.rs (error → 500 with fixed body)
//!     → Send to client
//! ```

pub mod quote;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
