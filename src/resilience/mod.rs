//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request:
//!     → Deadline::after(request budget)
//!     → child(upstream budget)  → upstream fetch
//!     → child(persist budget)   → store insert
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - No retries and no circuit breaking: a single failure is terminal for the request

pub mod timeouts;

pub use timeouts::{Deadline, DeadlineExceeded};
