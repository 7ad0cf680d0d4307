//! Observation persistence.
//!
//! # Data Flow
//! ```text
//! QuoteService
//!     → ObservationStore::insert(value, child deadline)
//!     → sqlite.rs (transaction: INSERT, COMMIT) | memory.rs
//! ```
//!
//! # Design Decisions
//! - One handle, created at startup and injected as `Arc<dyn ObservationStore>`
//! - Concurrency is the store's concern (sqlx pool), not the caller's
//! - Inserts are all-or-nothing under their deadline

pub mod memory;
pub mod sqlite;
pub mod types;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use types::{Observation, ObservationStore, StoreError, StoreResult};
