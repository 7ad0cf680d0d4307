//! Deadline enforcement.
//!
//! # Responsibilities
//! - Represent a deadline as an explicit value handed to every I/O call
//! - Derive child deadlines that never outlive their parent
//! - Cancel operations cleanly on expiry
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities (`timeout_at`)
//! - Timeout errors are distinct from other errors
//! - A child deadline is `min(parent_remaining, stage_budget)`

use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Error returned when a deadline elapses before the wrapped operation completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("deadline of {budget:?} exceeded")]
pub struct DeadlineExceeded {
    pub budget: Duration,
}

/// A point in time by which an operation and all of its descendants must finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    expires_at: Instant,
    budget: Duration,
}

impl Deadline {
    /// Start a new root deadline `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self {
            expires_at: Instant::now() + budget,
            budget,
        }
    }

    /// Derive a child deadline bounded by both `budget` and the time left on `self`.
    ///
    /// The earlier of the two expiries always wins, so a child can never run
    /// past its parent.
    pub fn child(&self, budget: Duration) -> Self {
        let candidate = Instant::now() + budget;
        if candidate < self.expires_at {
            Self {
                expires_at: candidate,
                budget,
            }
        } else {
            Self {
                expires_at: self.expires_at,
                budget: self.remaining(),
            }
        }
    }

    /// Time left before expiry, zero once elapsed.
    pub fn remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    /// The budget this deadline was created with (after narrowing by the parent).
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Run `fut` until it completes or this deadline elapses.
    ///
    /// An already expired deadline fails without polling `fut` at all.
    pub async fn run<F, T>(&self, fut: F) -> Result<T, DeadlineExceeded>
    where
        F: Future<Output = T>,
    {
        if self.is_expired() {
            return Err(DeadlineExceeded {
                budget: self.budget,
            });
        }

        tokio::time::timeout_at(self.expires_at, fut)
            .await
            .map_err(|_| DeadlineExceeded {
                budget: self.budget,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_child_never_outlives_parent() {
        let parent = Deadline::after(Duration::from_millis(200));
        let child = parent.child(Duration::from_millis(300));
        assert_eq!(child.expires_at(), parent.expires_at());
        assert!(child.budget() <= Duration::from_millis(200));
    }

    #[tokio::test]
    async fn test_tighter_child_keeps_its_own_budget() {
        let parent = Deadline::after(Duration::from_secs(5));
        let child = parent.child(Duration::from_millis(50));
        assert!(child.expires_at() < parent.expires_at());
        assert_eq!(child.budget(), Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn test_time_spent_shrinks_child() {
        let parent = Deadline::after(Duration::from_millis(200));
        tokio::time::sleep(Duration::from_millis(150)).await;

        let child = parent.child(Duration::from_millis(300));
        assert_eq!(child.remaining(), Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_times_out() {
        let deadline = Deadline::after(Duration::from_millis(100));
        let result = deadline
            .run(tokio::time::sleep(Duration::from_millis(500)))
            .await;
        assert_eq!(
            result,
            Err(DeadlineExceeded {
                budget: Duration::from_millis(100)
            })
        );
        assert!(deadline.is_expired());
    }

    #[tokio::test]
    async fn test_run_completes_in_time() {
        let deadline = Deadline::after(Duration::from_secs(1));
        let value = deadline.run(async { 42 }).await;
        assert_eq!(value, Ok(42));
    }
}
