//! # Ticket Desk Testing
//!
//! Testing utilities and helpers for the Ticket Desk state architecture.
//!
//! This crate provides:
//! - Deterministic implementations of Environment traits
//! - A Given-When-Then harness for reducers
//! - Action-sequence helpers for proptest
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use ticket_desk_testing::{test_clock, test_ids};
//! use ticket_desk_runtime::Store;
//!
//! #[tokio::test]
//! async fn creates_ticket() {
//!     let env = env(test_clock(), test_ids());
//!     let store = Store::new(AppState::default(), AppReducer::new(), env);
//!     store.send(AppAction::Ticket(TicketAction::Create { .. })).await?;
//!     assert_eq!(store.state(|s| s.tickets.len()).await, 1);
//! }
//! ```

use chrono::{DateTime, Utc};
use ticket_desk_core::environment::{Clock, IdGenerator};


/// Deterministic implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, IdGenerator, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};
    use uuid::Uuid;

    /// A clock that never moves
    ///
    /// # Example
    ///
    /// ```
    /// use ticket_desk_testing::mocks::FixedClock;
    /// use ticket_desk_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Clock stopped at `time`
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Clock stopped at 2025-01-01T00:00:00Z
    ///
    /// # Panics
    ///
    /// Never; the timestamp is a valid constant.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        let midnight = DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
            .expect("constant RFC 3339 timestamp");
        FixedClock::new(midnight.with_timezone(&Utc))
    }

    /// Hands out `00000000-0000-0000-0000-000000000001`, `...0002`, and so on
    ///
    /// # Example
    ///
    /// ```
    /// use ticket_desk_testing::mocks::SequentialIdGenerator;
    /// use ticket_desk_core::environment::IdGenerator;
    /// use uuid::Uuid;
    ///
    /// let ids = SequentialIdGenerator::new();
    /// assert_eq!(ids.next_id(), Uuid::from_u128(1));
    /// assert_eq!(ids.next_id(), Uuid::from_u128(2));
    /// ```
    #[derive(Debug, Default)]
    pub struct SequentialIdGenerator {
        last: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Start counting from one
        #[must_use]
        pub const fn new() -> Self {
            Self::starting_after(0)
        }

        /// Continue after `last`, so the first id handed out is `last + 1`
        #[must_use]
        pub const fn starting_after(last: u64) -> Self {
            Self {
                last: AtomicU64::new(last),
            }
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> Uuid {
            let next = self.last.fetch_add(1, Ordering::SeqCst) + 1;
            Uuid::from_u128(u128::from(next))
        }
    }

    /// Create a fresh sequential id generator for tests
    #[must_use]
    pub const fn test_ids() -> SequentialIdGenerator {
        SequentialIdGenerator::new()
    }
}

/// Test setup
pub mod helpers {
    /// Install a `tracing` subscriber writing to the test output
    ///
    /// Honors `RUST_LOG`. Safe to call from every test; only the first call
    /// installs anything.
    pub fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with_test_writer()
            .try_init();
    }
}

/// Helpers for proptest-driven reducer tests
pub mod properties {
    use proptest::collection::vec;
    use proptest::strategy::Strategy;
    use ticket_desk_core::reducer::Reducer;

    /// Sequences of up to `max_len` values drawn from `element`
    pub fn sequences<S>(element: S, max_len: usize) -> impl Strategy<Value = Vec<S::Value>>
    where
        S: Strategy,
    {
        vec(element, 0..=max_len)
    }

    /// Apply `actions` one at a time, calling `check` on the state after each
    ///
    /// Returns the final state.
    pub fn run_checked<R, F>(
        reducer: &R,
        env: &R::Environment,
        mut state: R::State,
        actions: impl IntoIterator<Item = R::Action>,
        mut check: F,
    ) -> R::State
    where
        R: Reducer,
        F: FnMut(&R::State),
    {
        for action in actions {
            reducer.reduce(&mut state, action, env);
            check(&state);
        }
        state
    }
}

pub use mocks::{FixedClock, SequentialIdGenerator, test_clock, test_ids};
pub use reducer_test::{ReducerTest, assertions};
