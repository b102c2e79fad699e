//! # Counter
//!
//! A screen with one signed number and three buttons: `+`, `-` and reset.
//!
//! The reducer never asks for effects, and there is no floor: pressing `-`
//! at zero shows `-1`.
//!
//! ```no_run
//! use counter::{CounterAction, CounterEnvironment, CounterReducer, CounterState};
//! use ticket_desk_runtime::Store;
//!
//! # async fn example() -> Result<(), ticket_desk_runtime::StoreError> {
//! let store = Store::new(CounterState::default(), CounterReducer::new(), CounterEnvironment);
//! store.send(CounterAction::Increment).await?;
//! assert_eq!(store.state(|s| s.count).await, 1);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use ticket_desk_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};

/// The displayed number
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterState {
    /// Starts at zero
    pub count: i64,
}

/// Button presses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CounterAction {
    /// `+`
    Increment,
    /// `-`
    Decrement,
    /// Back to zero
    Reset,
}

/// The counter has no dependencies
#[derive(Debug, Clone, Copy, Default)]
pub struct CounterEnvironment;

/// Applies button presses
#[derive(Debug, Clone, Copy, Default)]
pub struct CounterReducer;

impl CounterReducer {
    /// Creates a new `CounterReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for CounterReducer {
    type State = CounterState;
    type Action = CounterAction;
    type Environment = CounterEnvironment;

    fn reduce(
        &self,
        counter: &mut CounterState,
        press: CounterAction,
        _env: &CounterEnvironment,
    ) -> SmallVec<[Effect<CounterAction>; 4]> {
        counter.count = match press {
            CounterAction::Increment => counter.count.saturating_add(1),
            CounterAction::Decrement => counter.count.saturating_sub(1),
            CounterAction::Reset => 0,
        };
        tracing::trace!(?press, count = counter.count, "counter updated");

        smallvec![Effect::None]
    }
}
