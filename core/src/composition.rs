//! Building one screen's reducer out of smaller ones.
//!
//! - [`combine_reducers`]: several reducers share one state and action type
//! - [`scope_reducer`]: a child reducer owns one field of a parent state and
//!   one variant of a parent action
//!
//! # Examples
//!
//! ## Scoping a child reducer
//!
//! ```
//! use ticket_desk_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//! use ticket_desk_core::composition::scope_reducer;
//!
//! #[derive(Clone, Default)]
//! struct CounterState {
//!     count: i32,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//! }
//!
//! #[derive(Clone)]
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CounterState,
//!         action: CounterAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<CounterAction>; 4]> {
//!         match action {
//!             CounterAction::Increment => state.count += 1,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! #[derive(Clone, Default)]
//! struct AppState {
//!     counter: CounterState,
//!     title: String,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum AppAction {
//!     Counter(CounterAction),
//!     Rename(String),
//! }
//!
//! let scoped = scope_reducer(
//!     CounterReducer,
//!     |app: &mut AppState| &mut app.counter,
//!     |action: AppAction| match action {
//!         AppAction::Counter(inner) => Some(inner),
//!         AppAction::Rename(_) => None,
//!     },
//!     AppAction::Counter,
//! );
//!
//! let mut state = AppState::default();
//! scoped.reduce(&mut state, AppAction::Counter(CounterAction::Increment), &());
//! assert_eq!(state.counter.count, 1);
//! ```

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;
use std::sync::Arc;

/// A shareable, thread-safe reducer trait object.
pub type SharedReducer<S, A, E> =
    Arc<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>;

/// One reducer that hands every action to each of `reducers` in turn
///
/// Later reducers see the state as left by earlier ones. Effects are
/// concatenated in the same order.
#[must_use]
pub fn combine_reducers<S, A, E>(reducers: Vec<SharedReducer<S, A, E>>) -> CombinedReducer<S, A, E>
where
    A: Clone,
{
    CombinedReducer { reducers }
}

/// Returned by [`combine_reducers`]
pub struct CombinedReducer<S, A, E> {
    reducers: Vec<SharedReducer<S, A, E>>,
}

impl<S, A, E> Clone for CombinedReducer<S, A, E> {
    fn clone(&self) -> Self {
        Self {
            reducers: self.reducers.clone(),
        }
    }
}

impl<S, A, E> std::fmt::Debug for CombinedReducer<S, A, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombinedReducer")
            .field("reducers", &self.reducers.len())
            .finish()
    }
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    A: Clone,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        self.reducers
            .iter()
            .flat_map(|reducer| reducer.reduce(state, action.clone(), env))
            .collect()
    }
}

/// Embed `reducer` in a parent state and action type
///
/// - `state_lens` focuses the parent state on the child's slice.
/// - `extract` picks the child action out of a parent action; parent actions
///   that are not meant for the child return `None` and are ignored.
/// - `embed` wraps the child's feedback actions back into the parent type.
pub const fn scope_reducer<S, SubS, A, SubA, E, R>(
    reducer: R,
    state_lens: fn(&mut S) -> &mut SubS,
    extract: fn(A) -> Option<SubA>,
    embed: fn(SubA) -> A,
) -> ScopedReducer<S, SubS, A, SubA, E, R>
where
    R: Reducer<State = SubS, Action = SubA, Environment = E>,
{
    ScopedReducer {
        reducer,
        state_lens,
        extract,
        embed,
    }
}

/// Returned by [`scope_reducer`]
pub struct ScopedReducer<S, SubS, A, SubA, E, R>
where
    R: Reducer<State = SubS, Action = SubA, Environment = E>,
{
    reducer: R,
    state_lens: fn(&mut S) -> &mut SubS,
    extract: fn(A) -> Option<SubA>,
    embed: fn(SubA) -> A,
}

impl<S, SubS, A, SubA, E, R> Clone for ScopedReducer<S, SubS, A, SubA, E, R>
where
    R: Reducer<State = SubS, Action = SubA, Environment = E> + Clone,
{
    fn clone(&self) -> Self {
        Self {
            reducer: self.reducer.clone(),
            state_lens: self.state_lens,
            extract: self.extract,
            embed: self.embed,
        }
    }
}

impl<S, SubS, A, SubA, E, R> Reducer for ScopedReducer<S, SubS, A, SubA, E, R>
where
    R: Reducer<State = SubS, Action = SubA, Environment = E>,
    A: Send + 'static,
    SubA: Send + 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let Some(child_action) = (self.extract)(action) else {
            return SmallVec::new();
        };

        let embed = self.embed;
        self.reducer
            .reduce((self.state_lens)(state), child_action, env)
            .into_iter()
            .map(|effect| effect.map(embed))
            .collect()
    }
}
