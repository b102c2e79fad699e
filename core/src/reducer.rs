//! The reducer trait.

use crate::effect::Effect;
use smallvec::SmallVec;

/// Business logic for one piece of state
///
/// `reduce` applies an action to the state in place and describes any follow
/// up work as [`Effect`]s. It must not perform that work itself, and given
/// the same state, action and environment it must make the same change.
pub trait Reducer {
    /// What the reducer owns
    type State;

    /// What can happen to it
    type Action;

    /// Injected dependencies (clock, id source)
    type Environment;

    /// Apply `action` to `state`
    ///
    /// Returns the effects for the runtime to start. Four fit inline, which
    /// covers every reducer in this workspace.
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]>;
}
