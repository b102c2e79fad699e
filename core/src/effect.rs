//! Effects: work a reducer asks the runtime to do.
//!
//! An effect is a value. Returning one from a reducer does nothing until the
//! Store starts it, and any action it yields goes back through the reducer.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

/// Follow-up work, producing actions of type `Action`
pub enum Effect<Action> {
    /// Nothing to do
    None,

    /// Start all at once
    Parallel(Vec<Effect<Action>>),

    /// Start each once the previous one has finished
    Sequential(Vec<Effect<Action>>),

    /// Dispatch `action` after `duration`
    Delay {
        /// Wait before dispatching
        duration: Duration,
        /// Dispatched when the wait is over
        action: Box<Action>,
    },

    /// Run a future; a `Some` output is dispatched
    Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
}

impl<Action: fmt::Debug> fmt::Debug for Effect<Action> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Parallel(effects) => f.debug_tuple("Parallel").field(effects).finish(),
            Self::Sequential(effects) => f.debug_tuple("Sequential").field(effects).finish(),
            Self::Delay { duration, action } => f
                .debug_struct("Delay")
                .field("duration", duration)
                .field("action", action)
                .finish(),
            Self::Future(_) => f.write_str("Future(..)"),
        }
    }
}

impl<Action> Effect<Action> {
    /// `Parallel(effects)`
    #[must_use]
    pub const fn merge(effects: Vec<Self>) -> Self {
        Self::Parallel(effects)
    }

    /// `Sequential(effects)`
    #[must_use]
    pub const fn chain(effects: Vec<Self>) -> Self {
        Self::Sequential(effects)
    }

    /// Whether this is `Effect::None`
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Convert the actions this effect produces
    ///
    /// A child reducer embedded in a parent uses this to route its effects'
    /// actions back through the parent action type.
    #[must_use]
    pub fn map<B, F>(self, f: F) -> Effect<B>
    where
        Action: Send + 'static,
        B: Send + 'static,
        F: Fn(Action) -> B + Send + Sync + 'static,
    {
        self.map_shared(&Arc::new(f))
    }

    fn map_shared<B, F>(self, f: &Arc<F>) -> Effect<B>
    where
        Action: Send + 'static,
        B: Send + 'static,
        F: Fn(Action) -> B + Send + Sync + 'static,
    {
        match self {
            Self::None => Effect::None,
            Self::Parallel(effects) => {
                Effect::Parallel(effects.into_iter().map(|e| e.map_shared(f)).collect())
            },
            Self::Sequential(effects) => {
                Effect::Sequential(effects.into_iter().map(|e| e.map_shared(f)).collect())
            },
            Self::Delay { duration, action } => Effect::Delay {
                duration,
                action: Box::new(f(*action)),
            },
            Self::Future(fut) => {
                let f = Arc::clone(f);
                Effect::Future(Box::pin(async move { fut.await.map(|action| f(action)) }))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Child {
        Ping,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Parent {
        Child(Child),
    }

    #[test]
    fn map_lifts_delay_action() {
        let effect = Effect::Delay {
            duration: Duration::from_millis(5),
            action: Box::new(Child::Ping),
        };

        match effect.map(Parent::Child) {
            Effect::Delay { duration, action } => {
                assert_eq!(duration, Duration::from_millis(5));
                assert_eq!(*action, Parent::Child(Child::Ping));
            },
            other => unreachable!("unexpected effect {other:?}"),
        }
    }

    #[test]
    fn map_preserves_structure() {
        let effect = Effect::merge(vec![Effect::None, Effect::chain(vec![Effect::None])]);
        let mapped: Effect<Parent> = effect.map(Parent::Child);

        let Effect::Parallel(children) = mapped else {
            unreachable!("expected Parallel");
        };
        assert_eq!(children.len(), 2);
        assert!(children[0].is_none());
        assert!(matches!(&children[1], Effect::Sequential(inner) if inner.len() == 1));
    }

    #[test]
    fn map_lifts_future_output() {
        let effect = Effect::Future(Box::pin(async { Some(Child::Ping) }));

        let Effect::Future(fut) = effect.map(Parent::Child) else {
            unreachable!("expected Future");
        };
        let produced = tokio_test::block_on(fut);
        assert_eq!(produced, Some(Parent::Child(Child::Ping)));
    }

    #[test]
    fn debug_hides_futures() {
        let effect: Effect<Child> = Effect::chain(vec![
            Effect::Future(Box::pin(async { None })),
            Effect::None,
        ]);
        assert_eq!(format!("{effect:?}"), "Sequential([Future(..), None])");
    }
}
