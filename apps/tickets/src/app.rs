//! The ticket list screen as a whole.
//!
//! [`AppState`] pairs the ticket collection with the (optional) open form.
//! [`AppReducer`] routes [`AppAction::Ticket`] to the ticket store reducer,
//! scoped down to the collection, and [`AppAction::Form`] to the form reducer.

use crate::session::{EditSession, FormAction, FormReducer};
use crate::store::{TicketAction, TicketEnvironment, TicketReducer};
use crate::types::TicketState;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use ticket_desk_core::{
    SmallVec,
    composition::{CombinedReducer, SharedReducer, combine_reducers, scope_reducer},
    effect::Effect,
    reducer::Reducer,
};

/// Everything the ticket list screen shows
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    /// Tickets in display order
    pub tickets: TicketState,
    /// The open create/edit form, if any
    pub session: Option<EditSession>,
}

impl AppState {
    /// Screen with the given tickets and no open form
    #[must_use]
    pub const fn new(tickets: TicketState) -> Self {
        Self {
            tickets,
            session: None,
        }
    }

    /// Whether the create/edit form is showing
    #[must_use]
    pub const fn is_form_open(&self) -> bool {
        self.session.is_some()
    }
}

/// Every interaction on the ticket list screen
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppAction {
    /// Row affordances (delete, rate) acting on the collection directly
    Ticket(TicketAction),
    /// Form affordances
    Form(FormAction),
}

impl From<TicketAction> for AppAction {
    fn from(action: TicketAction) -> Self {
        Self::Ticket(action)
    }
}

impl From<FormAction> for AppAction {
    fn from(action: FormAction) -> Self {
        Self::Form(action)
    }
}

/// Reducer for the whole screen
#[derive(Clone, Debug)]
pub struct AppReducer {
    inner: CombinedReducer<AppState, AppAction, TicketEnvironment>,
}

impl AppReducer {
    /// Creates a new `AppReducer`
    #[must_use]
    pub fn new() -> Self {
        let tickets: SharedReducer<AppState, AppAction, TicketEnvironment> =
            Arc::new(scope_reducer(
                TicketReducer::new(),
                |state: &mut AppState| &mut state.tickets,
                |action: AppAction| match action {
                    AppAction::Ticket(action) => Some(action),
                    AppAction::Form(_) => None,
                },
                AppAction::Ticket,
            ));
        let form: SharedReducer<AppState, AppAction, TicketEnvironment> =
            Arc::new(FormReducer::new());

        Self {
            inner: combine_reducers(vec![tickets, form]),
        }
    }
}

impl Default for AppReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = TicketEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        self.inner.reduce(state, action, env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Rating, TicketId, TicketStatus};
    use ticket_desk_testing::{ReducerTest, assertions, test_clock, test_ids};

    fn test_env() -> TicketEnvironment {
        TicketEnvironment::new(Arc::new(test_clock()), Arc::new(test_ids()))
    }

    fn id(n: u128) -> TicketId {
        TicketId::from_uuid(uuid::Uuid::from_u128(n))
    }

    #[test]
    fn ticket_actions_reach_the_collection() {
        ReducerTest::new(AppReducer::new())
            .with_env(test_env())
            .given_state(AppState::default())
            .when_action(
                TicketAction::Create {
                    title: "A".into(),
                    description: "B".into(),
                    status: TicketStatus::Completed,
                }
                .into(),
            )
            .when_action(
                TicketAction::Rate {
                    id: id(1),
                    rating: Rating::new(5).unwrap(),
                }
                .into(),
            )
            .then_state(|state| {
                assert_eq!(state.tickets.len(), 1);
                assert_eq!(state.tickets.get(&id(1)).unwrap().rating, Rating::new(5).ok());
                assert!(!state.is_form_open());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn form_save_goes_through_the_collection_once() {
        ReducerTest::new(AppReducer::new())
            .with_env(test_env())
            .given_state(AppState::default())
            .when_action(FormAction::OpenForCreate.into())
            .when_action(FormAction::SetTitle("Only once".into()).into())
            .when_action(FormAction::Save.into())
            .then_state(|state| {
                assert_eq!(state.tickets.len(), 1);
                assert!(!state.is_form_open());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn deleting_the_edited_ticket_makes_save_a_noop() {
        ReducerTest::new(AppReducer::new())
            .with_env(test_env())
            .given_state(AppState::default())
            .when_action(
                TicketAction::Create {
                    title: "Doomed".into(),
                    description: String::new(),
                    status: TicketStatus::Created,
                }
                .into(),
            )
            .when_action(FormAction::OpenForEdit { id: id(1) }.into())
            .when_action(TicketAction::Delete { id: id(1) }.into())
            .when_action(FormAction::SetTitle("Edited".into()).into())
            .when_action(FormAction::Save.into())
            .then_state(|state| {
                assert!(state.tickets.is_empty());
                assert!(!state.is_form_open());
            })
            .run();
    }
}
