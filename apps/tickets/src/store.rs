//! Ticket Store reducer.
//!
//! Translates [`TicketAction`]s into calls on [`TicketState`], drawing ids and
//! timestamps from the environment. Actions naming an unknown ticket change
//! nothing.

use crate::types::{Rating, TicketId, TicketState, TicketStatus};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use ticket_desk_core::{
    SmallVec,
    effect::Effect,
    environment::{Clock, IdGenerator, SystemClock, UuidGenerator},
    reducer::Reducer,
    smallvec,
};

/// Mutations of the ticket collection
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketAction {
    /// Append a new, unrated ticket
    Create {
        /// Short summary
        title: String,
        /// Free-form details
        description: String,
        /// Initial status
        status: TicketStatus,
    },

    /// Replace a ticket's editable fields in place
    Update {
        /// Ticket to edit
        id: TicketId,
        /// New title
        title: String,
        /// New description
        description: String,
        /// New status; anything but `Completed` drops the rating
        status: TicketStatus,
    },

    /// Remove a ticket
    Delete {
        /// Ticket to remove
        id: TicketId,
    },

    /// Set a ticket's rating
    Rate {
        /// Ticket to rate
        id: TicketId,
        /// Stars
        rating: Rating,
    },
}

/// Environment dependencies for the ticket reducers
#[derive(Clone)]
pub struct TicketEnvironment {
    /// Clock for timestamps
    pub clock: Arc<dyn Clock>,
    /// Source of new ticket ids
    pub ids: Arc<dyn IdGenerator>,
}

impl TicketEnvironment {
    /// Creates a new `TicketEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }

    /// Wall-clock time and random ids
    #[must_use]
    pub fn production() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(UuidGenerator))
    }
}

impl std::fmt::Debug for TicketEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TicketEnvironment").finish_non_exhaustive()
    }
}

/// Reducer for the ticket collection
#[derive(Clone, Copy, Debug, Default)]
pub struct TicketReducer;

impl TicketReducer {
    /// Creates a new `TicketReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for TicketReducer {
    type State = TicketState;
    type Action = TicketAction;
    type Environment = TicketEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let now = env.clock.now();

        match action {
            TicketAction::Create {
                title,
                description,
                status,
            } => {
                let id = TicketId::generate(env.ids.as_ref());
                let ticket = state.create(id, title, description, status, now);
                tracing::debug!(id = %ticket.id, status = %ticket.status, "ticket created");
            },
            TicketAction::Update {
                id,
                title,
                description,
                status,
            } => {
                if state.update(&id, title, description, status, now) {
                    tracing::debug!(%id, %status, "ticket updated");
                } else {
                    tracing::trace!(%id, "update ignored: no such ticket");
                }
            },
            TicketAction::Delete { id } => {
                if state.delete(&id) {
                    tracing::debug!(%id, "ticket deleted");
                } else {
                    tracing::trace!(%id, "delete ignored: no such ticket");
                }
            },
            TicketAction::Rate { id, rating } => {
                if state.rate(&id, rating, now) {
                    tracing::debug!(%id, %rating, "ticket rated");
                } else {
                    tracing::trace!(%id, "rating ignored: no such ticket");
                }
            },
        }

        smallvec![Effect::None]
    }
}
