//! Edit session: the create/edit form.
//!
//! A session holds working copies of a ticket's fields while the form is
//! open. Nothing reaches the ticket collection until `Save`, and `Cancel`
//! throws the copies away.

use crate::app::{AppAction, AppState};
use crate::store::{TicketAction, TicketEnvironment, TicketReducer};
use crate::types::{Ticket, TicketId, TicketStatus};
use serde::{Deserialize, Serialize};
use ticket_desk_core::{SmallVec, effect::Effect, reducer::Reducer};

/// What saving the form will do
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionMode {
    /// Saving appends a new ticket
    Create,
    /// Saving rewrites the given ticket
    Edit(TicketId),
}

/// Working copy of the form fields
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditSession {
    /// Create or edit
    pub mode: SessionMode,
    /// Title field
    pub title: String,
    /// Description field
    pub description: String,
    /// Status selector
    pub status: TicketStatus,
}

impl EditSession {
    /// Blank form for a new ticket
    #[must_use]
    pub const fn for_create() -> Self {
        Self {
            mode: SessionMode::Create,
            title: String::new(),
            description: String::new(),
            status: TicketStatus::Created,
        }
    }

    /// Form pre-filled from an existing ticket
    #[must_use]
    pub fn for_edit(ticket: &Ticket) -> Self {
        Self {
            mode: SessionMode::Edit(ticket.id),
            title: ticket.title.clone(),
            description: ticket.description.clone(),
            status: ticket.status,
        }
    }

    /// The store action that commits this session
    #[must_use]
    pub fn into_commit(self) -> TicketAction {
        match self.mode {
            SessionMode::Create => TicketAction::Create {
                title: self.title,
                description: self.description,
                status: self.status,
            },
            SessionMode::Edit(id) => TicketAction::Update {
                id,
                title: self.title,
                description: self.description,
                status: self.status,
            },
        }
    }
}

/// Form interactions
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormAction {
    /// Open a blank form
    OpenForCreate,
    /// Open the form on an existing ticket
    OpenForEdit {
        /// Ticket to edit
        id: TicketId,
    },
    /// Title field changed
    SetTitle(String),
    /// Description field changed
    SetDescription(String),
    /// Status selector changed
    SetStatus(TicketStatus),
    /// Commit the form and close it
    Save,
    /// Close the form without committing
    Cancel,
}

/// Reducer for form actions
///
/// Runs over the whole [`AppState`] because saving writes to the ticket
/// collection. Non-form actions are ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct FormReducer {
    tickets: TicketReducer,
}

impl FormReducer {
    /// Creates a new `FormReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tickets: TicketReducer::new(),
        }
    }
}

impl Reducer for FormReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = TicketEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let AppAction::Form(action) = action else {
            return SmallVec::new();
        };

        match action {
            FormAction::OpenForCreate => {
                if state.session.is_some() {
                    tracing::debug!("replacing open session");
                }
                state.session = Some(EditSession::for_create());
            },
            FormAction::OpenForEdit { id } => match state.tickets.get(&id) {
                Some(ticket) => {
                    if state.session.is_some() {
                        tracing::debug!("replacing open session");
                    }
                    state.session = Some(EditSession::for_edit(ticket));
                },
                None => tracing::trace!(%id, "edit ignored: no such ticket"),
            },
            FormAction::SetTitle(title) => {
                if let Some(session) = state.session.as_mut() {
                    session.title = title;
                }
            },
            FormAction::SetDescription(description) => {
                if let Some(session) = state.session.as_mut() {
                    session.description = description;
                }
            },
            FormAction::SetStatus(status) => {
                if let Some(session) = state.session.as_mut() {
                    session.status = status;
                }
            },
            FormAction::Save => {
                let Some(session) = state.session.take() else {
                    tracing::trace!("save ignored: no open session");
                    return SmallVec::new();
                };
                return self
                    .tickets
                    .reduce(&mut state.tickets, session.into_commit(), env)
                    .into_iter()
                    .map(|effect| effect.map(AppAction::Ticket))
                    .collect();
            },
            FormAction::Cancel => {
                state.session = None;
            },
        }

        SmallVec::new()
    }
}
