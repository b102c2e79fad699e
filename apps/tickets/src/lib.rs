//! # Tickets
//!
//! The ticket list screen: an ordered list of support tickets that can be
//! created, edited, deleted and rated, plus the modal form used to create and
//! edit them.
//!
//! - [`types`]: tickets, statuses, ratings, and the ordered collection
//! - [`store`]: the ticket store reducer (create, update, delete, rate)
//! - [`session`]: the create/edit form and its reducer
//! - [`app`]: the composed screen state and reducer
//! - [`view`]: what a presentation layer draws for a given state
//!
//! # Quick Start
//!
//! ```no_run
//! use tickets::{AppAction, AppReducer, AppState, FormAction, TicketEnvironment, TicketState};
//! use ticket_desk_runtime::Store;
//!
//! # async fn example() -> Result<(), ticket_desk_runtime::StoreError> {
//! let env = TicketEnvironment::production();
//! let initial = AppState::new(TicketState::seeded(env.clock.as_ref(), env.ids.as_ref()));
//! let store = Store::new(initial, AppReducer::new(), env);
//!
//! store.send(AppAction::Form(FormAction::OpenForCreate)).await?;
//! store.send(AppAction::Form(FormAction::SetTitle("Desk lamp broken".into()))).await?;
//! store.send(AppAction::Form(FormAction::Save)).await?;
//!
//! let count = store.state(|s| s.tickets.len()).await;
//! assert_eq!(count, 4);
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod session;
pub mod store;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use app::{AppAction, AppReducer, AppState};
pub use config::Config;
pub use error::TicketError;
pub use session::{EditSession, FormAction, FormReducer, SessionMode};
pub use store::{TicketAction, TicketEnvironment, TicketReducer};
pub use types::{Rating, Ticket, TicketId, TicketState, TicketStatus};
pub use view::{StarRating, StatusColor, TicketListView, TicketRow};
