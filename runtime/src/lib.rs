//! # Ticket Desk Runtime
//!
//! The [`Store`] owns a screen's state and is the only thing that mutates it.
//!
//! - Actions go in through [`Store::send`] and are applied one at a time by
//!   the reducer, in the order they arrive.
//! - After every action the Store publishes an owned snapshot of the state
//!   ([`Store::subscribe`]), which is what a renderer draws from.
//! - Effects returned by the reducer run on the tokio runtime; actions they
//!   produce are fed back through `send`.
//!
//! ```ignore
//! use ticket_desk_runtime::Store;
//!
//! let store = Store::new(AppState::default(), AppReducer::new(), env);
//! let mut screen = store.subscribe();
//!
//! store.send(FormAction::OpenForCreate.into()).await?;
//! render(&screen.borrow_and_update());
//! ```

mod config;
mod error;
mod handle;
pub mod store;

pub use config::StoreConfig;
pub use error::StoreError;
pub use handle::EffectHandle;
pub use store::Store;
