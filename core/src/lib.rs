//! # Ticket Desk Core
//!
//! The pieces every screen is built from:
//!
//! - **State**: plain owned data describing what is on screen
//! - **Action**: one value per user interaction
//! - [`Reducer`](reducer::Reducer): applies an action to the state
//! - [`Effect`](effect::Effect): follow-up work, described rather than performed
//! - [`environment`]: the clock and id source a reducer may consult
//!
//! The runtime crate owns the state and applies actions one at a time, so a
//! reducer never observes a partially applied action.
//!
//! ## Example
//!
//! ```
//! use ticket_desk_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct LampState {
//!     on: bool,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum LampAction {
//!     Toggle,
//! }
//!
//! struct LampReducer;
//!
//! impl Reducer for LampReducer {
//!     type State = LampState;
//!     type Action = LampAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut LampState,
//!         action: LampAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<LampAction>; 4]> {
//!         match action {
//!             LampAction::Toggle => state.on = !state.on,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let mut state = LampState::default();
//! LampReducer.reduce(&mut state, LampAction::Toggle, &());
//! assert!(state.on);
//! ```

pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

pub mod composition;
pub mod effect;
pub mod environment;
pub mod reducer;
