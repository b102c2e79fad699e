//! Error types for the ticket list.
//!
//! Operations on unknown ticket ids are not errors; they are silent no-ops.
//! What remains is rejecting values that cannot be represented at all.

use thiserror::Error;

/// Errors raised while building ticket values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TicketError {
    /// A rating outside 1..=5
    #[error("Rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(u8),

    /// A status label that names none of the three statuses
    #[error("Unknown ticket status: {0:?}")]
    InvalidStatus(String),
}
