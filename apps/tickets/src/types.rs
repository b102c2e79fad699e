//! Domain types for the ticket list.
//!
//! A ticket moves between three statuses and may carry a 1–5 rating once it
//! is completed. The one rule every mutation must respect:
//!
//! > a ticket has a rating only while its status is `Completed`.
//!
//! [`TicketState`] owns the ordered collection and is the only place tickets
//! are mutated, so the rule is enforced here and nowhere else.

use crate::error::TicketError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ticket_desk_core::environment::{Clock, IdGenerator};
use uuid::Uuid;

/// Unique identifier for a ticket
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(Uuid);

impl TicketId {
    /// Creates a `TicketId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Allocates a fresh id from the given generator
    #[must_use]
    pub fn generate(ids: &dyn IdGenerator) -> Self {
        Self(ids.next_id())
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a ticket is in its lifecycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketStatus {
    /// Just opened, nobody is working on it yet
    #[default]
    Created,
    /// Someone is working on it
    UnderAssistance,
    /// Done; may be rated
    Completed,
}

impl TicketStatus {
    /// Every status, in selector order
    pub const ALL: [Self; 3] = [Self::Created, Self::UnderAssistance, Self::Completed];

    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::UnderAssistance => "Under Assistance",
            Self::Completed => "Completed",
        }
    }

    /// Whether a ticket in this status may carry a rating
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TicketStatus {
    type Err = TicketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "created" => Ok(Self::Created),
            "under assistance" | "under_assistance" | "underassistance" => {
                Ok(Self::UnderAssistance)
            },
            "completed" => Ok(Self::Completed),
            _ => Err(TicketError::InvalidStatus(s.to_string())),
        }
    }
}

/// A 1–5 star rating
///
/// Out-of-range values cannot be represented, so the store never has to
/// check them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Lowest rating
    pub const MIN: u8 = 1;
    /// Highest rating
    pub const MAX: u8 = 5;

    /// Validates and wraps a star count
    ///
    /// # Errors
    ///
    /// Returns [`TicketError::RatingOutOfRange`] unless `1 <= value <= 5`.
    pub const fn new(value: u8) -> Result<Self, TicketError> {
        if value >= Self::MIN && value <= Self::MAX {
            Ok(Self(value))
        } else {
            Err(TicketError::RatingOutOfRange(value))
        }
    }

    /// Number of stars
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = TicketError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

/// A single ticket
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique identifier, fixed at creation
    pub id: TicketId,
    /// Short summary
    pub title: String,
    /// Free-form details
    pub description: String,
    /// Lifecycle status
    pub status: TicketStatus,
    /// Present only while `status` is `Completed`
    pub rating: Option<Rating>,
    /// When the ticket was created
    pub created_at: DateTime<Utc>,
    /// When the ticket was last edited or rated
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Creates an unrated ticket
    #[must_use]
    pub const fn new(
        id: TicketId,
        title: String,
        description: String,
        status: TicketStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            status,
            rating: None,
            created_at,
            updated_at: created_at,
        }
    }

    /// Whether the rating/status rule holds for this ticket
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        self.rating.is_none() || self.status.is_completed()
    }
}

/// The ordered ticket collection
///
/// Insertion order is display order. All mutation goes through
/// [`create`](Self::create), [`update`](Self::update),
/// [`delete`](Self::delete) and [`rate`](Self::rate); operations on an
/// unknown id leave the collection untouched and report `false`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketState {
    tickets: Vec<Ticket>,
}

impl TicketState {
    /// Creates an empty collection
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tickets: Vec::new(),
        }
    }

    /// The example tickets the list starts with
    #[must_use]
    pub fn seeded(clock: &dyn Clock, ids: &dyn IdGenerator) -> Self {
        let now = clock.now();
        let mut state = Self::new();

        state.create(
            TicketId::generate(ids),
            "Printer not working".to_string(),
            "The office printer on the second floor shows a paper jam error.".to_string(),
            TicketStatus::Created,
            now,
        );
        state.create(
            TicketId::generate(ids),
            "Cannot access email".to_string(),
            "Outlook keeps asking for my password after the update.".to_string(),
            TicketStatus::UnderAssistance,
            now,
        );
        let done = state
            .create(
                TicketId::generate(ids),
                "Laptop screen flickering".to_string(),
                "The screen flickers when the laptop is on battery.".to_string(),
                TicketStatus::Completed,
                now,
            )
            .id;
        if let Ok(rating) = Rating::new(4) {
            state.rate(&done, rating, now);
        }

        state
    }

    /// Appends a new, unrated ticket and returns it
    pub fn create(
        &mut self,
        id: TicketId,
        title: String,
        description: String,
        status: TicketStatus,
        at: DateTime<Utc>,
    ) -> &Ticket {
        let index = self.tickets.len();
        self.tickets
            .push(Ticket::new(id, title, description, status, at));
        &self.tickets[index]
    }

    /// Replaces title, description and status in place
    ///
    /// Moving away from `Completed` drops the rating; staying on or moving to
    /// `Completed` keeps whatever rating exists.
    pub fn update(
        &mut self,
        id: &TicketId,
        title: String,
        description: String,
        status: TicketStatus,
        at: DateTime<Utc>,
    ) -> bool {
        let Some(ticket) = self.get_mut(id) else {
            return false;
        };

        ticket.title = title;
        ticket.description = description;
        ticket.status = status;
        if !status.is_completed() {
            ticket.rating = None;
        }
        ticket.updated_at = at;
        true
    }

    /// Removes the ticket, keeping the order of the rest
    pub fn delete(&mut self, id: &TicketId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.tickets.remove(index);
                true
            },
            None => false,
        }
    }

    /// Sets the rating whatever the ticket's status
    ///
    /// Callers only offer rating on completed tickets; this does not check.
    pub fn rate(&mut self, id: &TicketId, rating: Rating, at: DateTime<Utc>) -> bool {
        let Some(ticket) = self.get_mut(id) else {
            return false;
        };

        ticket.rating = Some(rating);
        ticket.updated_at = at;
        true
    }

    /// Returns a ticket by ID
    #[must_use]
    pub fn get(&self, id: &TicketId) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == *id)
    }

    fn get_mut(&mut self, id: &TicketId) -> Option<&mut Ticket> {
        self.tickets.iter_mut().find(|t| t.id == *id)
    }

    /// Display position of a ticket
    #[must_use]
    pub fn position(&self, id: &TicketId) -> Option<usize> {
        self.tickets.iter().position(|t| t.id == *id)
    }

    /// Number of tickets
    #[must_use]
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    /// Whether there are no tickets
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    /// Tickets in display order
    pub fn iter(&self) -> std::slice::Iter<'_, Ticket> {
        self.tickets.iter()
    }

    /// Tickets in display order
    #[must_use]
    pub fn as_slice(&self) -> &[Ticket] {
        &self.tickets
    }

    /// The most recently created ticket still present
    #[must_use]
    pub fn last(&self) -> Option<&Ticket> {
        self.tickets.last()
    }

    /// Number of tickets in the given status
    #[must_use]
    pub fn count_by_status(&self, status: TicketStatus) -> usize {
        self.tickets.iter().filter(|t| t.status == status).count()
    }

    /// Whether every ticket satisfies the rating/status rule
    #[must_use]
    pub fn invariant_holds(&self) -> bool {
        self.tickets.iter().all(Ticket::is_consistent)
    }
}

impl<'a> IntoIterator for &'a TicketState {
    type Item = &'a Ticket;
    type IntoIter = std::slice::Iter<'a, Ticket>;

    fn into_iter(self) -> Self::IntoIter {
        self.tickets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use ticket_desk_testing::{mocks::FixedClock, test_clock, test_ids};

    fn id(n: u128) -> TicketId {
        TicketId::from_uuid(Uuid::from_u128(n))
    }

    fn rating(n: u8) -> Rating {
        Rating::new(n).unwrap()
    }

    fn completed_and_rated() -> TicketState {
        let now = test_clock().now();
        let mut state = TicketState::new();
        state.create(id(1), "A".into(), "B".into(), TicketStatus::Completed, now);
        state.rate(&id(1), rating(4), now);
        state
    }

    #[test]
    fn rating_bounds() {
        assert!(Rating::new(0).is_err());
        assert_eq!(Rating::new(1).unwrap().get(), 1);
        assert_eq!(Rating::new(5).unwrap().get(), 5);
        assert!(matches!(Rating::try_from(6), Err(TicketError::RatingOutOfRange(6))));
    }

    #[test]
    fn status_parses_labels() {
        let parse = |label: &str| label.parse::<TicketStatus>();

        assert_eq!(parse("Under Assistance").unwrap(), TicketStatus::UnderAssistance);
        assert_eq!(parse("under_assistance").unwrap(), TicketStatus::UnderAssistance);
        assert_eq!(parse(" COMPLETED ").unwrap(), TicketStatus::Completed);
        assert!(matches!(parse("closed"), Err(TicketError::InvalidStatus(_))));
    }

    #[test]
    fn status_display_matches_label() {
        for status in TicketStatus::ALL {
            assert_eq!(status.to_string(), status.label());
        }
    }

    #[test]
    fn create_appends_unrated() {
        let now = test_clock().now();
        let mut state = completed_and_rated();

        let created = state
            .create(id(2), "A".into(), "B".into(), TicketStatus::Created, now)
            .clone();

        assert_eq!(state.len(), 2);
        assert_eq!(state.position(&id(2)), Some(1));
        assert_eq!(created.title, "A");
        assert_eq!(created.description, "B");
        assert_eq!(created.status, TicketStatus::Created);
        assert_eq!(created.rating, None);
    }

    #[test]
    fn update_away_from_completed_clears_rating() {
        let now = test_clock().now();
        let mut state = completed_and_rated();

        assert!(state.update(&id(1), "X".into(), "Y".into(), TicketStatus::UnderAssistance, now));

        let ticket = state.get(&id(1)).unwrap();
        assert_eq!(ticket.title, "X");
        assert_eq!(ticket.rating, None);
        assert!(state.invariant_holds());
    }

    #[test]
    fn update_staying_completed_keeps_rating() {
        let now = test_clock().now();
        let mut state = completed_and_rated();

        state.update(&id(1), "X".into(), "Y".into(), TicketStatus::Completed, now);

        assert_eq!(state.get(&id(1)).unwrap().rating, Some(rating(4)));
    }

    #[test]
    fn update_to_completed_does_not_assign_rating() {
        let now = test_clock().now();
        let mut state = TicketState::new();
        state.create(id(1), "A".into(), "B".into(), TicketStatus::Created, now);

        state.update(&id(1), "A".into(), "B".into(), TicketStatus::Completed, now);

        assert_eq!(state.get(&id(1)).unwrap().rating, None);
    }

    #[test]
    fn unknown_ids_are_noops() {
        let now = test_clock().now();
        let mut state = completed_and_rated();
        let before = state.clone();

        assert!(!state.update(&id(9), "X".into(), "Y".into(), TicketStatus::Created, now));
        assert!(!state.delete(&id(9)));
        assert!(!state.rate(&id(9), rating(2), now));

        assert_eq!(state, before);
    }

    #[test]
    fn edits_and_ratings_move_updated_at() {
        let opened = test_clock().now();
        let later = FixedClock::new(opened + Duration::hours(2)).now();
        let mut state = TicketState::new();
        state.create(id(1), "A".into(), "B".into(), TicketStatus::Created, opened);

        state.update(&id(1), "A".into(), "B".into(), TicketStatus::Completed, later);
        let ticket = state.get(&id(1)).unwrap();
        assert_eq!(ticket.created_at, opened);
        assert_eq!(ticket.updated_at, later);

        let rated_at = later + Duration::minutes(5);
        state.rate(&id(1), rating(5), rated_at);
        let ticket = state.get(&id(1)).unwrap();
        assert_eq!(ticket.created_at, opened);
        assert_eq!(ticket.updated_at, rated_at);

        let missed_at = rated_at + Duration::days(1);
        state.update(&id(9), "X".into(), "Y".into(), TicketStatus::Created, missed_at);
        state.rate(&id(9), rating(1), missed_at);
        assert_eq!(state.get(&id(1)).unwrap().updated_at, rated_at);
    }

    #[test]
    fn rate_ignores_status() {
        let now = test_clock().now();
        let mut state = TicketState::new();
        state.create(id(1), "A".into(), "B".into(), TicketStatus::UnderAssistance, now);

        assert!(state.rate(&id(1), rating(3), now));

        assert_eq!(state.get(&id(1)).unwrap().rating, Some(rating(3)));
        assert!(!state.invariant_holds());
    }

    #[test]
    fn delete_preserves_order() {
        let now = test_clock().now();
        let mut state = TicketState::new();
        for n in 1..=3 {
            state.create(id(n), n.to_string(), String::new(), TicketStatus::Created, now);
        }

        state.delete(&id(2));

        let titles: Vec<_> = state.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["1", "3"]);
    }

    #[test]
    fn seed_set() {
        let state = TicketState::seeded(&test_clock(), &test_ids());

        assert_eq!(state.len(), 3);
        assert_eq!(state.count_by_status(TicketStatus::Created), 1);
        assert_eq!(state.count_by_status(TicketStatus::UnderAssistance), 1);
        assert_eq!(state.count_by_status(TicketStatus::Completed), 1);
        assert_eq!(state.last().unwrap().rating, Some(rating(4)));
        assert!(state.invariant_holds());
    }

    #[test]
    fn rating_serializes_as_number() {
        let json = serde_json::to_string(&rating(3)).unwrap();
        assert_eq!(json, "3");
        assert!(serde_json::from_str::<Rating>("7").is_err());
    }
}
