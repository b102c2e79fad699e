//! Render model for the ticket list.
//!
//! Pure functions from [`AppState`] to plain data a presentation layer can
//! draw without knowing any ticket rules: row colors, star counts, and whether
//! the rating control appears at all are decided here.

use crate::app::AppState;
use crate::session::{EditSession, SessionMode};
use crate::types::{Rating, Ticket, TicketId, TicketStatus};
use serde::Serialize;
use std::fmt::{self, Write as _};

/// Badge color for a status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum StatusColor {
    /// `Created`
    Blue,
    /// `UnderAssistance`
    Orange,
    /// `Completed`
    Green,
}

impl StatusColor {
    /// Lowercase color name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Orange => "orange",
            Self::Green => "green",
        }
    }
}

impl fmt::Display for StatusColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TicketStatus {
    /// Badge color for this status
    #[must_use]
    pub const fn color(self) -> StatusColor {
        match self {
            Self::Created => StatusColor::Blue,
            Self::UnderAssistance => StatusColor::Orange,
            Self::Completed => StatusColor::Green,
        }
    }
}

/// The five-star rating control
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct StarRating {
    filled: u8,
}

impl StarRating {
    /// Number of positions in the control
    pub const POSITIONS: u8 = Rating::MAX;

    /// Control reflecting a rating; no rating shows zero stars
    #[must_use]
    pub fn from_rating(rating: Option<Rating>) -> Self {
        Self {
            filled: rating.map_or(0, Rating::get),
        }
    }

    /// Filled positions
    #[must_use]
    pub const fn filled(self) -> u8 {
        self.filled
    }

    /// `★★★☆☆` for three stars
    #[must_use]
    pub fn render(self) -> String {
        (1..=Self::POSITIONS)
            .map(|position| if position <= self.filled { '★' } else { '☆' })
            .collect()
    }
}

/// One line of the ticket list
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TicketRow {
    /// Ticket the row's edit/delete affordances act on
    pub id: TicketId,
    /// Title text
    pub title: String,
    /// Description text
    pub description: String,
    /// Status label
    pub status_label: &'static str,
    /// Status badge color
    pub color: StatusColor,
    /// Rating control, shown only for completed tickets
    pub stars: Option<StarRating>,
}

impl TicketRow {
    /// Row for a ticket
    #[must_use]
    pub fn from_ticket(ticket: &Ticket) -> Self {
        Self {
            id: ticket.id,
            title: ticket.title.clone(),
            description: ticket.description.clone(),
            status_label: ticket.status.label(),
            color: ticket.status.color(),
            stars: ticket
                .status
                .is_completed()
                .then(|| StarRating::from_rating(ticket.rating)),
        }
    }
}

/// The modal create/edit form
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FormView {
    /// `"New Ticket"` or `"Edit Ticket"`
    pub heading: &'static str,
    /// Title field contents
    pub title: String,
    /// Description field contents
    pub description: String,
    /// Selected status
    pub status: TicketStatus,
    /// Selector choices, in order
    pub status_options: [TicketStatus; 3],
}

impl FormView {
    /// Form reflecting a session
    #[must_use]
    pub fn from_session(session: &EditSession) -> Self {
        Self {
            heading: match session.mode {
                SessionMode::Create => "New Ticket",
                SessionMode::Edit(_) => "Edit Ticket",
            },
            title: session.title.clone(),
            description: session.description.clone(),
            status: session.status,
            status_options: TicketStatus::ALL,
        }
    }
}

/// Everything on screen
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TicketListView {
    /// Rows in display order
    pub rows: Vec<TicketRow>,
    /// The form, while a session is open
    pub modal: Option<FormView>,
}

impl TicketListView {
    /// View of a state snapshot
    #[must_use]
    pub fn from_state(state: &AppState) -> Self {
        Self {
            rows: state.tickets.iter().map(TicketRow::from_ticket).collect(),
            modal: state.session.as_ref().map(FormView::from_session),
        }
    }

    /// Plain-text rendering, one block per row, form last
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        if self.rows.is_empty() {
            out.push_str("  (no tickets)\n");
        }
        for row in &self.rows {
            let _ = writeln!(out, "  [{}] {} ({})", row.color, row.title, row.status_label);
            if !row.description.is_empty() {
                let _ = writeln!(out, "      {}", row.description);
            }
            if let Some(stars) = row.stars {
                let _ = writeln!(out, "      {}", stars.render());
            }
        }

        if let Some(form) = &self.modal {
            let _ = writeln!(out, "  +-- {} --", form.heading);
            let _ = writeln!(out, "  | title:       {}", form.title);
            let _ = writeln!(out, "  | description: {}", form.description);
            let options: Vec<String> = form
                .status_options
                .iter()
                .map(|status| {
                    if *status == form.status {
                        format!("({status})")
                    } else {
                        status.to_string()
                    }
                })
                .collect();
            let _ = writeln!(out, "  | status:      {}", options.join(" "));
            out.push_str("  +-- [Save] [Cancel]\n");
        }

        out
    }
}
