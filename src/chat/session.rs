//! Guided-capture session state and field parsers.
//!
//! A session walks through five steps — name, contact, date, time, party
//! size — accumulating a [`PartialReservation`]. The step is only
//! meaningful while a capture is in progress, which the type system
//! enforces: an idle session simply holds no [`Capture`].
//!
//! Date/time/party parsing is done with plain result-returning functions;
//! the engine's re-prompt logic branches on the result tag rather than
//! catching anything.

use chrono::{Local, NaiveDate, NaiveTime};

/// Default reservation time seeded into a fresh capture.
const DEFAULT_TIME: &str = "19:00";

/// Default party size seeded into a fresh capture.
const DEFAULT_PARTY_SIZE: u32 = 2;

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Which field the capture is waiting for next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    AwaitingName,
    AwaitingContact,
    AwaitingDate,
    AwaitingTime,
    AwaitingPartySize,
}

/// The fields collected so far, pre-seeded with defaults.
#[derive(Debug, Clone)]
pub struct PartialReservation {
    pub customer_name: String,
    pub contact_info: String,
    pub date: String,
    pub time: String,
    pub party_size: u32,
    pub dish_ids: Vec<String>,
}

impl Default for PartialReservation {
    fn default() -> Self {
        PartialReservation {
            customer_name: String::new(),
            contact_info: String::new(),
            date: Local::now().format("%Y-%m-%d").to_string(),
            time: DEFAULT_TIME.to_string(),
            party_size: DEFAULT_PARTY_SIZE,
            dish_ids: Vec::new(),
        }
    }
}

/// An in-progress capture: the current step plus accumulated fields.
#[derive(Debug, Clone)]
pub struct Capture {
    pub step: Step,
    pub data: PartialReservation,
}

/// Per-conversation dialogue session. At most one capture at a time;
/// completing or cancelling it returns the session to idle.
#[derive(Debug, Default)]
pub struct Session {
    capture: Option<Capture>,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    /// Is a guided capture in progress?
    pub fn is_active(&self) -> bool {
        self.capture.is_some()
    }

    /// Start a fresh capture at the name step, discarding any previous
    /// partial data.
    pub fn begin(&mut self) -> &Capture {
        self.capture = Some(Capture {
            step: Step::AwaitingName,
            data: PartialReservation::default(),
        });
        self.capture.as_ref().expect("capture just set")
    }

    /// The in-progress capture, if any.
    pub fn capture(&self) -> Option<&Capture> {
        self.capture.as_ref()
    }

    pub fn capture_mut(&mut self) -> Option<&mut Capture> {
        self.capture.as_mut()
    }

    /// Return to idle, dropping all partial data.
    pub fn reset(&mut self) {
        self.capture = None;
    }
}

// ---------------------------------------------------------------------------
// Field parsers
// ---------------------------------------------------------------------------

/// Strict `YYYY-MM-DD` parse. Returns the canonical string on success.
pub fn parse_reservation_date(input: &str) -> Option<String> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%Y-%m-%d").to_string())
}

/// Strict `HH:MM` 24-hour parse. Returns the canonical string on success.
pub fn parse_reservation_time(input: &str) -> Option<String> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M")
        .ok()
        .map(|t| t.format("%H:%M").to_string())
}

/// Outcome of parsing a party-size answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartySizeInput {
    Valid(u32),
    /// Parsed as an integer but below 1.
    TooSmall,
    /// Not an integer at all.
    Invalid,
}

/// Parse a party size. Anything below 1 is rejected separately from
/// non-numeric input so the engine can word the correction accordingly.
pub fn parse_party_size(input: &str) -> PartySizeInput {
    match input.trim().parse::<i64>() {
        Ok(n) if n >= 1 => PartySizeInput::Valid(n as u32),
        Ok(_) => PartySizeInput::TooSmall,
        Err(_) => PartySizeInput::Invalid,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session_is_idle() {
        let session = Session::new();
        assert!(!session.is_active());
        assert!(session.capture().is_none());
    }

    #[test]
    fn test_begin_seeds_defaults() {
        let mut session = Session::new();
        let capture = session.begin();
        assert_eq!(capture.step, Step::AwaitingName);
        assert_eq!(capture.data.time, "19:00");
        assert_eq!(capture.data.party_size, 2);
        assert!(capture.data.dish_ids.is_empty());
        // seeded date is today's
        let today = Local::now().format("%Y-%m-%d").to_string();
        assert_eq!(capture.data.date, today);
    }

    #[test]
    fn test_reset_discards_partial_data() {
        let mut session = Session::new();
        session.begin();
        session.capture_mut().unwrap().data.customer_name = "Ann".to_string();
        session.reset();
        assert!(!session.is_active());

        // a new capture starts clean
        let capture = session.begin();
        assert_eq!(capture.step, Step::AwaitingName);
        assert!(capture.data.customer_name.is_empty());
    }

    #[test]
    fn test_parse_date_strict() {
        assert_eq!(
            parse_reservation_date("2025-01-10"),
            Some("2025-01-10".to_string())
        );
        assert!(parse_reservation_date("2024-13-40").is_none());
        assert!(parse_reservation_date("01/10/2025").is_none());
        assert!(parse_reservation_date("tomorrow").is_none());
        assert!(parse_reservation_date("").is_none());
    }

    #[test]
    fn test_parse_time_strict() {
        assert_eq!(parse_reservation_time("18:30"), Some("18:30".to_string()));
        assert_eq!(parse_reservation_time(" 09:05 "), Some("09:05".to_string()));
        assert!(parse_reservation_time("25:00").is_none());
        assert!(parse_reservation_time("7pm").is_none());
        assert!(parse_reservation_time("").is_none());
    }

    #[test]
    fn test_parse_party_size_tags() {
        assert_eq!(parse_party_size("4"), PartySizeInput::Valid(4));
        assert_eq!(parse_party_size(" 12 "), PartySizeInput::Valid(12));
        assert_eq!(parse_party_size("0"), PartySizeInput::TooSmall);
        assert_eq!(parse_party_size("-3"), PartySizeInput::TooSmall);
        assert_eq!(parse_party_size("four"), PartySizeInput::Invalid);
        assert_eq!(parse_party_size(""), PartySizeInput::Invalid);
    }
}
