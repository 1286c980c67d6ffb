//! Dialogue Engine — ties intent classification, the guided capture
//! state machine, and the stores together.
//!
//! One [`Engine`] owns the state of one conversation: the catalog, the
//! ledger, the capture session, and the transcript history used by the
//! hosted-assistant fallback. Each call to [`Engine::respond`] is a
//! fully synchronous one-shot: a line of text in, a [`Reply`] out.
//!
//! No condition in here is fatal: validation failures re-prompt at the
//! same step, lookup misses render as "not found" text, and assistant
//! failures collapse to a fixed apology.

use tracing::debug;

use crate::assistant::{Assistant, ChatTurn, SYSTEM_PROMPT};
use crate::catalog::Catalog;
use crate::ledger::Ledger;

use super::form::{parse_labeled_form, FormParse};
use super::format::{format_items, format_reservation};
use super::intent::{classify, Intent};
use super::session::{
    parse_party_size, parse_reservation_date, parse_reservation_time, PartySizeInput, Session, Step,
};
use super::{ActionTag, Reply};

const HELP_TEXT: &str = "\
Here are the commands you can use:
- 'menu' - View the full menu
- 'vegetarian', 'vegan', 'gluten-free' - View dietary options
- 'appetizers', 'main courses', 'desserts' - View specific categories
- 'search [query]' - Search for dishes (e.g., 'search salmon')
- 'reserve' - Make a reservation step by step
- 'add dishes' - Add dishes to an existing reservation
- 'help' - Show this help message
- 'exit' or 'quit' - End the conversation";

const NOT_UNDERSTOOD: &str =
    "I'm not sure how to respond to that. Type 'help' to see available commands.";

const FORM_CORRECTION: &str = "I couldn't read those reservation details. Please use the format \
'Name: ..., Contact: ..., Date: YYYY-MM-DD, Time: HH:MM, Party: N' \
(party size must be a whole number of at least 1), or answer the questions one at a time.";

/// The per-conversation dialogue engine.
pub struct Engine {
    catalog: Catalog,
    ledger: Ledger,
    session: Session,
    assistant: Option<Assistant>,
    history: Vec<ChatTurn>,
}

impl Engine {
    pub fn new(catalog: Catalog, ledger: Ledger) -> Self {
        Engine {
            catalog,
            ledger,
            session: Session::new(),
            assistant: None,
            history: vec![ChatTurn::system(SYSTEM_PROMPT)],
        }
    }

    /// Enable the hosted-assistant fallback for unmatched input.
    pub fn with_assistant(mut self, assistant: Assistant) -> Self {
        self.assistant = Some(assistant);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    /// Is a guided reservation capture in progress? Hosts use this to
    /// decide whether empty input should be forwarded (an empty answer
    /// keeps a field's default during capture).
    pub fn in_capture(&self) -> bool {
        self.session.is_active()
    }

    /// Process one line of user input and produce a reply.
    pub fn respond(&mut self, line: &str) -> Reply {
        self.history.push(ChatTurn::user(line));

        let intent = classify(line, self.session.is_active());
        debug!(?intent, "classified input");

        let reply = match intent {
            Intent::FullMenu => Reply::with_action("Here's our full menu:", ActionTag::MenuFull),
            Intent::DietaryTag(tag) => {
                let items = self.catalog.items_by_dietary_tag(tag);
                Reply::text(format_items(&items, dietary_title(tag)))
            }
            Intent::CategoryListing(name) => {
                let items = self.catalog.items_by_category(name);
                Reply::text(format_items(&items, name))
            }
            Intent::Search(None) => Reply::text(
                "Please specify what you'd like to search for. For example: 'search salmon'",
            ),
            Intent::Search(Some(query)) => {
                let items = self.catalog.search(&query);
                Reply::text(format_items(
                    &items,
                    &format!("Search Results for '{}'", query),
                ))
            }
            Intent::StartReservation => self.start_capture(),
            Intent::GuidedTurn => self.handle_guided(line),
            Intent::AddDishes => Reply::with_action(
                "Happy to add dishes to an existing reservation.",
                ActionTag::AddDishes,
            ),
            Intent::Help => Reply::text(HELP_TEXT),
            Intent::Fallback => self.fallback(),
        };

        self.history.push(ChatTurn::assistant(&reply.text));
        reply
    }

    fn start_capture(&mut self) -> Reply {
        let capture = self.session.begin();
        let text = format!(
            "Let's make a reservation! What name should I put it under?\n\
             (You can also give everything at once, e.g. 'Name: Jane Doe, \
             Contact: jane@x.com, Date: {}, Time: {}, Party: {}', \
             or type 'cancel' to stop.)",
            capture.data.date, capture.data.time, capture.data.party_size,
        );
        Reply::with_action(text, ActionTag::Reservation)
    }

    /// One turn of the guided capture. Only called while a session is
    /// active; every path either advances a step, re-prompts in place,
    /// or resets the session.
    fn handle_guided(&mut self, line: &str) -> Reply {
        let trimmed = line.trim();

        // Explicit abort wins over everything.
        if matches!(
            trimmed.to_lowercase().as_str(),
            "cancel" | "stop" | "quit"
        ) {
            self.session.reset();
            return Reply::text(
                "No problem, I've cancelled the reservation request. How else can I help?",
            );
        }

        // The one-shot form is accepted unconditionally at any step.
        match parse_labeled_form(line) {
            FormParse::Parsed(form) => {
                let reservation = self.ledger.create(
                    &form.name,
                    &form.contact,
                    &form.date,
                    &form.time,
                    form.party_size,
                    Vec::new(),
                );
                self.session.reset();
                return Reply::text(format_reservation(&reservation));
            }
            FormParse::Invalid => return Reply::text(FORM_CORRECTION),
            FormParse::NotAForm => {}
        }

        let step = match self.session.capture() {
            Some(capture) => capture.step,
            // Defensive: routed here without an active capture.
            None => return Reply::text("Please try again, or type 'cancel' to stop."),
        };

        match step {
            Step::AwaitingName => {
                let capture = self.session.capture_mut().expect("capture active");
                capture.data.customer_name = trimmed.to_string();
                capture.step = Step::AwaitingContact;
                if trimmed.is_empty() {
                    Reply::text("Got it. What's the best contact number or email for you?")
                } else {
                    Reply::text(format!(
                        "Thanks, {}! What's the best contact number or email for you?",
                        trimmed
                    ))
                }
            }
            Step::AwaitingContact => {
                let capture = self.session.capture_mut().expect("capture active");
                capture.data.contact_info = trimmed.to_string();
                capture.step = Step::AwaitingDate;
                let date = capture.data.date.clone();
                Reply::text(format!(
                    "What date would you like? (YYYY-MM-DD — press Enter to keep {})",
                    date
                ))
            }
            Step::AwaitingDate => {
                if trimmed.is_empty() {
                    // keep the seeded default and move on
                    let capture = self.session.capture_mut().expect("capture active");
                    capture.step = Step::AwaitingTime;
                    return Reply::text(time_prompt(&capture.data.time));
                }
                match parse_reservation_date(trimmed) {
                    Some(date) => {
                        let capture = self.session.capture_mut().expect("capture active");
                        capture.data.date = date;
                        capture.step = Step::AwaitingTime;
                        Reply::text(time_prompt(&capture.data.time))
                    }
                    None => Reply::text(
                        "That date doesn't look right. Please use YYYY-MM-DD format \
                         (for example 2025-01-10), or press Enter to keep the default.",
                    ),
                }
            }
            Step::AwaitingTime => {
                if trimmed.is_empty() {
                    let capture = self.session.capture_mut().expect("capture active");
                    capture.step = Step::AwaitingPartySize;
                    return Reply::text(PARTY_PROMPT);
                }
                match parse_reservation_time(trimmed) {
                    Some(time) => {
                        let capture = self.session.capture_mut().expect("capture active");
                        capture.data.time = time;
                        capture.step = Step::AwaitingPartySize;
                        Reply::text(PARTY_PROMPT)
                    }
                    None => Reply::text(
                        "That time doesn't look right. Please use HH:MM 24-hour format \
                         (for example 18:30), or press Enter to keep the default.",
                    ),
                }
            }
            Step::AwaitingPartySize => match parse_party_size(trimmed) {
                PartySizeInput::Valid(party_size) => {
                    let data = self
                        .session
                        .capture()
                        .expect("capture active")
                        .data
                        .clone();
                    self.session.reset();
                    let reservation = self.ledger.create(
                        &data.customer_name,
                        &data.contact_info,
                        &data.date,
                        &data.time,
                        party_size,
                        Vec::new(),
                    );
                    Reply::text(format_reservation(&reservation))
                }
                PartySizeInput::TooSmall => {
                    Reply::text("A reservation needs at least 1 person. How many should I book for?")
                }
                PartySizeInput::Invalid => {
                    Reply::text("Please give the party size as a number (for example 4).")
                }
            },
        }
    }

    fn fallback(&self) -> Reply {
        match &self.assistant {
            Some(assistant) => Reply::text(assistant.reply(&self.history)),
            None => Reply::text(NOT_UNDERSTOOD),
        }
    }
}

fn time_prompt(default_time: &str) -> String {
    format!(
        "What time should I book? (HH:MM, 24-hour — press Enter to keep {})",
        default_time
    )
}

const PARTY_PROMPT: &str = "And how many people should I book the table for?";

fn dietary_title(tag: &str) -> &'static str {
    match tag {
        "vegetarian" => "Vegetarian Options",
        "vegan" => "Vegan Options",
        _ => "Gluten-Free Options",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
