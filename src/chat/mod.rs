//! Dialogue layer.
//!
//! A deterministic, low-latency adapter that turns one line of user text
//! into a formatted reply plus an optional action tag for the host
//! front-end. Pipeline:
//!
//! 1. **Intent classification** — an ordered first-match-wins cascade over
//!    the lower-cased line (`intent`)
//! 2. **Guided capture** — a five-step reservation state machine plus a
//!    one-shot labeled-form parser (`session`, `form`)
//! 3. **Rendering** — catalog/reservation results to text blocks (`format`)
//! 4. **Dispatch** — ties the above to the Catalog Store and Reservation
//!    Ledger (`engine`)
//!
//! The layer is fully synchronous: one call in, one [`Reply`] out. Session
//! state is owned by the [`engine::Engine`] instance, one per conversation.

pub mod engine;
pub mod form;
pub mod format;
pub mod intent;
pub mod session;

pub use engine::Engine;

// ---------------------------------------------------------------------------
// Reply — the output of the dialogue layer
// ---------------------------------------------------------------------------

/// Out-of-band signal telling the host front-end to change view or
/// request specific follow-up input. The engine only emits the tag; the
/// follow-up itself is the host's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionTag {
    /// Render the full menu view.
    MenuFull,
    /// A guided reservation capture just started.
    Reservation,
    /// Ask the user which reservation to add dishes to, then which dishes.
    AddDishes,
}

/// One reply from the dialogue engine.
#[derive(Debug, Clone)]
pub struct Reply {
    pub text: String,
    pub action: Option<ActionTag>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply {
            text: text.into(),
            action: None,
        }
    }

    pub fn with_action(text: impl Into<String>, action: ActionTag) -> Self {
        Reply {
            text: text.into(),
            action: Some(action),
        }
    }
}
