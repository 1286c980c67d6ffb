//! Intent classification — an ordered cascade of (predicate, intent)
//! checks over the lower-cased input line. First match wins, and the
//! ordering is load-bearing:
//!
//! 1. Exact menu/dietary/category keywords
//! 2. Substring `search`
//! 3. An active capture session intercepts the line — this outranks the
//!    reserve keywords and everything after, so mid-capture turns are
//!    never reinterpreted
//! 4. Exact `reserve`/`reservation`/`book`
//! 5. Exact `add dishes`/`add dish`
//! 6. Exact `help`
//! 7. Fallback

/// A recognized user intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Show the whole menu.
    FullMenu,
    /// List items carrying a dietary tag ("vegetarian", "vegan",
    /// "gluten-free").
    DietaryTag(&'static str),
    /// List items in a named category.
    CategoryListing(&'static str),
    /// Substring search over dish names/descriptions. `None` means the
    /// user said `search` with no query and needs a prompt.
    Search(Option<String>),
    /// Begin a guided reservation capture.
    StartReservation,
    /// An active capture session consumes this line as-is.
    GuidedTurn,
    /// Add dishes to an existing reservation (host-driven follow-up).
    AddDishes,
    /// Show the command list.
    Help,
    /// Nothing matched locally.
    Fallback,
}

/// Classify one line of input. `session_active` is whether a guided
/// reservation capture is currently in progress for this conversation.
pub fn classify(line: &str, session_active: bool) -> Intent {
    let message = line.trim().to_lowercase();

    // 1. Exact menu/dietary/category keywords bypass everything,
    //    including an active capture session.
    match message.as_str() {
        "menu" => return Intent::FullMenu,
        "vegetarian" => return Intent::DietaryTag("vegetarian"),
        "vegan" => return Intent::DietaryTag("vegan"),
        "gluten-free" | "gluten free" => return Intent::DietaryTag("gluten-free"),
        "appetizers" => return Intent::CategoryListing("Appetizers"),
        "main courses" | "mains" | "entrees" => return Intent::CategoryListing("Main Courses"),
        "desserts" => return Intent::CategoryListing("Desserts"),
        _ => {}
    }

    // 2. Substring `search`: strip the literal word, the remainder is the
    //    query (empty remainder prompts for one).
    if message.contains("search") {
        let query = message.replace("search", "").trim().to_string();
        return if query.is_empty() {
            Intent::Search(None)
        } else {
            Intent::Search(Some(query))
        };
    }

    // 3. An active session captures every remaining turn until it is
    //    completed or cancelled.
    if session_active {
        return Intent::GuidedTurn;
    }

    // 4. Reservation keywords start a new capture session.
    if matches!(message.as_str(), "reserve" | "reservation" | "book") {
        return Intent::StartReservation;
    }

    // 5. Add-dishes follow-up (handled by the host via the action tag).
    if matches!(message.as_str(), "add dishes" | "add dish") {
        return Intent::AddDishes;
    }

    // 6. Help.
    if message == "help" {
        return Intent::Help;
    }

    // 7. Fallback.
    Intent::Fallback
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
