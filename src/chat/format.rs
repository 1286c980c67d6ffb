//! Response Formatter — renders catalog and reservation query results
//! into plain-text blocks for the transcript.
//!
//! One display invariant holds everywhere: prices are rendered with a
//! dollar sign and exactly two decimal places.

use crate::catalog::{CategorizedItem, MenuDocument, MenuItem};
use crate::ledger::Reservation;

/// Format a list of menu items under a title.
///
/// An empty list yields exactly `"No <title> found."` with the title
/// lower-cased and no item blocks.
pub fn format_items(items: &[CategorizedItem], title: &str) -> String {
    if items.is_empty() {
        return format!("No {} found.", title.to_lowercase());
    }

    let mut out = format!("\n{}:\n{}\n", title, "-".repeat(40));
    for entry in items {
        push_item_block(&mut out, &entry.item);
    }
    out
}

/// Format the whole menu document, nested per category under a
/// date-stamped heading.
pub fn format_full_menu(menu: &MenuDocument) -> String {
    let date = if menu.date.is_empty() { "Today" } else { &menu.date };
    let mut out = format!("\nToday's Menu ({}):\n{}\n", date, "=".repeat(40));

    for category in &menu.categories {
        out.push_str(&format!("\n{}:\n{}\n", category.name, "-".repeat(40)));
        for item in &category.items {
            push_item_block(&mut out, item);
        }
    }
    out
}

/// One-line confirmation summary for a freshly created reservation.
pub fn format_reservation(reservation: &Reservation) -> String {
    format!(
        "Reservation confirmed for {} {} on {} at {} under the name {}. Your reservation ID is {}.",
        reservation.party_size,
        if reservation.party_size == 1 { "person" } else { "people" },
        reservation.date,
        reservation.time,
        reservation.customer_name,
        reservation.id,
    )
}

fn push_item_block(out: &mut String, item: &MenuItem) {
    out.push_str(&format!("{} - ${:.2}\n", item.name, item.price));
    out.push_str(&format!("  {}\n", item.description));
    if !item.dietary_info.is_empty() {
        out.push_str(&format!("  Dietary info: {}\n", item.dietary_info.join(", ")));
    }
    out.push_str(&format!("  Item ID: {}\n\n", item.id));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
