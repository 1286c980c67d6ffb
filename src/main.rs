use anyhow::Result;
use tracing_subscriber::EnvFilter;

use maitred::assistant::Assistant;
use maitred::catalog::Catalog;
use maitred::chat::format::format_full_menu;
use maitred::chat::{ActionTag, Engine};
use maitred::config::Config;
use maitred::ledger::Ledger;
use maitred::line_editor::{LineEditor, ReadResult};
use maitred::ui;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("maitred=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env();

    let catalog = Catalog::load(&config.menu_path);
    let ledger = Ledger::load(&config.reservations_path);

    let mut engine = Engine::new(catalog, ledger);
    if let Some(ref api_key) = config.api_key {
        engine = engine.with_assistant(Assistant::new(api_key, &config.model_name));
    }

    print_header();
    println!(
        "{} Welcome to our restaurant! I can help you browse the menu, search for dishes,\n\
         {} and make reservations. Type 'help' to see available commands.",
        ui::speaker("bot ▸"),
        ui::speaker("bot ▸"),
    );

    let mut editor = LineEditor::new();

    loop {
        println!();
        let line = match editor.read_line(&ui::prompt()) {
            ReadResult::Line(line) => line,
            ReadResult::Interrupted => continue,
            ReadResult::Eof => {
                print_farewell();
                break;
            }
        };
        let line = line.trim();

        // Empty input is a nudge at the top level, but a real answer
        // during capture (an empty answer keeps a field's default).
        if line.is_empty() && !engine.in_capture() {
            println!("{} I didn't catch that. Could you please try again?", ui::speaker("bot ▸"));
            continue;
        }

        if matches!(line.to_lowercase().as_str(), "exit" | "quit" | "bye") {
            print_farewell();
            break;
        }

        if !line.is_empty() {
            editor.add_history(line);
        }

        let reply = engine.respond(line);
        println!("{} {}", ui::speaker("bot ▸"), reply.text);

        match reply.action {
            Some(ActionTag::MenuFull) => {
                println!("{}", format_full_menu(engine.catalog().document()));
            }
            Some(ActionTag::AddDishes) => {
                run_add_dishes(&mut engine, &mut editor);
            }
            // The engine already prompted for the first capture field.
            Some(ActionTag::Reservation) | None => {}
        }
    }

    Ok(())
}

fn print_header() {
    println!("{}", ui::banner("maitred", concat!("v", env!("CARGO_PKG_VERSION")), "restaurant chatbot"));
    println!("{}", ui::rule());
    println!("{}", ui::hint("Type 'exit' or 'quit' to end the conversation."));
    println!("{}", ui::hint("Type 'menu' to see the full menu."));
    println!("{}", ui::hint("Type 'vegetarian', 'vegan', or 'gluten-free' to see dietary options."));
    println!("{}", ui::hint("Type 'appetizers', 'main courses', or 'desserts' to see specific categories."));
    println!("{}", ui::rule());
}

fn print_farewell() {
    println!("\n{} Thank you for visiting our restaurant. Have a great day!", ui::speaker("bot ▸"));
}

/// Host-side follow-up for the `add_dishes` action tag: ask which
/// reservation, then which dish ids, and apply them via the ledger.
/// The engine never performs this lookup itself.
fn run_add_dishes(engine: &mut Engine, editor: &mut LineEditor) {
    println!("{} Which reservation ID should I add dishes to? (e.g. RES0001)", ui::speaker("bot ▸"));
    let reservation_id = match editor.read_line(&ui::prompt()) {
        ReadResult::Line(line) => line.trim().to_uppercase(),
        _ => return,
    };

    if engine.ledger().get(&reservation_id).is_none() {
        println!(
            "{} I couldn't find a reservation with ID {}.",
            ui::speaker("bot ▸"),
            reservation_id
        );
        return;
    }

    println!(
        "{} Which dish IDs should I add? (comma separated — type 'menu' item IDs, e.g. MAIN001)",
        ui::speaker("bot ▸")
    );
    let dish_line = match editor.read_line(&ui::prompt()) {
        ReadResult::Line(line) => line,
        _ => return,
    };

    let mut added = Vec::new();
    for dish_id in dish_line.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if engine.ledger_mut().add_dish(&reservation_id, dish_id) {
            // Show the dish name when the catalog knows it; unknown ids
            // are still accepted (the ledger never validates them).
            match engine.catalog().item_by_id(dish_id) {
                Some(hit) => added.push(format!("{} ({})", hit.item.name, dish_id)),
                None => added.push(dish_id.to_string()),
            }
        }
    }

    if added.is_empty() {
        println!("{} No dishes were added.", ui::speaker("bot ▸"));
    } else {
        println!(
            "{} Added to {}: {}.",
            ui::speaker("bot ▸"),
            reservation_id,
            added.join(", ")
        );
    }
}
