//! Terminal presentation helpers — colors and small formatting pieces
//! for the chat front-end.
//!
//! Zero external dependencies; raw ANSI escape codes. Respects the
//! `NO_COLOR` environment variable (https://no-color.org/).

use std::sync::OnceLock;

/// Returns `true` if color output is enabled.
/// Disabled when `NO_COLOR` is set (any value) or `TERM=dumb`.
pub fn color_enabled() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| {
        if std::env::var_os("NO_COLOR").is_some() {
            return false;
        }
        if let Ok(term) = std::env::var("TERM") {
            if term == "dumb" {
                return false;
            }
        }
        true
    })
}

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const FG_RED: &str = "\x1b[31m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_CYAN: &str = "\x1b[36m";
const FG_WHITE: &str = "\x1b[37m";

/// Apply an ANSI style to text. Plain text when color is disabled.
fn styled(codes: &[&str], text: &str) -> String {
    if !color_enabled() || codes.is_empty() {
        return text.to_string();
    }
    let prefix: String = codes.iter().copied().collect();
    format!("{}{}{}", prefix, text, RESET)
}

pub fn bold(text: &str) -> String { styled(&[BOLD], text) }
pub fn dim(text: &str) -> String { styled(&[DIM], text) }
pub fn cyan(text: &str) -> String { styled(&[FG_CYAN], text) }
pub fn green(text: &str) -> String { styled(&[FG_GREEN], text) }
pub fn yellow(text: &str) -> String { styled(&[FG_YELLOW], text) }
pub fn red(text: &str) -> String { styled(&[FG_RED], text) }
pub fn bold_cyan(text: &str) -> String { styled(&[BOLD, FG_CYAN], text) }
pub fn bold_white(text: &str) -> String { styled(&[BOLD, FG_WHITE], text) }

/// Compact application banner.
///
/// ```text
/// ▰▰▰ maitred v0.1.0 — restaurant chatbot
/// ```
pub fn banner(name: &str, version: &str, subtitle: &str) -> String {
    format!(
        "{} {} {} {} {}",
        bold_cyan("▰▰▰"),
        bold_white(name),
        dim(version),
        dim("—"),
        dim(subtitle),
    )
}

/// Horizontal rule separating transcript sections.
pub fn rule() -> String {
    dim(&"─".repeat(52))
}

/// Speaker label for a transcript line.
pub fn speaker(name: &str) -> String {
    bold_cyan(name)
}

/// Prompt string for the line editor.
pub fn prompt() -> String {
    if color_enabled() {
        format!("{}{}you{} {} ", BOLD, FG_CYAN, RESET, dim("▸"))
    } else {
        "you ▸ ".to_string()
    }
}

/// Error message styling.
pub fn error(msg: &str) -> String {
    format!("{} {}", styled(&[BOLD, FG_RED], "✗"), red(msg))
}

/// Informational hint styling.
pub fn hint(msg: &str) -> String {
    dim(msg)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styled_empty_codes_is_plain() {
        assert_eq!(styled(&[], "hello"), "hello");
    }

    #[test]
    fn test_styled_keeps_content() {
        let result = styled(&[BOLD, FG_RED], "hello");
        assert!(result.contains("hello"));
    }

    #[test]
    fn test_banner_parts() {
        let b = banner("maitred", "v0.1.0", "restaurant chatbot");
        assert!(b.contains("maitred"));
        assert!(b.contains("v0.1.0"));
        assert!(b.contains("restaurant chatbot"));
    }

    #[test]
    fn test_rule_is_a_rule() {
        assert!(rule().contains("─"));
    }

    #[test]
    fn test_prompt_mentions_speaker() {
        assert!(prompt().contains("you"));
    }

    #[test]
    fn test_error_keeps_message() {
        assert!(error("something broke").contains("something broke"));
    }
}
