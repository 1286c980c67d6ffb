//! One-shot labeled form — a single line carrying all five reservation
//! fields via inline labels, e.g.
//!
//! ```text
//! Name: Jane Doe, Contact: jane@x.com, Date: 2025-01-10, Time: 18:30, Party: 3
//! ```
//!
//! Labels are matched case-insensitively and may appear in any order, but
//! extraction always uses each label's first occurrence. A field value is
//! the text between its label and the next comma (or end of line). The
//! form is accepted at any step of a guided capture.

/// All five fields extracted from a labeled line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineForm {
    pub name: String,
    pub contact: String,
    pub date: String,
    pub time: String,
    pub party_size: u32,
}

/// Result of trying to read a line as a labeled form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormParse {
    /// At least one label is missing — this line is not a form at all and
    /// should fall through to the step-by-step handler.
    NotAForm,
    /// All labels present but a value failed extraction or parsing; the
    /// caller should issue a format correction and leave state untouched.
    Invalid,
    Parsed(InlineForm),
}

const LABELS: [&str; 5] = ["name:", "contact:", "date:", "time:", "party:"];

/// Try to read `line` as a one-shot labeled form.
pub fn parse_labeled_form(line: &str) -> FormParse {
    // ASCII lowercasing keeps byte offsets aligned with the original
    // line, so label positions found here index into `line` directly.
    let lowered = line.to_ascii_lowercase();

    let mut positions = [0usize; 5];
    for (i, label) in LABELS.iter().enumerate() {
        match lowered.find(label) {
            Some(pos) => positions[i] = pos,
            None => return FormParse::NotAForm,
        }
    }

    let mut values: [&str; 5] = [""; 5];
    for (i, label) in LABELS.iter().enumerate() {
        let start = positions[i] + label.len();
        let rest = &line[start..];
        let value = match rest.find(',') {
            Some(comma) => &rest[..comma],
            None => rest,
        };
        let value = value.trim();
        if value.is_empty() {
            return FormParse::Invalid;
        }
        values[i] = value;
    }

    let party_size = match values[4].parse::<i64>() {
        Ok(n) if n >= 1 => n as u32,
        _ => return FormParse::Invalid,
    };

    FormParse::Parsed(InlineForm {
        name: values[0].to_string(),
        contact: values[1].to_string(),
        date: values[2].to_string(),
        time: values[3].to_string(),
        party_size,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
