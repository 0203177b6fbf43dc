//! Single-pass hostname text scanner.
//!
//! Splits on `.`, folds case and enforces the label character rules while
//! walking the input once. A single trailing `.` (the fully-qualified form) is
//! accepted and dropped; any other empty label is an error.

use super::error::MalformedReason;
use super::label::{check_size, is_boundary_char, is_label_char, Label, MAX_LABEL_LEN};

/// Parses `text` into a validated, case-folded label sequence.
pub fn parse(text: &str) -> Result<Vec<Label>, MalformedReason> {
    let mut labels = Vec::new();
    let mut buf = String::with_capacity(MAX_LABEL_LEN);
    // Offset at which the label in `buf` started.
    let mut start = 0;

    for (index, c) in text.char_indices() {
        if c == '.' {
            if buf.is_empty() {
                return Err(MalformedReason::EmptyLabel { index });
            }
            labels.push(finish_label(&mut buf, start)?);
            start = index + 1;
            continue;
        }

        if !is_label_char(c) {
            return Err(MalformedReason::InvalidCharacter { ch: c, index });
        }
        if buf.is_empty() && !is_boundary_char(c) {
            return Err(MalformedReason::BadLabelBoundary { index: start });
        }
        if buf.len() == MAX_LABEL_LEN {
            return Err(MalformedReason::LabelTooLong { index: start });
        }
        buf.push(c.to_ascii_lowercase());
    }

    // An empty buffer here means either empty input or a single trailing dot.
    if !buf.is_empty() {
        labels.push(finish_label(&mut buf, start)?);
    }

    check_size(labels.as_slice())?;
    Ok(labels)
}

fn finish_label(buf: &mut String, start: usize) -> Result<Label, MalformedReason> {
    let last = buf.as_bytes()[buf.len() - 1] as char;
    if !is_boundary_char(last) {
        return Err(MalformedReason::BadLabelBoundary { index: start });
    }
    Ok(Label::from_folded(std::mem::take(buf)))
}
