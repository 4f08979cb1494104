// ============================================================
// Layer 2 — Q&A Input
// ============================================================
// Cleans the raw strings handed over by the CLI before they
// reach the tokenizer. Text pasted from transcripts, PDFs or
// Word documents is full of:
//   - non-breaking spaces (U+00A0) and zero-width spaces (U+200B)
//   - byte order marks (U+FEFF)
//   - tabs, carriage returns, other control characters
//   - runs of spaces and blank lines
//
// The tokenizer would mostly cope, but an input consisting
// only of such characters must be recognised as empty here,
// before any model work is done.

use crate::domain::error::{QaError, QaResult};

/// A validated question/context pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QaInput {
    pub question: String,
    pub context:  String,
}

impl QaInput {
    /// Clean both strings and reject a missing question.
    ///
    /// An empty context is accepted; the caller decides what
    /// an answer over nothing looks like.
    pub fn new(question: &str, context: &str) -> QaResult<Self> {
        let question = clean(question);
        if question.is_empty() {
            return Err(QaError::MissingQuestion);
        }
        Ok(Self { question, context: clean(context) })
    }

    pub fn has_context(&self) -> bool {
        !self.context.is_empty()
    }
}

/// Collapse every whitespace-like or control character run into a
/// single space and trim both ends.
pub fn clean(text: &str) -> String {
    let mut out        = String::with_capacity(text.len());
    let mut last_space = true; // swallows leading spaces

    for c in text.chars() {
        let c = match c {
            '\u{00A0}' | '\u{200B}' | '\u{FEFF}' => ' ',
            c if c.is_control() || c.is_whitespace() => ' ',
            c => c,
        };
        if c == ' ' {
            if !last_space {
                out.push(' ');
            }
            last_space = true;
        } else {
            out.push(c);
            last_space = false;
        }
    }

    if out.ends_with(' ') {
        out.pop();
    }
    out
}
