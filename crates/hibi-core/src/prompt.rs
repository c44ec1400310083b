//! Builder-style helper for constructing **instruction text**.
//!
//! Writing multi-line prompt strings inline is tedious and error-prone.
//! `PromptBuilder` offers a fluent API that lets you focus on the *content*
//! instead of the formatting.  Every method returns `self`, enabling
//! call-chaining:
//!
//! ```rust
//! use hibi_core::prompt::PromptBuilder;
//!
//! let text = PromptBuilder::new()
//!     .add_line("You are a gentle message writer.")
//!     .add_blank_line()
//!     .add_key_value("Days lived", 8766)
//!     .add_requirement("At most 200 characters")
//!     .finalize();
//!
//! assert!(text.contains("1. At most 200 characters"));
//! ```
//!
//! The builder performs **no validation** besides `expect`ing that writing to
//! the internal `String` never fails (which it shouldn’t).  It also refrains
//! from smart-formatting to stay predictable — newlines and whitespace are
//! emitted exactly as requested.

use std::fmt::{Display, Write as _};

/// Fluent helper to produce instruction text.
///
/// Internally it owns a `String` buffer that grows with each chained call.
/// Once you’re done, call [`Self::finalize`] to obtain the assembled text.
pub struct PromptBuilder {
    buffer: String,
    requirement_no: u32,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptBuilder {
    /// Create a fresh, empty builder.
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            requirement_no: 0,
        }
    }

    /// Add a plain line of text and a trailing newline.
    pub fn add_line(mut self, line: impl Display) -> Self {
        writeln!(self.buffer, "{line}").expect("failed to write buffer");
        self
    }

    /// Add a key–value fact line: `- Key: Value`
    pub fn add_key_value(mut self, key: impl Display, value: impl Display) -> Self {
        writeln!(self.buffer, "- {key}: {value}").expect("failed to write buffer");
        self
    }

    /// Add the next numbered requirement line (`1.`, `2.`, …).
    ///
    /// Numbering restarts with every builder, so each template owns its own
    /// sequence.
    pub fn add_requirement(mut self, line: impl Display) -> Self {
        self.requirement_no += 1;
        writeln!(self.buffer, "{}. {line}", self.requirement_no).expect("failed to write buffer");
        self
    }

    /// Insert a single blank line.
    pub fn add_blank_line(mut self) -> Self {
        self.buffer.push('\n');
        self
    }

    /// Retrieve the accumulated text and consume the builder.
    pub fn finalize(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requirements_are_numbered_sequentially() {
        let text = PromptBuilder::new()
            .add_requirement("first")
            .add_requirement("second")
            .add_requirement("third")
            .finalize();

        assert_eq!(text, "1. first\n2. second\n3. third\n");
    }

    #[test]
    fn lines_and_facts_are_emitted_verbatim() {
        let text = PromptBuilder::new()
            .add_line("intro")
            .add_blank_line()
            .add_key_value("Days lived", 42)
            .finalize();

        assert_eq!(text, "intro\n\n- Days lived: 42\n");
    }
}
