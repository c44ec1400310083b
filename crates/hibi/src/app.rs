//! The interaction controller: one submission in, one rendered outcome out.
//!
//! The controller is a two-state machine — **AwaitingInput** and
//! **ResultsDisplayed** — re-entered from the top on every trigger.  The
//! transition guard lives in [`evaluate`], a pure function over
//! `(today, input)`, so every branch is unit-testable without touching the
//! clock, stdin or the network:
//!
//! 1. missing or unparseable input → validation warning, stay;
//! 2. date before the accepted minimum year or after today → validation
//!    error, stay;
//! 3. otherwise → compute the facts, generate the message, render.
//!
//! Only branch 3 reaches the composer, so no network call can ever be made
//! for invalid input.

use chrono::{Datelike, NaiveDate};
use hibi_core::{
    calendar::{LifeFacts, MIN_BIRTH_YEAR},
    composer::MessageComposer,
};
use tracing::info;

use crate::render;

/// What the user typed, normalised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    /// Blank line — no date supplied.
    Missing,
    /// Text that doesn't parse as a calendar date.
    Invalid(String),
    /// A well-formed calendar date (not yet range-checked).
    Date(NaiveDate),
}

/// Parse one line of user input.  Accepts `YYYY-MM-DD` and `YYYY/MM/DD`.
pub fn parse_input(line: &str) -> DateInput {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return DateInput::Missing;
    }

    for format in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return DateInput::Date(date);
        }
    }
    DateInput::Invalid(trimmed.to_owned())
}

/// Result of the transition guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Recoverable input problem; remain awaiting input.
    Warning(String),
    /// Validation error; remain awaiting input.
    Error(String),
    /// All guards passed; facts ready for generation and rendering.
    Results(LifeFacts),
}

/// The transition guard.  Pure: `today` is injected by the caller.
pub fn evaluate(today: NaiveDate, input: DateInput) -> Outcome {
    match input {
        DateInput::Missing => Outcome::Warning("⚠️ Please enter your birth date".to_owned()),
        DateInput::Invalid(raw) => {
            Outcome::Warning(format!("⚠️ “{raw}” is not a date (use YYYY-MM-DD)"))
        }
        DateInput::Date(date) if date.year() < MIN_BIRTH_YEAR => Outcome::Error(format!(
            "⚠️ Birth dates before {MIN_BIRTH_YEAR} are not accepted"
        )),
        DateInput::Date(date) if date > today => {
            Outcome::Error("⚠️ Future dates cannot be entered".to_owned())
        }
        DateInput::Date(date) => Outcome::Results(LifeFacts::on(today, date)),
    }
}

/// Run one full submission: guard, generate (valid input only), render.
///
/// Returns the text to print; the caller owns stdout.
pub async fn run_submission(composer: &MessageComposer, today: NaiveDate, line: &str) -> String {
    match evaluate(today, parse_input(line)) {
        Outcome::Warning(text) | Outcome::Error(text) => text,
        Outcome::Results(facts) => {
            info!(
                days_lived = facts.days_lived,
                is_anniversary = facts.is_anniversary,
                "input accepted"
            );
            let message = composer.celebrate(&facts).await;
            render::results(&facts, &message)
        }
    }
}
