//! Composes the celebration instruction and drives the one backend call.
//!
//! This is the only place in the workspace with an external side effect: at
//! most **one** outbound request per interaction, and none at all when no
//! backend is configured.  Whatever happens, the composer returns a plain
//! `String` — generated text on success, a fixed warning when the backend is
//! unavailable, or a diagnostic with a fixed prefix when the call fails.
//! Errors never escape this boundary.
//!
//! Two mutually exclusive templates exist: the **anniversary** instruction
//! (knows the age, asks for birthday congratulations) and the **ordinary-day**
//! instruction (day count only, asks the model to vary its phrasing between
//! calls so repeated runs don't read alike).

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    calendar::LifeFacts,
    prompt::PromptBuilder,
    provider::TextGenerator,
};

/// Returned verbatim whenever no backend is configured.
pub const UNAVAILABLE_WARNING: &str =
    "⚠️ The OpenAI API is unavailable. Set OPENAI_API_KEY to enable message generation.";

/// Every failure string starts with this prefix, followed by the cause.
pub const DIAGNOSTIC_PREFIX: &str = "⚠️ Message generation failed: ";

/// Upper bound passed to the backend; generous to leave room for reasoning
/// tokens on models that spend them before emitting text.
pub const MAX_OUTPUT_TOKENS: u32 = 2_000;

/// Persona line shared by both templates.
const PERSONA: &str =
    "You are a kind expert message writer with a gift for lifting people's spirits.";

/// Builds the instruction and performs the single backend round-trip.
///
/// Constructed once at startup with an optional backend and treated as a
/// read-only dependency thereafter — no ambient global client handle.
pub struct MessageComposer {
    backend: Option<Arc<dyn TextGenerator>>,
}

impl MessageComposer {
    /// Create a composer delegating to `backend`.
    pub fn new(backend: Arc<dyn TextGenerator>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Create a composer with no backend; [`Self::celebrate`] always returns
    /// [`UNAVAILABLE_WARNING`] without attempting a network call.
    pub fn unavailable() -> Self {
        Self { backend: None }
    }

    /// Whether a backend is configured.
    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    /// Produce the celebratory message for `facts`.
    ///
    /// Exactly one request is issued, with no retry.  The returned string is
    /// one of:
    ///
    /// * the trimmed generated text,
    /// * [`UNAVAILABLE_WARNING`] when no backend is configured,
    /// * a [`DIAGNOSTIC_PREFIX`]-prefixed string embedding the failure cause.
    pub async fn celebrate(&self, facts: &LifeFacts) -> String {
        let Some(backend) = &self.backend else {
            return UNAVAILABLE_WARNING.to_owned();
        };

        let instruction = compose_instruction(facts);
        debug!(
            days_lived = facts.days_lived,
            is_anniversary = facts.is_anniversary,
            instruction_len = instruction.len(),
            "requesting celebration message"
        );

        match backend.generate(&instruction, MAX_OUTPUT_TOKENS).await {
            Ok(text) => text.trim().to_owned(),
            Err(err) => {
                warn!(error = %err, "message generation failed");
                format!("{DIAGNOSTIC_PREFIX}{err}")
            }
        }
    }
}

/// Select and render the instruction template for `facts`.
pub(crate) fn compose_instruction(facts: &LifeFacts) -> String {
    match facts.age_years.filter(|_| facts.is_anniversary) {
        Some(age) => anniversary_instruction(facts.days_lived, age),
        None => ordinary_instruction(facts.days_lived),
    }
}

fn anniversary_instruction(days_lived: i64, age: i32) -> String {
    PromptBuilder::new()
        .add_line(PERSONA)
        .add_blank_line()
        .add_line("You are a gentle, warm-hearted message writer.")
        .add_line("Today this person celebrates their birthday; write them a special congratulatory message.")
        .add_blank_line()
        .add_line("Facts:")
        .add_key_value("Age reached today", format!("{age}"))
        .add_key_value("Days lived so far", format!("{days_lived}"))
        .add_blank_line()
        .add_line("Write the message to these requirements:")
        .add_requirement("Open with heartfelt birthday congratulations")
        .add_requirement("Keep a gentle, cosy tone")
        .add_requirement("Leave the reader feeling glad to be alive and that their life is worthwhile")
        .add_requirement(format!("Convey the weight of those {days_lived} days"))
        .add_requirement("At most 200 characters")
        .add_requirement("Decorate lightly with emoji (🎂🎉✨ and the like)")
        .finalize()
}

fn ordinary_instruction(days_lived: i64) -> String {
    PromptBuilder::new()
        .add_line(PERSONA)
        .add_blank_line()
        .add_line("You are a gentle, warm-hearted message writer.")
        .add_line(format!(
            "Write a celebratory message for someone who has lived {days_lived} days."
        ))
        .add_blank_line()
        .add_line("Write the message to these requirements:")
        .add_requirement("Keep a gentle, cosy tone")
        .add_requirement("Leave the reader feeling glad to be alive and that their life is worthwhile")
        .add_requirement(format!("Convey the weight of those {days_lived} days"))
        .add_requirement("Positive and heart-warming")
        .add_requirement("At most 200 characters")
        .add_requirement("Decorate lightly with emoji (✨🌸💖 and the like)")
        .add_requirement("Use fresh wording each time; avoid strings of similar phrasings")
        .finalize()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::{
        error::HibiError,
        provider::BoxFuture,
    };

    /// Scripted backend: returns a canned outcome and counts invocations.
    struct StubBackend {
        reply: crate::error::Result<String>,
        calls: AtomicUsize,
    }

    impl StubBackend {
        fn ok(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_owned()),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(detail: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(HibiError::Backend(detail.to_owned().into())),
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl TextGenerator for StubBackend {
        fn generate<'a>(
            &'a self,
            _instruction: &'a str,
            _max_output_tokens: u32,
        ) -> BoxFuture<'a, crate::error::Result<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let reply = match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(err) => Err(HibiError::Backend(err.to_string().into())),
            };
            Box::pin(async move { reply })
        }
    }

    fn ordinary_facts() -> LifeFacts {
        LifeFacts {
            days_lived: 8766,
            is_anniversary: false,
            age_years: None,
        }
    }

    fn anniversary_facts() -> LifeFacts {
        LifeFacts {
            days_lived: 8766,
            is_anniversary: true,
            age_years: Some(24),
        }
    }

    #[tokio::test]
    async fn unavailable_composer_returns_warning_without_calling_out() {
        let composer = MessageComposer::unavailable();
        assert!(!composer.is_available());
        assert_eq!(composer.celebrate(&ordinary_facts()).await, UNAVAILABLE_WARNING);
        assert_eq!(
            composer.celebrate(&anniversary_facts()).await,
            UNAVAILABLE_WARNING
        );
    }

    #[tokio::test]
    async fn success_returns_trimmed_text_after_exactly_one_call() {
        let backend = StubBackend::ok("  Happy 8766 days! ✨  \n");
        let composer = MessageComposer::new(backend.clone());

        let message = composer.celebrate(&ordinary_facts()).await;

        assert_eq!(message, "Happy 8766 days! ✨");
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failure_is_reported_with_the_diagnostic_prefix() {
        let backend = StubBackend::failing("connection reset");
        let composer = MessageComposer::new(backend.clone());

        let message = composer.celebrate(&ordinary_facts()).await;

        assert!(message.starts_with(DIAGNOSTIC_PREFIX), "got: {message}");
        assert!(message.contains("connection reset"));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn anniversary_template_mentions_age_and_birthday() {
        let instruction = compose_instruction(&anniversary_facts());
        assert!(instruction.contains("birthday"));
        assert!(instruction.contains("Age reached today: 24"));
        assert!(instruction.contains("Days lived so far: 8766"));
        assert!(!instruction.contains("fresh wording"));
    }

    #[test]
    fn ordinary_template_asks_for_varied_phrasing_and_omits_age() {
        let instruction = compose_instruction(&ordinary_facts());
        assert!(instruction.contains("lived 8766 days"));
        assert!(instruction.contains("fresh wording"));
        assert!(!instruction.contains("birthday"));
        assert!(!instruction.contains("Age reached"));
    }

    #[test]
    fn both_templates_cap_length_at_two_hundred_characters() {
        for facts in [ordinary_facts(), anniversary_facts()] {
            assert!(compose_instruction(&facts).contains("At most 200 characters"));
        }
    }
}
