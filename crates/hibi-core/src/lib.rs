//! # `hibi-core` – domain logic for the *hibi* days-lived tool
//!
//! Everything that can be computed or composed without touching the network
//! lives here:
//!
//! | Module         | What it provides                                                   |
//! |----------------|--------------------------------------------------------------------|
//! | [`calendar`]   | "Today" in the fixed reference timezone, day/age arithmetic        |
//! | [`composer`]   | The two celebration instruction templates and the composer surface |
//! | [`prompt`]     | Fluent builder for assembling instruction text                     |
//! | [`provider`]   | The [`provider::TextGenerator`] seam backends implement            |
//! | [`error`]      | Unified [`error::HibiError`] and `Result` alias                    |
//!
//! The crate is provider-agnostic: it never names a concrete text-generation
//! service.  A backend crate (e.g. `hibi-openai`) implements
//! [`provider::TextGenerator`] and is injected into
//! [`composer::MessageComposer`] at startup.

pub mod calendar;
pub mod composer;
pub mod error;
pub mod prompt;
pub mod provider;
