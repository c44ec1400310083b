//! The provider seam between the composer and a concrete backend.
//!
//! A **backend** turns a composed instruction into a network call to a
//! text-generation provider (OpenAI, Ollama, …) and returns the generated
//! text.
//!
//! The trait is intentionally minimal:
//!
//! * **One async-ish method** – `generate`, which performs a *single*
//!   non-streaming round-trip.  No retry, no streaming, no tool calls.
//!
//! The method returns a [`Pin<Box<dyn Future>>`] so the trait stays
//! object-safe without pulling in `async_trait` — the composer holds the
//! backend as `Arc<dyn TextGenerator>`.

use std::{future::Future, pin::Pin};

use crate::error::Result;

/// Boxed future alias used by [`TextGenerator`] implementations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A text-generation backend able to answer one instruction with one reply.
pub trait TextGenerator: Send + Sync {
    /// Generate text for `instruction`, producing at most `max_output_tokens`
    /// tokens of output.
    ///
    /// Implementations must map every failure (transport, non-success status,
    /// malformed body) into [`crate::error::HibiError`] — callers rely on the
    /// `Result` being the *only* failure channel.
    fn generate<'a>(
        &'a self,
        instruction: &'a str,
        max_output_tokens: u32,
    ) -> BoxFuture<'a, Result<String>>;
}
