//! OpenAI backend for the *hibi* workspace.
//!
//! Implements [`hibi_core::provider::TextGenerator`] on top of the OpenAI
//! **Responses API** (`POST /v1/responses`).  Non-streaming only: the tool
//! issues one request per interaction and renders the reply in full.
//!
//! Credential resolution follows the tool's startup contract: the
//! `OPENAI_API_KEY` environment variable first, then the platform secrets
//! file — see [`OpenAiBackendBuilder::new_from_env`].

mod adapter;
mod client;

pub mod api_v1;
pub mod error;

pub use adapter::{DEFAULT_MODEL, OpenAiBackend, OpenAiBackendBuilder};
pub use client::OpenAiClient;
