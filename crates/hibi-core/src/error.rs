//! Unified error type exposed by **`hibi-core`**.
//!
//! Backend crates should convert their internal errors into one of these
//! variants before bubbling them up to the
//! [`MessageComposer`](crate::composer::MessageComposer).  This keeps the
//! public API small while still conveying rich diagnostic information.

use thiserror::Error;

/// Convenient alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, HibiError>;

#[derive(Debug, Error)]
pub enum HibiError {
    /// No API credential could be resolved from the environment or the
    /// secrets file; the backend stays unconfigured.
    ///
    /// Input validation (future date, pre-minimum date, unparseable text) is
    /// *not* an error here — the interaction layer reports it as a rendered
    /// message and re-prompts.
    #[error("missing credential: {0}")]
    MissingCredential(String),

    /// Generic forwarding of any backend-specific error that doesn’t fit
    /// another category.
    #[error("backend returned an error: {0}")]
    Backend(Box<dyn std::error::Error + Send + Sync + 'static>),
}
