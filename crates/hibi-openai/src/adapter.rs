use std::{
    env,
    path::{Path, PathBuf},
    sync::Arc,
};

use hibi_core::{
    error::{HibiError, Result},
    provider::{BoxFuture, TextGenerator},
};
use tracing::{debug, warn};

use crate::{api_v1::ResponsesRequest, client::OpenAiClient, error::OpenAiError};

/// Model used when the builder is given none.
pub const DEFAULT_MODEL: &str = "gpt-5-mini";

/// Environment variable holding the API credential.
const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Thin wrapper that wires the HTTP client [`OpenAiClient`] into a value that
/// implements [`hibi_core::provider::TextGenerator`].
///
/// Think of it as the **service locator** for the OpenAI back-end:
///
/// * stores the resolved API key and target model,
/// * owns a shareable, connection-pooled `reqwest::Client`,
/// * provides a fluent [`OpenAiBackendBuilder`] so callers don’t have to
///   juggle `Option<String>` manually.
///
/// Built once at startup, wrapped in an `Arc` and treated as a read-only
/// dependency from then on.
#[derive(Debug)]
pub struct OpenAiBackend {
    client: Arc<OpenAiClient>,
    model: String,
}

impl TextGenerator for OpenAiBackend {
    fn generate<'a>(
        &'a self,
        instruction: &'a str,
        max_output_tokens: u32,
    ) -> BoxFuture<'a, Result<String>> {
        let client = Arc::clone(&self.client);

        Box::pin(async move {
            let mut request = ResponsesRequest::new(self.model.clone(), instruction);
            request.max_output_tokens = Some(max_output_tokens);

            let response = client.response(request).await.map_err(HibiError::from)?;

            match response.text() {
                Some(text) if !text.trim().is_empty() => Ok(text),
                _ => {
                    warn!(status = response.status(), "response carried no output text");
                    Err(OpenAiError::Format(format!(
                        "no output text in response. status: {}",
                        response.status()
                    ))
                    .into())
                }
            }
        })
    }
}

/// Builder for [`OpenAiBackend`].
///
/// # Typical usage
///
/// ```rust,no_run
/// use hibi_openai::OpenAiBackendBuilder;
///
/// let backend = OpenAiBackendBuilder::new_from_env()
///     .build()
///     .expect("OPENAI_API_KEY must be set");
/// ```
///
/// The builder pattern keeps future options (proxy URL, organisation ID, …)
/// backwards compatible without breaking existing `build()` calls.
#[derive(Default)]
pub struct OpenAiBackendBuilder {
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
}

impl OpenAiBackendBuilder {
    /// Create an *empty* builder. Remember to supply an API key manually.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the credential the way the tool documents it: the
    /// `OPENAI_API_KEY` environment variable first, then the secrets file at
    /// `~/.config/hibi/secrets.json` (key `OPENAI_API_KEY`).
    ///
    /// # Panics
    ///
    /// Never panics. A missing key only surfaces during [`Self::build`].
    pub fn new_from_env() -> Self {
        let api_key = env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.is_empty())
            .or_else(|| secrets_file_path().and_then(|path| load_secret_from(&path)));

        Self {
            api_key,
            model: None,
            base_url: None,
        }
    }

    /// Supply the API key explicitly.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Target a model other than [`DEFAULT_MODEL`].
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Point the client at a non-default API host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Whether a credential was resolved.  Lets the caller decide to run in
    /// degraded mode instead of treating the missing key as fatal.
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Finalise the builder and return a ready-to-use backend.
    ///
    /// # Errors
    ///
    /// * [`HibiError::MissingCredential`] – if no API key was resolved.
    pub fn build(self) -> Result<OpenAiBackend> {
        let api_key = self.api_key.ok_or_else(|| {
            HibiError::MissingCredential(format!(
                "`{API_KEY_VAR}` is not set and no secrets file entry was found"
            ))
        })?;

        let mut client = OpenAiClient::new(api_key);
        if let Some(base) = self.base_url {
            client = client.with_base(base);
        }

        Ok(OpenAiBackend {
            client: Arc::new(client),
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
        })
    }
}

/// `~/.config/hibi/secrets.json`, when a home directory is known.
fn secrets_file_path() -> Option<PathBuf> {
    let home = env::var_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("hibi")
            .join("secrets.json"),
    )
}

/// Read the API key from a JSON secrets file: `{ "OPENAI_API_KEY": "sk-…" }`.
///
/// Any problem (missing file, malformed JSON, absent key) resolves to `None`;
/// a broken secrets file must degrade the tool, not crash it.
fn load_secret_from(path: &Path) -> Option<String> {
    let raw = std::fs::read_to_string(path).ok()?;
    let parsed: serde_json::Value = match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring malformed secrets file");
            return None;
        }
    };

    let key = parsed
        .get(API_KEY_VAR)
        .and_then(serde_json::Value::as_str)
        .filter(|key| !key.is_empty())
        .map(str::to_owned);

    if key.is_some() {
        debug!(path = %path.display(), "loaded API key from secrets file");
    }
    key
}
