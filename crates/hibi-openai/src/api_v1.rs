//! Wire types for OpenAI's **Responses API** (`/v1/responses`).
//!
//! Only the non-streaming variant is modelled: one `POST` with a
//! [`ResponsesRequest`], one [`ResponsesResponse`] back.  The upstream schema
//! changes frequently, so the response keeps loosely-typed
//! [`serde_json::Value`] fields (`output`, flattened `extra`) rather than
//! coupling the crate tightly to the exact shape of the day.  The one piece
//! we genuinely depend on — the generated text — is recovered by
//! [`ResponsesResponse::text`], which walks the typical output shapes
//! best-effort.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for `POST /v1/responses`.
///
/// The tool always sends free-form text via `input`; chat-style message
/// arrays are not needed here.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ResponsesRequest {
    /// Model identifier (e.g. "gpt-5-mini").
    pub model: String,

    /// Free-form instruction text.
    pub input: String,

    /// Upper bound on generated output, including any reasoning tokens the
    /// model spends before the visible text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,

    /// Arbitrary pass-through fields, for forward compatibility while the
    /// upstream schema iterates.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ResponsesRequest {
    pub fn new(model: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            input: input.into(),
            max_output_tokens: None,
            extra: Default::default(),
        }
    }
}

/// Non-streaming Responses API object.
///
/// Every field is optional so that upstream additions or omissions never turn
/// into a deserialization failure — the caller decides what "no usable text"
/// means.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ResponsesResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Lifecycle status ("completed", "incomplete", "failed", …).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Structured output items (shape is model/feature dependent).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,

    /// Convenience field some server versions include alongside `output`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_text: Option<String>,

    /// Additional fields we don't explicitly model.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ResponsesResponse {
    /// Concatenated generated text, if the response carries any.
    ///
    /// Prefers the top-level `output_text` convenience field; otherwise walks
    /// the `output` items.  Two item shapes are handled:
    ///
    /// * message items: `{ "type": "message", "content": [ { "type":
    ///   "output_text", "text": "…" }, … ] }`
    /// * bare text blocks: `{ "type": "output_text", "text": "…" }`
    ///
    /// Returns `None` when no text could be recovered (e.g. a response that
    /// only contains reasoning items).
    pub fn text(&self) -> Option<String> {
        if let Some(text) = &self.output_text
            && !text.is_empty()
        {
            return Some(text.clone());
        }

        let items = self.output.as_ref()?.as_array()?;
        let mut buf = String::new();
        for item in items {
            collect_text_blocks(item, &mut buf);
        }

        if buf.is_empty() { None } else { Some(buf) }
    }

    /// Lifecycle status for diagnostics, `"unknown"` when absent.
    pub fn status(&self) -> &str {
        self.status.as_deref().unwrap_or("unknown")
    }
}

fn collect_text_blocks(item: &Value, buf: &mut String) {
    let Some(obj) = item.as_object() else { return };

    match obj.get("type").and_then(Value::as_str) {
        Some("output_text") | None => {
            if let Some(text) = obj.get("text").and_then(Value::as_str) {
                buf.push_str(text);
            }
        }
        Some("message") => {
            if let Some(content) = obj.get("content").and_then(Value::as_array) {
                for block in content {
                    collect_text_blocks(block, buf);
                }
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serialises_only_the_set_fields() {
        let mut req = ResponsesRequest::new("gpt-5-mini", "say hi");
        req.max_output_tokens = Some(2000);

        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(
            body,
            json!({
                "model": "gpt-5-mini",
                "input": "say hi",
                "max_output_tokens": 2000,
            })
        );
    }

    #[test]
    fn deserialises_a_representative_completed_response() {
        let resp: ResponsesResponse = serde_json::from_value(json!({
            "id": "resp_123",
            "object": "response",
            "created_at": 1_710_000_000,
            "status": "completed",
            "model": "gpt-5-mini",
            "output": [
                { "type": "reasoning", "summary": [] },
                {
                    "type": "message",
                    "role": "assistant",
                    "content": [
                        { "type": "output_text", "text": "Happy day " },
                        { "type": "output_text", "text": "8766! 🎉" }
                    ]
                }
            ],
            "usage": { "input_tokens": 120, "output_tokens": 45 }
        }))
        .unwrap();

        assert_eq!(resp.status(), "completed");
        assert_eq!(resp.text().as_deref(), Some("Happy day 8766! 🎉"));
    }

    #[test]
    fn bare_text_blocks_and_convenience_field_are_honoured() {
        let bare: ResponsesResponse = serde_json::from_value(json!({
            "output": [ { "type": "output_text", "text": "hello" } ]
        }))
        .unwrap();
        assert_eq!(bare.text().as_deref(), Some("hello"));

        let convenient: ResponsesResponse = serde_json::from_value(json!({
            "output_text": "direct"
        }))
        .unwrap();
        assert_eq!(convenient.text().as_deref(), Some("direct"));
    }

    #[test]
    fn text_free_response_reports_no_output_and_its_status() {
        let resp: ResponsesResponse = serde_json::from_value(json!({
            "status": "incomplete",
            "output": [ { "type": "reasoning", "summary": [] } ]
        }))
        .unwrap();

        assert_eq!(resp.text(), None);
        assert_eq!(resp.status(), "incomplete");

        let empty = ResponsesResponse::default();
        assert_eq!(empty.text(), None);
        assert_eq!(empty.status(), "unknown");
    }
}
