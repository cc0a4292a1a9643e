//! The one response shape the backend is held to.
//!
//! Every list, item and mutation response is `{"data": …}` with optional
//! `message`/`success` fields. Bodies that do not fit are rejected rather than
//! guessed at.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::RealtyError;
use crate::RealtyResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}

/// Bodies that only carry a status line: deletions and error responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiMessage {
    /// The server's explanation, preferring `error` over `message`.
    pub fn text(&self) -> Option<&str> {
        self.error
            .as_deref()
            .or(self.message.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}

pub fn decode_list<T: DeserializeOwned>(body: &str) -> RealtyResult<Vec<T>> {
    decode_envelope::<Vec<T>>(body, "a list")
}

pub fn decode_item<T: DeserializeOwned>(body: &str) -> RealtyResult<T> {
    decode_envelope::<T>(body, "an object")
}

/// Parse a status-only body. An empty body counts as no message.
pub fn decode_message(body: &str) -> RealtyResult<ApiMessage> {
    if body.trim().is_empty() {
        return Ok(ApiMessage::default());
    }
    serde_json::from_str(body)
        .map_err(|e| RealtyError::UnexpectedResponse(format!("expected a message object: {e}")))
}

fn decode_envelope<T: DeserializeOwned>(body: &str, what: &str) -> RealtyResult<T> {
    serde_json::from_str::<Envelope<T>>(body)
        .map(|env| env.data)
        .map_err(|e| {
            RealtyError::UnexpectedResponse(format!("expected {{\"data\": {what}}}: {e}"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Faq;

    #[test]
    fn test_list_in_envelope() {
        let faqs: Vec<Faq> = decode_list(
            r#"{"success":true,"data":[{"_id":"1","question":"q","answer":"a"}],"count":1}"#,
        )
        .unwrap();
        assert_eq!(faqs.len(), 1);
    }

    #[test]
    fn test_bare_array_rejected() {
        let err = decode_list::<Faq>(r#"[{"_id":"1","question":"q","answer":"a"}]"#).unwrap_err();
        assert!(matches!(err, RealtyError::UnexpectedResponse(_)));
    }

    #[test]
    fn test_other_wrapper_rejected() {
        assert!(decode_list::<Faq>(r#"{"items":[]}"#).is_err());
        assert!(decode_list::<Faq>(r#"{"data":{"data":[]}}"#).is_err());
    }

    #[test]
    fn test_item_in_envelope() {
        let faq: Faq = decode_item(r#"{"data":{"_id":"9","question":"q","answer":"a"}}"#).unwrap();
        assert_eq!(faq.id, "9");
    }

    #[test]
    fn test_message_prefers_error() {
        let msg = decode_message(r#"{"message":"Bad request","error":"Email already used"}"#).unwrap();
        assert_eq!(msg.text(), Some("Email already used"));
        assert_eq!(decode_message("").unwrap().text(), None);
    }
}
