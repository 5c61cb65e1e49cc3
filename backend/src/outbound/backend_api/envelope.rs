//! Response envelope shared by every backend endpoint.
//!
//! The backend wraps all payloads in `{ isSuccess, message, messageAr,
//! data, errors, statusCode, timestamp }`. The backend is not always
//! well-behaved: empty and non-JSON bodies do occur, and this module
//! normalises them into synthetic failure envelopes so callers only ever
//! see one shape.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Longest body excerpt quoted in a synthetic failure.
const PREVIEW_CHAR_LIMIT: usize = 160;

/// Decoded backend envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    #[serde(default)]
    pub is_success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub message_ar: String,
    #[serde(default = "default_data")]
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub status_code: u16,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

fn default_data<T>() -> Option<T> {
    None
}

/// Failure half of a normalised envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeRejection {
    pub status: u16,
    pub message: String,
    pub errors: Vec<String>,
}

impl<T> Envelope<T> {
    /// Synthetic failure for an empty response body.
    pub fn empty_body(http_status: u16) -> Self {
        Self {
            is_success: false,
            message: "Our servers are temporarily unavailable. Please try again in a few moments."
                .to_owned(),
            message_ar: "الخادم أرجع استجابة فارغة".to_owned(),
            data: None,
            errors: vec![format!("HTTP {http_status}: Empty response body")],
            status_code: http_status,
            timestamp: Some(Utc::now()),
        }
    }

    /// Synthetic failure for a body that is not valid JSON.
    pub fn invalid_json(http_status: u16, body: &[u8]) -> Self {
        Self {
            is_success: false,
            message: "We're experiencing technical difficulties. Please try again later."
                .to_owned(),
            message_ar: "استجابة JSON غير صالحة من الخادم".to_owned(),
            data: None,
            errors: vec![format!("Invalid JSON: {}", body_preview(body))],
            status_code: http_status,
            timestamp: Some(Utc::now()),
        }
    }

    /// Effective status: the envelope's own code, or the HTTP status when
    /// the envelope omitted one.
    pub fn effective_status(&self, http_status: u16) -> u16 {
        if self.status_code == 0 {
            http_status
        } else {
            self.status_code
        }
    }

    /// Split into payload or rejection.
    ///
    /// A successful envelope may legitimately carry no `data`; callers
    /// decide whether `None` is acceptable for their endpoint.
    pub fn into_result(self, http_status: u16) -> Result<Option<T>, EnvelopeRejection> {
        let status = self.effective_status(http_status);
        if self.is_success {
            return Ok(self.data);
        }
        tracing::debug!(
            status,
            message_ar = %self.message_ar,
            timestamp = ?self.timestamp,
            "backend envelope rejected"
        );
        let message = if self.message.trim().is_empty() {
            format!("backend request failed with status {status}")
        } else {
            self.message
        };
        Err(EnvelopeRejection {
            status,
            message,
            errors: self.errors,
        })
    }
}

/// Decode a raw response body into an envelope, substituting synthetic
/// failures for empty or malformed bodies.
pub fn decode_envelope<T: DeserializeOwned>(http_status: u16, body: &[u8]) -> Envelope<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Envelope::empty_body(http_status);
    }
    match serde_json::from_slice(body) {
        Ok(envelope) => envelope,
        Err(_) => Envelope::invalid_json(http_status, body),
    }
}

/// Whitespace-collapsed excerpt of a response body, for error context.
pub fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn decodes_a_success_envelope() {
        let body = br#"{
            "isSuccess": true,
            "message": "ok",
            "messageAr": "",
            "data": {"value": 7},
            "errors": [],
            "statusCode": 200,
            "timestamp": "2026-08-30T10:00:00Z"
        }"#;
        let envelope: Envelope<serde_json::Value> = decode_envelope(200, body);
        let data = envelope.into_result(200).expect("success").expect("data");
        assert_eq!(data["value"], 7);
    }

    #[test]
    fn missing_fields_default_to_a_failure_shape() {
        let envelope: Envelope<serde_json::Value> = decode_envelope(200, br"{}");
        let rejection = envelope.into_result(200).expect_err("no isSuccess flag");
        assert_eq!(rejection.status, 200);
        assert!(rejection.message.contains("status 200"));
    }

    #[rstest]
    #[case(b"" as &[u8])]
    #[case(b"   \n  ")]
    fn empty_body_becomes_a_synthetic_failure(#[case] body: &[u8]) {
        let envelope: Envelope<()> = decode_envelope(502, body);
        let rejection = envelope.into_result(502).expect_err("synthetic failure");
        assert_eq!(rejection.status, 502);
        assert_eq!(
            rejection.errors,
            vec!["HTTP 502: Empty response body".to_owned()]
        );
        assert_eq!(
            rejection.message,
            "Our servers are temporarily unavailable. Please try again in a few moments."
        );
    }

    #[test]
    fn non_json_body_quotes_a_truncated_preview() {
        let body = "<html>".repeat(100);
        let envelope: Envelope<()> = decode_envelope(500, body.as_bytes());
        let rejection = envelope.into_result(500).expect_err("synthetic failure");
        assert_eq!(
            rejection.message,
            "We're experiencing technical difficulties. Please try again later."
        );
        let detail = &rejection.errors[0];
        assert!(detail.starts_with("Invalid JSON: <html>"));
        assert!(detail.ends_with("..."));
    }

    #[test]
    fn envelope_status_zero_falls_back_to_http_status() {
        let envelope: Envelope<()> = decode_envelope(
            404,
            br#"{"isSuccess": false, "message": "missing", "statusCode": 0}"#,
        );
        assert_eq!(envelope.effective_status(404), 404);
    }

    #[test]
    fn success_without_data_is_not_an_error() {
        let envelope: Envelope<()> =
            decode_envelope(200, br#"{"isSuccess": true, "message": "done"}"#);
        assert_eq!(envelope.into_result(200), Ok(None));
    }

    #[test]
    fn preview_collapses_whitespace() {
        assert_eq!(body_preview(b"a \n  b\tc"), "a b c");
    }
}
