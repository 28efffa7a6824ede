//! Wire types for the survey API.
//!
//! These types mirror the hosted API's contract: the closed set of endpoint
//! paths and the `{results, error}` envelope every response arrives in.
//! Field names are snake_case on the wire; the mapping is carried by the
//! `serde` derives on each type, so it is checked at compile time.

use std::fmt;

use serde::Deserialize;

// ─────────────────────────────────────────────────────────────────────────────
// Paths
// ─────────────────────────────────────────────────────────────────────────────

/// Endpoint identifiers for the survey API.
///
/// The API serves a known, closed set of POST endpoints; each variant
/// renders to the path suffix that is joined onto the configured host to
/// form the request URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Path {
    /// Survey targeting: resolves which survey (if any) to embed for the
    /// submitted user context.
    SurveyEmbed,
    /// Records that a survey was displayed to the user.
    SurveyDisplayed {
        /// Identifier of the displayed survey.
        survey_id: String,
    },
    /// Records that the user dismissed a survey.
    SurveyDismiss {
        /// Identifier of the dismissed survey.
        survey_id: String,
    },
}

impl Path {
    /// The endpoint suffix, with its leading slash.
    pub fn as_path(&self) -> String {
        match self {
            Path::SurveyEmbed => "/surveys/embed".to_string(),
            Path::SurveyDisplayed { survey_id } => format!("/surveys/{survey_id}/displayed"),
            Path::SurveyDismiss { survey_id } => format!("/surveys/{survey_id}/dismiss"),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_path())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Response Envelope
// ─────────────────────────────────────────────────────────────────────────────

/// Wire envelope wrapping every survey API response.
///
/// The API reports failures in-band: a decoded envelope's `error` is
/// inspected before `results`, and the HTTP status code is never consulted.
/// Keys absent from the body decode the same as explicit `null`.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    /// Decoded payload, when the call produced one.
    #[serde(default)]
    pub results: Option<T>,
    /// Server-reported error message.
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        some_field: i64,
    }

    #[test]
    fn test_embed_path() {
        assert_eq!(Path::SurveyEmbed.as_path(), "/surveys/embed");
    }

    #[test]
    fn test_displayed_path() {
        let path = Path::SurveyDisplayed {
            survey_id: "abc123".to_string(),
        };
        assert_eq!(path.as_path(), "/surveys/abc123/displayed");
    }

    #[test]
    fn test_dismiss_path() {
        let path = Path::SurveyDismiss {
            survey_id: "abc123".to_string(),
        };
        assert_eq!(path.as_path(), "/surveys/abc123/dismiss");
    }

    #[test]
    fn test_path_display_matches_as_path() {
        assert_eq!(Path::SurveyEmbed.to_string(), "/surveys/embed");
    }

    #[test]
    fn test_envelope_with_results() {
        let envelope: Envelope<Payload> =
            serde_json::from_str(r#"{"results": {"some_field": 1}, "error": null}"#).unwrap();
        assert_eq!(envelope.results, Some(Payload { some_field: 1 }));
        assert_eq!(envelope.error, None);
    }

    #[test]
    fn test_envelope_with_error() {
        let envelope: Envelope<Payload> =
            serde_json::from_str(r#"{"results": null, "error": "bad input"}"#).unwrap();
        assert_eq!(envelope.results, None);
        assert_eq!(envelope.error.as_deref(), Some("bad input"));
    }

    #[test]
    fn test_envelope_missing_keys_decode_as_null() {
        let envelope: Envelope<Payload> = serde_json::from_str("{}").unwrap();
        assert_eq!(envelope.results, None);
        assert_eq!(envelope.error, None);
    }

    #[test]
    fn test_envelope_tolerates_unknown_keys() {
        let envelope: Envelope<Payload> =
            serde_json::from_str(r#"{"results": {"some_field": 2}, "error": null, "meta": {}}"#)
                .unwrap();
        assert_eq!(envelope.results, Some(Payload { some_field: 2 }));
    }

    #[test]
    fn test_envelope_rejects_mismatched_payload() {
        let result: std::result::Result<Envelope<Payload>, _> =
            serde_json::from_str(r#"{"results": {"some_field": "one"}, "error": null}"#);
        assert!(result.is_err());
    }
}
