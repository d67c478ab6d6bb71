use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::SubmitError;

#[derive(Serialize)]
struct FittingRequest<'a> {
    text: &'a str,
}

/// Structured recommendation returned by the fitting service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Recommendation {
    pub recommendation: String,
    pub reasoning: Option<String>,
    pub fit_tips: Option<String>,
    pub identified_issues: Option<Vec<String>>,
    pub confidence: Option<f64>,
}

/// The two body shapes the service produces. The error shape is tried
/// first: a body carrying `error` is a rejection even if other fields are
/// also present.
#[derive(Deserialize)]
#[serde(untagged)]
enum FittingReply {
    Error { error: String },
    Success(Recommendation),
}

/// Reconciles a raw response body into a recommendation or a failure.
/// Anything that is not valid JSON in one of the two expected shapes counts
/// as a malformed response.
pub fn interpret_body(body: &str) -> Result<Recommendation, SubmitError> {
    match serde_json::from_str::<FittingReply>(body) {
        Ok(FittingReply::Error { error }) => Err(SubmitError::Service(error)),
        Ok(FittingReply::Success(reply)) => Ok(reply),
        Err(_) => Err(SubmitError::MalformedResponse),
    }
}

#[derive(Clone)]
pub struct FittingClient {
    client: Client,
    base_url: String,
}

impl FittingClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Sends the query text verbatim and interprets the reply. Suspends
    /// until the transport resolves; there is no timeout and no retry.
    pub async fn recommend(&self, text: &str) -> Result<Recommendation, SubmitError> {
        let url = format!("{}/api/bra-fitting", self.base_url);
        let request = FittingRequest { text };

        let response = match self.client.post(&url).json(&request).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "fitting request did not complete");
                return Err(SubmitError::Network);
            }
        };

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read fitting response body");
                return Err(SubmitError::Network);
            }
        };

        interpret_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_body_with_all_fields() {
        let body = r#"{
            "recommendation": "Try a 34B",
            "reasoning": "Band rides up when too large",
            "fit_tips": "Scoop and swoop when putting the bra on",
            "identified_issues": ["band_riding_up", "straps_falling"],
            "confidence": 0.82
        }"#;
        let reply = interpret_body(body).unwrap();
        assert_eq!(reply.recommendation, "Try a 34B");
        assert_eq!(reply.reasoning.as_deref(), Some("Band rides up when too large"));
        assert_eq!(
            reply.identified_issues,
            Some(vec!["band_riding_up".to_string(), "straps_falling".to_string()])
        );
        assert_eq!(reply.confidence, Some(0.82));
    }

    #[test]
    fn success_body_with_only_the_recommendation() {
        let reply = interpret_body(r#"{"recommendation": "Try a 36C"}"#).unwrap();
        assert_eq!(reply.recommendation, "Try a 36C");
        assert_eq!(reply.reasoning, None);
        assert_eq!(reply.fit_tips, None);
        assert_eq!(reply.identified_issues, None);
        assert_eq!(reply.confidence, None);
    }

    #[test]
    fn error_body_is_a_service_error() {
        let err = interpret_body(r#"{"error": "no matching size"}"#).unwrap_err();
        assert_eq!(err, SubmitError::Service("no matching size".into()));
    }

    #[test]
    fn error_field_wins_over_success_fields() {
        let body = r#"{"error": "degraded", "recommendation": "Try a 34B"}"#;
        let err = interpret_body(body).unwrap_err();
        assert_eq!(err, SubmitError::Service("degraded".into()));
    }

    #[test]
    fn invalid_json_is_malformed() {
        assert_eq!(
            interpret_body("<html>502 Bad Gateway</html>"),
            Err(SubmitError::MalformedResponse)
        );
        assert_eq!(interpret_body(""), Err(SubmitError::MalformedResponse));
    }

    #[test]
    fn valid_json_in_an_unexpected_shape_is_malformed() {
        assert_eq!(interpret_body("42"), Err(SubmitError::MalformedResponse));
        assert_eq!(interpret_body("{}"), Err(SubmitError::MalformedResponse));
        assert_eq!(
            interpret_body(r#"{"size": "34B"}"#),
            Err(SubmitError::MalformedResponse)
        );
    }
}
