use thiserror::Error;

/// Ways a submission can fail, split by where the failure is shown.
///
/// `Validation`, `MalformedResponse` and `Network` surface as a banner below
/// the input box and leave the transcript untouched. `Service` is an answer
/// from the backend and renders as an assistant bubble inside the transcript.
/// The `Display` text of each variant is exactly what the user sees.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    /// Input rejected locally; the request was never sent.
    #[error("{0}")]
    Validation(&'static str),

    /// The service answered but explicitly reported failure.
    #[error("{0}. Please try again.")]
    Service(String),

    /// The service answered with a body that is not in the expected shape.
    #[error("Received invalid response from server.")]
    MalformedResponse,

    /// The request never completed (connection refused, reset, DNS).
    #[error("Network error. Please try again.")]
    Network,
}

impl SubmitError {
    /// True when the failure belongs in the banner below the input rather
    /// than inside the transcript.
    pub fn is_banner(&self) -> bool {
        !matches!(self, SubmitError::Service(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_displays_the_reason_verbatim() {
        let err = SubmitError::Validation("Kindly enter your query.");
        assert_eq!(err.to_string(), "Kindly enter your query.");
    }

    #[test]
    fn service_error_appends_retry_prompt() {
        let err = SubmitError::Service("no matching size".into());
        assert_eq!(err.to_string(), "no matching size. Please try again.");
    }

    #[test]
    fn malformed_response_message() {
        assert_eq!(
            SubmitError::MalformedResponse.to_string(),
            "Received invalid response from server."
        );
    }

    #[test]
    fn network_message() {
        assert_eq!(
            SubmitError::Network.to_string(),
            "Network error. Please try again."
        );
    }

    #[test]
    fn only_service_errors_render_inside_the_transcript() {
        assert!(SubmitError::Validation("x").is_banner());
        assert!(SubmitError::MalformedResponse.is_banner());
        assert!(SubmitError::Network.is_banner());
        assert!(!SubmitError::Service("down".into()).is_banner());
    }
}
