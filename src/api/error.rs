/// Error taxonomy for backend calls and the messages users see
use thiserror::Error;

/// Shown for 500/502 responses without a structured detail
pub const BACKEND_DOWN_MESSAGE: &str =
    "Backend may be down. Make sure the backend is running (see README).";

/// Shown when the request never completed
pub const UNREACHABLE_MESSAGE: &str = "Cannot reach the backend. Run: cd backend && ./run.sh";

/// Shown when a 2xx response body was not what we expected
pub const UNEXPECTED_RESPONSE_MESSAGE: &str = "The server returned an unexpected response.";

/// Failure of a single backend call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Non-2xx response, with the backend's `detail` when it sent one
    #[error("server responded with {status}")]
    Server { status: u16, detail: Option<String> },
    /// The request could not complete (connection refused, DNS, timeout...)
    #[error("network error: {0}")]
    Network(String),
    /// A success response whose body could not be understood
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message for the error view
    ///
    /// Structured detail wins; otherwise the canned hints tell "server
    /// reachable but failing" apart from "server unreachable".
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server {
                detail: Some(detail),
                ..
            } => detail.clone(),
            ApiError::Server {
                status: 500 | 502, ..
            } => BACKEND_DOWN_MESSAGE.to_string(),
            ApiError::Server { status, .. } => format!("Server error ({})", status),
            ApiError::Network(_) => UNREACHABLE_MESSAGE.to_string(),
            ApiError::Decode(_) => UNEXPECTED_RESPONSE_MESSAGE.to_string(),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}
