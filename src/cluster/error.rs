// ABOUTME: Cluster API error with SNAFU pattern.
// ABOUTME: Exposes an error kind so callers classify without string matching.

use snafu::Snafu;

/// Unified error for cluster API calls.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ClusterError {
    /// The API accepted the request but rejected it with a coded error.
    #[snafu(display("cluster API error {code}: {message}"))]
    Api { code: String, message: String },

    /// The request never produced a well-formed API response.
    #[snafu(display("transport error calling {action}: {message}"))]
    Transport { action: String, message: String },

    /// The API answered with something we could not decode.
    #[snafu(display("unexpected response from {action}: {message}"))]
    InvalidResponse { action: String, message: String },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterErrorKind {
    /// The named service does not exist on the cluster.
    ServiceNotFound,
    /// The named service exists but is not in an active state.
    ServiceNotActive,
    /// The requested task is unknown to the cluster.
    TaskNotFound,
    /// The API rejected the request for validation reasons.
    Validation,
    /// Any other coded API failure.
    Api,
    /// Network-level failure.
    Transport,
    /// Undecodable response.
    InvalidResponse,
}

impl ClusterError {
    /// Returns the error kind for programmatic handling.
    ///
    /// The upsert path dispatches on this: update falls back to create on
    /// `ServiceNotFound` / `ServiceNotActive` and nothing else.
    pub fn kind(&self) -> ClusterErrorKind {
        match self {
            ClusterError::Api { code, .. } => match code.as_str() {
                "ServiceNotFoundException" => ClusterErrorKind::ServiceNotFound,
                "ServiceNotActiveException" => ClusterErrorKind::ServiceNotActive,
                "TaskNotFoundException" => ClusterErrorKind::TaskNotFound,
                "ValidationException" | "ClientException" => ClusterErrorKind::Validation,
                _ => ClusterErrorKind::Api,
            },
            ClusterError::Transport { .. } => ClusterErrorKind::Transport,
            ClusterError::InvalidResponse { .. } => ClusterErrorKind::InvalidResponse,
        }
    }

    /// Convenience constructor for fakes and error mapping.
    pub fn api(code: impl Into<String>, message: impl Into<String>) -> Self {
        ClusterError::Api {
            code: code.into(),
            message: message.into(),
        }
    }
}
