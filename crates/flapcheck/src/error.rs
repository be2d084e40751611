//! Errors raised at collaborator seams. Scoring itself is total and never errors.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classified upstream failure, derived from an HTTP-like status code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpstreamErrorKind {
    InvalidKey,
    RateLimit,
    ServerError,
    Unknown,
}

impl UpstreamErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => UpstreamErrorKind::InvalidKey,
            429 => UpstreamErrorKind::RateLimit,
            500..=599 => UpstreamErrorKind::ServerError,
            _ => UpstreamErrorKind::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UpstreamErrorKind::InvalidKey => "invalid_key",
            UpstreamErrorKind::RateLimit => "rate_limit",
            UpstreamErrorKind::ServerError => "server_error",
            UpstreamErrorKind::Unknown => "unknown",
        }
    }

    /// Rate limits and server errors are worth retrying by the caller.
    pub fn is_transient(self) -> bool {
        matches!(
            self,
            UpstreamErrorKind::RateLimit | UpstreamErrorKind::ServerError
        )
    }
}

impl fmt::Display for UpstreamErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a `SourceRepository` fetch.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("source fetch failed ({kind}): {detail}")]
    Upstream {
        kind: UpstreamErrorKind,
        detail: String,
    },
    #[error("malformed source record {id}: {reason}")]
    Malformed { id: String, reason: String },
}

impl RepositoryError {
    pub fn upstream(status: u16, detail: impl Into<String>) -> Self {
        RepositoryError::Upstream {
            kind: UpstreamErrorKind::from_status(status),
            detail: detail.into(),
        }
    }

    pub fn kind(&self) -> Option<UpstreamErrorKind> {
        match self {
            RepositoryError::Upstream { kind, .. } => Some(*kind),
            RepositoryError::Malformed { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert_eq!(UpstreamErrorKind::from_status(401), UpstreamErrorKind::InvalidKey);
        assert_eq!(UpstreamErrorKind::from_status(403), UpstreamErrorKind::InvalidKey);
        assert_eq!(UpstreamErrorKind::from_status(429), UpstreamErrorKind::RateLimit);
        assert_eq!(UpstreamErrorKind::from_status(500), UpstreamErrorKind::ServerError);
        assert_eq!(UpstreamErrorKind::from_status(503), UpstreamErrorKind::ServerError);
        assert_eq!(UpstreamErrorKind::from_status(404), UpstreamErrorKind::Unknown);
        assert!(UpstreamErrorKind::RateLimit.is_transient());
        assert!(!UpstreamErrorKind::InvalidKey.is_transient());
    }

    #[test]
    fn messages_carry_kind_and_detail() {
        let e = RepositoryError::upstream(429, "slow down");
        assert_eq!(e.kind(), Some(UpstreamErrorKind::RateLimit));
        assert_eq!(e.to_string(), "source fetch failed (rate_limit): slow down");
        let m = RepositoryError::Malformed {
            id: "s1".into(),
            reason: "missing title".into(),
        };
        assert_eq!(m.kind(), None);
        assert_eq!(m.to_string(), "malformed source record s1: missing title");
    }
}
