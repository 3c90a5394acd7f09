//! Error types for negotiation sessions

use std::fmt;

use thiserror::Error;

use crate::adapter::ConnectivityState;
use crate::description::SdpType;

/// Result type for negotiation operations
pub type Result<T> = std::result::Result<T, NegotiationError>;

/// Which side a description was being applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionTarget {
    Local,
    Remote,
}

impl fmt::Display for DescriptionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DescriptionTarget::Local => write!(f, "local"),
            DescriptionTarget::Remote => write!(f, "remote"),
        }
    }
}

/// Failure reported by a transport engine adapter
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors that can occur while negotiating a session
///
/// Only [`NegotiationError::ConnectivityFailure`] is a session failure; every
/// other variant is reported to the call site that caused it and leaves the
/// session phase untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NegotiationError {
    /// Offer or answer generation failed
    #[error("Failed to create {kind} description: {reason}")]
    Synthesis { kind: SdpType, reason: String },

    /// Local or remote description rejected by the transport
    #[error("Failed to set {target} description: {reason}")]
    Apply {
        target: DescriptionTarget,
        reason: String,
    },

    /// A single remote candidate was rejected
    #[error("Failed to add ICE candidate '{candidate}': {reason}")]
    Candidate { candidate: String, reason: String },

    /// The transport reported a terminal connectivity state
    #[error("Session {session_id} connectivity failed (state: {state})")]
    ConnectivityFailure {
        session_id: String,
        state: ConnectivityState,
    },

    /// Operation needs a transport but `initialize` has not run
    #[error("Session {session_id} is not initialized")]
    NotInitialized { session_id: String },

    /// `initialize` called on a session that already has a transport
    #[error("Session {session_id} is already initialized")]
    AlreadyInitialized { session_id: String },

    /// Operation attempted on a closed session
    #[error("Session {session_id} is closed")]
    SessionClosed { session_id: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Transport construction or media attachment failed
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

impl NegotiationError {
    /// Create a synthesis error
    pub fn synthesis(kind: SdpType, source: TransportError) -> Self {
        Self::Synthesis {
            kind,
            reason: source.message,
        }
    }

    /// Create an apply error
    pub fn apply(target: DescriptionTarget, source: TransportError) -> Self {
        Self::Apply {
            target,
            reason: source.message,
        }
    }

    /// Create a candidate error
    pub fn candidate(candidate: impl Into<String>, source: TransportError) -> Self {
        Self::Candidate {
            candidate: candidate.into(),
            reason: source.message,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether this error ends the session rather than a single call
    pub fn is_session_failure(&self) -> bool {
        matches!(self, NegotiationError::ConnectivityFailure { .. })
    }
}
