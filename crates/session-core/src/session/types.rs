//! Session identity, phases and call outcomes

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::NegotiationError;

/// Session ID type
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A random, uuid-based id for callers without a session factory
    pub fn generate() -> Self {
        Self(format!("RTC-{}", uuid::Uuid::new_v4()))
    }

    /// Id for the `n`th session of a factory
    pub fn from_sequence(n: u64) -> Self {
        Self(format!("RTC{}", n))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Negotiation phase of a session
///
/// ```text
/// Idle → Initialized → OfferCreated | AnswerCreated | ProvisionalAnswerCreated
///      → LocalApplied → RemoteApplied → Connected | Disconnected | Failed → Closed
/// ```
///
/// The phase records the most recent negotiation step, so an answerer that
/// applies the remote offer first ends up in `LocalApplied` once its answer is
/// applied. `Closed` is terminal and reachable from every phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NegotiationPhase {
    Idle,
    Initialized,
    OfferCreated,
    AnswerCreated,
    ProvisionalAnswerCreated,
    LocalApplied,
    RemoteApplied,
    Connected,
    Disconnected,
    Failed,
    Closed,
}

impl NegotiationPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, NegotiationPhase::Closed)
    }
}

impl fmt::Display for NegotiationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Initialized => "initialized",
            Self::OfferCreated => "offer-created",
            Self::AnswerCreated => "answer-created",
            Self::ProvisionalAnswerCreated => "pranswer-created",
            Self::LocalApplied => "local-applied",
            Self::RemoteApplied => "remote-applied",
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
            Self::Failed => "failed",
            Self::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// What happened to a batch of remote candidates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateBatchOutcome {
    /// Remote description not applied yet; the batch was queued
    Buffered {
        /// Candidates queued by this call
        queued: usize,
        /// Candidates waiting in the buffer afterwards
        pending: usize,
    },

    /// Each candidate was handed to the transport
    Forwarded {
        accepted: usize,
        /// One `NegotiationError::Candidate` per rejected candidate
        failures: Vec<NegotiationError>,
    },
}

impl CandidateBatchOutcome {
    pub(crate) fn nothing_forwarded() -> Self {
        CandidateBatchOutcome::Forwarded {
            accepted: 0,
            failures: Vec::new(),
        }
    }

    pub fn failures(&self) -> &[NegotiationError] {
        match self {
            CandidateBatchOutcome::Forwarded { failures, .. } => failures,
            CandidateBatchOutcome::Buffered { .. } => &[],
        }
    }
}
