//! Negotiation sessions

mod legacy;
mod negotiation;
mod transport_events;
mod types;

pub use negotiation::NegotiationSession;
pub use types::{CandidateBatchOutcome, NegotiationPhase, SessionId};
