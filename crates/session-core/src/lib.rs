//! Offer/answer negotiation for a single peer-to-peer media session
//!
//! A [`NegotiationSession`] drives a transport engine through the
//! offer/answer/provisional-answer model. It sequences description synthesis,
//! local and remote apply, and candidate exchange, buffering remote candidates
//! until the remote description is in place, and rewrites outgoing answers to
//! carry the legacy `ssrc`/`msid` stream identity scheme when asked to.
//!
//! The engine itself (media capture, ICE checks, DTLS/SRTP) and the signaling
//! channel are supplied by the application through the [`adapter`] traits and
//! the [`events::SessionEventHandler`].
//!
//! ## Architecture
//!
//! ```text
//!  application ──create_offer / create_answer / apply_remote_description──> NegotiationSession
//!       ^                                                                      │       │
//!       │                                              rtcpeer-sdp-core rewrites       │
//!       │                                                                              v
//!  SessionEventHandler <── process_next_event <── mpsc<TransportEvent> <── TransportAdapter
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use rtcpeer_session_core::prelude::*;
//!
//! let factory = SessionFactory::new(Arc::new(MyEngineFactory), SessionConfig::default().with_legacy_identity(true))?
//!     .with_handler(Arc::new(MySignaling::new()));
//!
//! let mut session = factory.create_session();
//! session.initialize(None).await?;
//! session.apply_remote_description(remote_offer).await?;
//! let answer = session.create_answer().await?;
//! signaling.send(answer).await?;
//!
//! while let Some(event) = session.process_next_event().await {
//!     // candidates and connectivity changes reach MySignaling through the handler
//! }
//! session.close(false).await;
//! ```

pub mod adapter;
pub mod candidate;
pub mod config;
pub mod description;
pub mod errors;
pub mod events;
pub mod factory;
pub mod logging;
pub mod media;
pub mod session;

pub use adapter::{
    ConnectivityState, TransportAdapter, TransportEvent, TransportEventSender, TransportFactory,
};
pub use candidate::{filter_local_candidate, Candidate, CandidateDecision, CandidateTransport};
pub use config::{
    BundlePolicy, CandidatePolicy, IceConfig, IceServer, IceTransportPolicy, LegacyIdentityConfig,
    OfferOptions, RtcpMuxPolicy, SessionConfig, TransportConfig,
};
pub use description::{SdpType, SessionDescription};
pub use errors::{DescriptionTarget, NegotiationError, Result, TransportError};
pub use events::{LoggingEventHandler, SessionEvent, SessionEventHandler};
pub use factory::SessionFactory;
pub use logging::{parse_log_level, setup_logging, LoggingConfig};
pub use media::MediaStream;
pub use session::{CandidateBatchOutcome, NegotiationPhase, NegotiationSession, SessionId};

/// Re-export of common types and functions
pub mod prelude {
    pub use super::{
        Candidate, CandidateBatchOutcome, ConnectivityState, IceConfig, IceServer, MediaStream,
        NegotiationError, NegotiationPhase, NegotiationSession, Result, SdpType, SessionConfig,
        SessionDescription, SessionEvent, SessionEventHandler, SessionFactory, SessionId,
        TransportAdapter, TransportError, TransportEvent, TransportFactory,
    };
}
