//! Session event handling
//!
//! Transport callbacks are turned into [`SessionEvent`]s by the session and
//! reported to a [`SessionEventHandler`]. Every handler method has a default
//! that only logs, so an application overrides just what it cares about,
//! typically [`on_local_candidate`](SessionEventHandler::on_local_candidate)
//! to ship candidates over its signaling channel.
//!
//! # Usage Examples
//!
//! ```rust
//! use rtcpeer_session_core::candidate::Candidate;
//! use rtcpeer_session_core::events::SessionEventHandler;
//! use rtcpeer_session_core::session::SessionId;
//! use async_trait::async_trait;
//! use tokio::sync::mpsc;
//!
//! struct SignalingForwarder {
//!     outbound: mpsc::UnboundedSender<Candidate>,
//! }
//!
//! #[async_trait]
//! impl SessionEventHandler for SignalingForwarder {
//!     async fn on_local_candidate(&self, _session_id: &SessionId, candidate: &Candidate) {
//!         let _ = self.outbound.send(candidate.clone());
//!     }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::adapter::ConnectivityState;
use crate::candidate::Candidate;
use crate::errors::NegotiationError;
use crate::media::MediaStream;
use crate::session::{NegotiationPhase, SessionId};

/// What a processed transport event amounted to
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A local candidate passed the filter and was handed to the handler
    LocalCandidate(Candidate),

    /// A local candidate on the non-preferred transport was dropped
    CandidateSuppressed(Candidate),

    /// Local candidate gathering finished
    EndOfCandidates,

    /// Connectivity changed; `phase` is the session phase afterwards
    ConnectivityChanged {
        state: ConnectivityState,
        phase: NegotiationPhase,
    },

    /// Connectivity failed for good; the session is in the `Failed` phase
    Failed(NegotiationError),

    /// Remote media arrived and was recorded on the session
    RemoteMedia(Arc<dyn MediaStream>),

    /// The event arrived too early or after close and changed nothing
    Ignored,
}

/// Handler for session events
#[async_trait]
pub trait SessionEventHandler: Send + Sync {
    /// A local candidate should be sent to the remote peer
    async fn on_local_candidate(&self, session_id: &SessionId, candidate: &Candidate) {
        debug!("Session {} local candidate: {}", session_id, candidate.candidate);
    }

    async fn on_connectivity_state_changed(
        &self,
        session_id: &SessionId,
        state: ConnectivityState,
    ) {
        debug!("Session {} ICE connectivity state: {}", session_id, state);
    }

    /// Connectivity failed; the caller decides whether to close and retry with a new session
    async fn on_session_failed(&self, session_id: &SessionId, error: &NegotiationError) {
        error!("Session {} failed: {}", session_id, error);
    }

    async fn on_remote_media(&self, session_id: &SessionId, stream: Arc<dyn MediaStream>) {
        info!("Session {} received remote stream {}", session_id, stream.id());
    }

    /// A single remote candidate was rejected by the transport
    async fn on_candidate_error(&self, session_id: &SessionId, error: &NegotiationError) {
        warn!("Session {} {}", session_id, error);
    }

    async fn on_closed(&self, session_id: &SessionId) {
        info!("Session {} closed", session_id);
    }
}

/// Handler that only logs
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingEventHandler;

#[async_trait]
impl SessionEventHandler for LoggingEventHandler {}
