//! Transport engine adapter surface
//!
//! The negotiation core never establishes media itself. It drives a transport
//! engine through [`TransportAdapter`] and learns about candidates,
//! connectivity and remote media through [`TransportEvent`]s the engine sends
//! on the channel it was constructed with.
//!
//! ```text
//! NegotiationSession ──create_offer / set_*_description / add_ice_candidate──> TransportAdapter
//!        ^                                                                          │
//!        └──────────── mpsc<TransportEvent> (candidates, connectivity, media) ──────┘
//! ```

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::candidate::Candidate;
use crate::config::{OfferOptions, TransportConfig};
use crate::description::SessionDescription;
use crate::errors::TransportError;
use crate::media::MediaStream;

/// ICE connectivity state reported by the transport engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectivityState {
    New,
    Checking,
    Connected,
    Completed,
    Disconnected,
    Failed,
    Closed,
}

impl fmt::Display for ConnectivityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::Checking => write!(f, "checking"),
            Self::Connected => write!(f, "connected"),
            Self::Completed => write!(f, "completed"),
            Self::Disconnected => write!(f, "disconnected"),
            Self::Failed => write!(f, "failed"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// Callbacks from the transport engine
#[derive(Debug, Clone)]
pub enum TransportEvent {
    /// A local candidate was gathered; `None` marks the end of gathering
    CandidateDiscovered(Option<Candidate>),

    /// The ICE connectivity state changed
    ConnectivityStateChanged(ConnectivityState),

    /// The remote peer's media arrived
    RemoteMediaReceived(Arc<dyn MediaStream>),
}

/// Sending half handed to the transport engine at construction
pub type TransportEventSender = mpsc::Sender<TransportEvent>;

/// Capability surface of a transport engine
#[async_trait]
pub trait TransportAdapter: Send + Sync {
    /// Synthesize an offer
    async fn create_offer(
        &self,
        options: &OfferOptions,
    ) -> Result<SessionDescription, TransportError>;

    /// Synthesize an answer to the applied remote offer
    async fn create_answer(
        &self,
        constraints: &OfferOptions,
    ) -> Result<SessionDescription, TransportError>;

    async fn set_local_description(
        &self,
        description: &SessionDescription,
    ) -> Result<(), TransportError>;

    async fn set_remote_description(
        &self,
        description: &SessionDescription,
    ) -> Result<(), TransportError>;

    async fn add_ice_candidate(&self, candidate: &Candidate) -> Result<(), TransportError>;

    /// Attach local captured media
    fn add_local_media(&self, stream: Arc<dyn MediaStream>) -> Result<(), TransportError>;

    fn connectivity_state(&self) -> ConnectivityState;

    async fn close(&self) -> Result<(), TransportError>;
}

/// Builds transport engines for sessions
#[async_trait]
pub trait TransportFactory: Send + Sync {
    /// Construct an engine that reports its callbacks on `events`
    async fn create_transport(
        &self,
        config: TransportConfig,
        events: TransportEventSender,
    ) -> Result<Box<dyn TransportAdapter>, TransportError>;
}
