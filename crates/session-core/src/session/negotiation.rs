//! The negotiation state machine
//!
//! A [`NegotiationSession`] owns one transport engine and sequences
//! description synthesis, local and remote apply, and candidate exchange.
//! Every operation is an `async fn` on `&mut self`; callers must not start a
//! second mutating operation before the first one completed.

use std::sync::Arc;

use rtcpeer_sdp_core::{normalize_transport_profile, replace_direction, MediaDirection};
use tokio::sync::mpsc;
use tracing::{debug, error, info, trace, warn};

use super::legacy::{normalize_stream_identity, preserve_stream_labels};
use super::types::{CandidateBatchOutcome, NegotiationPhase, SessionId};
use crate::adapter::{ConnectivityState, TransportAdapter, TransportEvent, TransportFactory};
use crate::candidate::Candidate;
use crate::config::{IceConfig, SessionConfig};
use crate::description::{SdpType, SessionDescription};
use crate::errors::{DescriptionTarget, NegotiationError, Result};
use crate::events::SessionEventHandler;
use crate::media::MediaStream;

/// One peer session
pub struct NegotiationSession {
    pub(super) id: SessionId,
    pub(super) config: SessionConfig,
    pub(super) phase: NegotiationPhase,
    transport_factory: Arc<dyn TransportFactory>,
    pub(super) handler: Arc<dyn SessionEventHandler>,
    transport: Option<Box<dyn TransportAdapter>>,
    pub(super) events_rx: Option<mpsc::Receiver<TransportEvent>>,
    local_description: Option<SessionDescription>,
    outbound_description: Option<SessionDescription>,
    remote_description: Option<SessionDescription>,
    remote_applied: bool,
    pending_remote_candidates: Vec<Candidate>,
    local_media: Vec<Arc<dyn MediaStream>>,
    pub(super) remote_media: Option<Arc<dyn MediaStream>>,
    pub(super) closed: bool,
}

impl std::fmt::Debug for NegotiationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NegotiationSession")
            .field("id", &self.id)
            .field("phase", &self.phase)
            .field("remote_applied", &self.remote_applied)
            .field("pending_remote_candidates", &self.pending_remote_candidates.len())
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl NegotiationSession {
    pub fn new(
        id: SessionId,
        config: SessionConfig,
        transport_factory: Arc<dyn TransportFactory>,
        handler: Arc<dyn SessionEventHandler>,
    ) -> Self {
        debug!("Created session {}", id);
        Self {
            id,
            config,
            phase: NegotiationPhase::Idle,
            transport_factory,
            handler,
            transport: None,
            events_rx: None,
            local_description: None,
            outbound_description: None,
            remote_description: None,
            remote_applied: false,
            pending_remote_candidates: Vec::new(),
            local_media: Vec::new(),
            remote_media: None,
            closed: false,
        }
    }

    /// Build the transport engine
    ///
    /// `ice` overrides the ICE section of the session configuration. Media
    /// multiplexing and max-bundle are forced on whatever it says. A closed
    /// session ignores the call.
    pub async fn initialize(&mut self, ice: Option<IceConfig>) -> Result<()> {
        if self.closed {
            debug!("Session {} is closed, ignoring initialize", self.id);
            return Ok(());
        }
        if self.transport.is_some() {
            return Err(NegotiationError::AlreadyInitialized {
                session_id: self.id.to_string(),
            });
        }

        let ice = ice.or_else(|| self.config.ice.clone()).unwrap_or_default();
        let transport_config = ice.to_transport_config();
        debug!("Session {} transport config: {:?}", self.id, transport_config);

        let (events_tx, events_rx) = mpsc::channel(self.config.event_channel_capacity.max(1));
        let transport = self
            .transport_factory
            .create_transport(transport_config, events_tx)
            .await?;

        self.transport = Some(transport);
        self.events_rx = Some(events_rx);
        self.transition(NegotiationPhase::Initialized);
        info!("Session {} initialized", self.id);
        Ok(())
    }

    /// Hand local captured media to the transport engine
    pub fn attach_local_media(&mut self, stream: Arc<dyn MediaStream>) -> Result<()> {
        self.transport()?.add_local_media(stream.clone())?;
        debug!("Session {} attached local stream {}", self.id, stream.id());
        self.local_media.push(stream);
        Ok(())
    }

    /// Synthesize an offer and apply it locally
    pub async fn create_offer(&mut self) -> Result<SessionDescription> {
        let offer = self
            .transport()?
            .create_offer(&self.config.offer_options)
            .await
            .map_err(|e| NegotiationError::synthesis(SdpType::Offer, e))?;
        debug!("Session {} synthesized offer:\n{}", self.id, offer.sdp());

        self.apply_local(offer.with_kind(SdpType::Offer), false).await
    }

    /// Synthesize an answer to the applied remote offer and apply it locally
    ///
    /// With legacy identity enabled the answer is rewritten twice: once before
    /// the local apply, keeping the labels the engine produced, and once after
    /// it, pinning the configured constants. The second rewrite is what gets
    /// returned and sent.
    pub async fn create_answer(&mut self) -> Result<SessionDescription> {
        let synthesized = self.synthesize_answer(SdpType::Answer).await?;
        let legacy = self.config.legacy_identity.enabled;

        let answer = if legacy {
            let rewritten = preserve_stream_labels(synthesized.sdp(), &self.config.legacy_identity);
            trace!("Session {} answer after label pass:\n{}", self.id, rewritten);
            SessionDescription::answer(rewritten)
        } else {
            synthesized.with_kind(SdpType::Answer)
        };

        self.apply_local(answer, legacy).await
    }

    /// Synthesize a provisional answer with every `recvonly` turned `inactive`
    pub async fn create_provisional_answer(&mut self) -> Result<SessionDescription> {
        let synthesized = self.synthesize_answer(SdpType::ProvisionalAnswer).await?;
        let body = replace_direction(
            synthesized.sdp(),
            MediaDirection::RecvOnly,
            MediaDirection::Inactive,
        );

        self.apply_local(SessionDescription::provisional_answer(body), true).await
    }

    /// Apply the remote description, then flush buffered candidates
    ///
    /// On failure the buffer is left as it was so the caller can retry.
    pub async fn apply_remote_description(
        &mut self,
        description: SessionDescription,
    ) -> Result<CandidateBatchOutcome> {
        let normalized = description.with_sdp(normalize_transport_profile(description.sdp()));
        trace!("Session {} applying remote {}:\n{}", self.id, normalized.kind(), normalized.sdp());

        if let Err(e) = self.transport()?.set_remote_description(&normalized).await {
            let error = NegotiationError::apply(DescriptionTarget::Remote, e);
            warn!("Session {} {}", self.id, error);
            return Err(error);
        }

        self.remote_applied = true;
        self.remote_description = Some(normalized);
        self.transition(NegotiationPhase::RemoteApplied);

        let pending = std::mem::take(&mut self.pending_remote_candidates);
        if pending.is_empty() {
            return Ok(CandidateBatchOutcome::nothing_forwarded());
        }

        debug!("Session {} flushing {} buffered remote candidates", self.id, pending.len());
        self.forward_candidates(pending).await
    }

    /// Add remote candidates, buffering them until the remote description is applied
    pub async fn add_remote_candidates<I>(&mut self, candidates: I) -> Result<CandidateBatchOutcome>
    where
        I: IntoIterator<Item = Candidate>,
    {
        if self.closed {
            return Err(self.closed_error());
        }

        if !self.remote_applied {
            let before = self.pending_remote_candidates.len();
            self.pending_remote_candidates.extend(candidates);
            let pending = self.pending_remote_candidates.len();
            debug!(
                "Session {} buffered {} remote candidates ({} pending)",
                self.id,
                pending - before,
                pending
            );
            return Ok(CandidateBatchOutcome::Buffered {
                queued: pending - before,
                pending,
            });
        }

        self.forward_candidates(candidates.into_iter().collect()).await
    }

    pub async fn add_remote_candidate(
        &mut self,
        candidate: Candidate,
    ) -> Result<CandidateBatchOutcome> {
        self.add_remote_candidates(std::iter::once(candidate)).await
    }

    /// Tear the session down
    ///
    /// Stops the remote stream's tracks and closes the transport engine.
    /// Local media stays with its owner. Errors from the engine are logged,
    /// the session ends up closed regardless, and later calls do nothing.
    pub async fn close(&mut self, preserve_local_media: bool) {
        if self.closed {
            debug!("Session {} already closed", self.id);
            return;
        }

        info!("Closing session {}", self.id);
        self.closed = true;

        if let Some(transport) = self.transport.take() {
            if let Err(e) = transport.close().await {
                error!("Session {} error closing transport: {}", self.id, e);
            }
        }
        self.events_rx = None;

        if let Some(remote) = self.remote_media.take() {
            debug!("Session {} stopping remote stream {}", self.id, remote.id());
            remote.stop_tracks();
        }

        if !self.local_media.is_empty() {
            debug!(
                "Session {} leaving {} local stream(s) to the caller (preserve_local_media: {})",
                self.id,
                self.local_media.len(),
                preserve_local_media
            );
        }

        if !self.pending_remote_candidates.is_empty() {
            debug!(
                "Session {} dropping {} buffered remote candidates",
                self.id,
                self.pending_remote_candidates.len()
            );
            self.pending_remote_candidates.clear();
        }

        debug!("Session {} phase: {:?} -> {:?}", self.id, self.phase, NegotiationPhase::Closed);
        self.phase = NegotiationPhase::Closed;
        self.handler.on_closed(&self.id).await;
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn phase(&self) -> NegotiationPhase {
        self.phase
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_remote_applied(&self) -> bool {
        self.remote_applied
    }

    /// The description the transport engine accepted as local description
    pub fn local_description(&self) -> Option<&SessionDescription> {
        self.local_description.as_ref()
    }

    /// The description last returned for sending to the remote peer
    pub fn outbound_description(&self) -> Option<&SessionDescription> {
        self.outbound_description.as_ref()
    }

    /// The remote description as applied, after transport normalization
    pub fn remote_description(&self) -> Option<&SessionDescription> {
        self.remote_description.as_ref()
    }

    pub fn pending_candidate_count(&self) -> usize {
        self.pending_remote_candidates.len()
    }

    pub fn local_media(&self) -> &[Arc<dyn MediaStream>] {
        &self.local_media
    }

    pub fn remote_media(&self) -> Option<&Arc<dyn MediaStream>> {
        self.remote_media.as_ref()
    }

    /// Current engine state, `None` without a transport
    pub fn connectivity_state(&self) -> Option<ConnectivityState> {
        self.transport.as_deref().map(|transport| transport.connectivity_state())
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub(super) fn transition(&mut self, next: NegotiationPhase) {
        if self.phase.is_terminal() {
            trace!("Session {} is closed, ignoring transition to {:?}", self.id, next);
            return;
        }
        if self.phase != next {
            debug!("Session {} phase: {:?} -> {:?}", self.id, self.phase, next);
            self.phase = next;
        }
    }

    fn closed_error(&self) -> NegotiationError {
        NegotiationError::SessionClosed {
            session_id: self.id.to_string(),
        }
    }

    fn transport(&self) -> Result<&dyn TransportAdapter> {
        if self.closed {
            return Err(self.closed_error());
        }
        self.transport
            .as_deref()
            .ok_or_else(|| NegotiationError::NotInitialized {
                session_id: self.id.to_string(),
            })
    }

    async fn synthesize_answer(&self, kind: SdpType) -> Result<SessionDescription> {
        let answer = self
            .transport()?
            .create_answer(&self.config.offer_options)
            .await
            .map_err(|e| NegotiationError::synthesis(kind, e))?;
        debug!("Session {} synthesized {}:\n{}", self.id, kind, answer.sdp());
        Ok(answer)
    }

    /// Apply `description` locally and record it; `normalize` runs the
    /// post-apply identity rewrite on what is returned
    async fn apply_local(
        &mut self,
        description: SessionDescription,
        normalize: bool,
    ) -> Result<SessionDescription> {
        if let Err(e) = self.transport()?.set_local_description(&description).await {
            let error = NegotiationError::apply(DescriptionTarget::Local, e);
            warn!("Session {} {}", self.id, error);
            return Err(error);
        }

        let created = match description.kind() {
            SdpType::Offer => NegotiationPhase::OfferCreated,
            SdpType::Answer => NegotiationPhase::AnswerCreated,
            SdpType::ProvisionalAnswer => NegotiationPhase::ProvisionalAnswerCreated,
        };
        self.transition(created);
        self.transition(NegotiationPhase::LocalApplied);

        let outbound = if normalize {
            let body = normalize_stream_identity(description.sdp(), &self.config.legacy_identity);
            trace!("Session {} outbound {}:\n{}", self.id, description.kind(), body);
            description.with_sdp(body)
        } else {
            description.clone()
        };

        self.local_description = Some(description);
        self.outbound_description = Some(outbound.clone());
        Ok(outbound)
    }

    /// Hand candidates to the engine one by one; a rejection does not stop the batch
    async fn forward_candidates(
        &self,
        candidates: Vec<Candidate>,
    ) -> Result<CandidateBatchOutcome> {
        let transport = self.transport()?;
        let mut accepted = 0;
        let mut failures = Vec::new();

        for candidate in candidates {
            match transport.add_ice_candidate(&candidate).await {
                Ok(()) => {
                    trace!("Session {} added remote candidate: {}", self.id, candidate.candidate);
                    accepted += 1;
                }
                Err(e) => {
                    let error = NegotiationError::candidate(candidate.candidate, e);
                    warn!("Session {} {}", self.id, error);
                    self.handler.on_candidate_error(&self.id, &error).await;
                    failures.push(error);
                }
            }
        }

        Ok(CandidateBatchOutcome::Forwarded { accepted, failures })
    }
}
