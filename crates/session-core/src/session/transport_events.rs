//! Reacting to transport engine callbacks

use tracing::{debug, trace, warn};

use super::negotiation::NegotiationSession;
use super::types::NegotiationPhase;
use crate::adapter::{ConnectivityState, TransportEvent};
use crate::candidate::{filter_local_candidate, CandidateDecision};
use crate::errors::NegotiationError;
use crate::events::SessionEvent;

impl NegotiationSession {
    /// Wait for the next engine callback and handle it
    ///
    /// Returns `None` once the session is closed or the engine dropped its
    /// sender.
    pub async fn process_next_event(&mut self) -> Option<SessionEvent> {
        if self.closed {
            return None;
        }
        let event = self.events_rx.as_mut()?.recv().await?;
        Some(self.handle_transport_event(event).await)
    }

    /// Handle one engine callback
    pub async fn handle_transport_event(&mut self, event: TransportEvent) -> SessionEvent {
        if self.closed {
            debug!("Session {} is closed, ignoring {:?}", self.id, event);
            return SessionEvent::Ignored;
        }

        match event {
            TransportEvent::CandidateDiscovered(candidate) => {
                let decision =
                    filter_local_candidate(candidate.as_ref(), &self.config.candidate_policy);
                match (decision, candidate) {
                    (CandidateDecision::Forward, Some(candidate)) => {
                        trace!("Session {} local candidate: {}", self.id, candidate.candidate);
                        self.handler.on_local_candidate(&self.id, &candidate).await;
                        SessionEvent::LocalCandidate(candidate)
                    }
                    (CandidateDecision::Suppress, Some(candidate)) => {
                        trace!(
                            "Session {} suppressed local candidate: {}",
                            self.id,
                            candidate.candidate
                        );
                        SessionEvent::CandidateSuppressed(candidate)
                    }
                    _ => {
                        debug!("Session {} finished gathering local candidates", self.id);
                        SessionEvent::EndOfCandidates
                    }
                }
            }
            TransportEvent::ConnectivityStateChanged(state) => self.on_connectivity(state).await,
            TransportEvent::RemoteMediaReceived(stream) => {
                if let Some(previous) = self.remote_media.replace(stream.clone()) {
                    debug!(
                        "Session {} remote stream {} replaced by {}",
                        self.id,
                        previous.id(),
                        stream.id()
                    );
                }
                self.handler.on_remote_media(&self.id, stream.clone()).await;
                SessionEvent::RemoteMedia(stream)
            }
        }
    }

    async fn on_connectivity(&mut self, state: ConnectivityState) -> SessionEvent {
        if self.phase == NegotiationPhase::Idle {
            debug!("Session {} not initialized, ignoring connectivity state {}", self.id, state);
            return SessionEvent::Ignored;
        }

        self.handler.on_connectivity_state_changed(&self.id, state).await;

        match state {
            ConnectivityState::Connected | ConnectivityState::Completed => {
                self.transition(NegotiationPhase::Connected)
            }
            ConnectivityState::Disconnected => self.transition(NegotiationPhase::Disconnected),
            ConnectivityState::Failed => {
                self.transition(NegotiationPhase::Failed);
                let error = NegotiationError::ConnectivityFailure {
                    session_id: self.id.to_string(),
                    state,
                };
                warn!("Session {} {}", self.id, error);
                self.handler.on_session_failed(&self.id, &error).await;
                return SessionEvent::Failed(error);
            }
            _ => {}
        }

        SessionEvent::ConnectivityChanged {
            state,
            phase: self.phase,
        }
    }
}
