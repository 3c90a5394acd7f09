//! Shared test fixtures: an in-memory transport engine and a recording handler
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use rtcpeer_session_core::adapter::{
    ConnectivityState, TransportAdapter, TransportEvent, TransportEventSender, TransportFactory,
};
use rtcpeer_session_core::candidate::Candidate;
use rtcpeer_session_core::config::{OfferOptions, SessionConfig, TransportConfig};
use rtcpeer_session_core::description::{SdpType, SessionDescription};
use rtcpeer_session_core::errors::{NegotiationError, TransportError};
use rtcpeer_session_core::events::SessionEventHandler;
use rtcpeer_session_core::media::MediaStream;
use rtcpeer_session_core::session::{NegotiationSession, SessionId};

pub const LOCAL_OFFER: &str = "v=0\r\n\
    o=- 1001 2 IN IP4 127.0.0.1\r\n\
    s=-\r\n\
    t=0 0\r\n\
    a=msid-semantic: WMS local-stream\r\n\
    m=audio 9 RTP/SAVPF 111\r\n\
    a=sendrecv\r\n\
    a=ssrc:42 cname:local\r\n\
    m=video 9 RTP/SAVPF 96\r\n\
    a=sendrecv\r\n";

pub const REMOTE_OFFER: &str = "v=0\r\n\
    o=- 2002 2 IN IP4 198.51.100.1\r\n\
    s=-\r\n\
    t=0 0\r\n\
    m=audio 9 UDP/TLS/RTP/SAVPF 111\r\n\
    a=sendonly\r\n\
    m=video 9 UDP/TLS/RTP/SAVPF 96\r\n\
    a=sendonly\r\n";

/// What the engine synthesizes as answer: wildcard group, a label on audio
pub const ENGINE_ANSWER: &str = "v=0\r\n\
    o=- 3003 2 IN IP4 127.0.0.1\r\n\
    s=-\r\n\
    t=0 0\r\n\
    a=msid-semantic: WMS *\r\n\
    m=audio 9 RTP/SAVPF 111\r\n\
    a=recvonly\r\n\
    a=ssrc:3735928559 cname:engine\r\n\
    a=ssrc:3735928559 label:remote-audio\r\n\
    m=video 9 RTP/SAVPF 96\r\n\
    a=recvonly\r\n\
    a=msid:engine-stream engine-track\r\n";

pub const UDP_CANDIDATE: &str = "candidate:842163049 1 udp 1677729535 203.0.113.7 46154 typ srflx raddr 10.0.0.2 rport 46154";
pub const TCP_CANDIDATE: &str = "candidate:1 1 tcp 1518280447 10.0.0.2 9 typ host tcptype active";

pub fn candidate(n: u32) -> Candidate {
    Candidate::new(format!(
        "candidate:{} 1 udp 2122260223 10.0.0.{} 5000{} typ host",
        n, n, n
    ))
    .with_mid("0", 0)
}

/// Calls the session made on the engine, in order
#[derive(Debug, Clone, PartialEq)]
pub enum TransportCall {
    CreateOffer,
    CreateAnswer,
    SetLocal(SessionDescription),
    SetRemote(SessionDescription),
    AddCandidate(String),
    AddLocalMedia(String),
    Close,
}

/// Which engine operations fail
#[derive(Debug, Clone, Default)]
pub struct Failures {
    pub create_transport: bool,
    pub create_offer: bool,
    pub create_answer: bool,
    pub set_local: bool,
    pub set_remote: bool,
    pub close: bool,
    pub rejected_candidates: Vec<String>,
}

#[derive(Debug)]
pub struct MockState {
    pub calls: Mutex<Vec<TransportCall>>,
    pub failures: Mutex<Failures>,
    pub transport_config: Mutex<Option<TransportConfig>>,
    pub events: Mutex<Option<TransportEventSender>>,
    pub answer_sdp: Mutex<String>,
    pub connectivity: Mutex<ConnectivityState>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(Failures::default()),
            transport_config: Mutex::new(None),
            events: Mutex::new(None),
            answer_sdp: Mutex::new(ENGINE_ANSWER.to_string()),
            connectivity: Mutex::new(ConnectivityState::New),
        }
    }
}

impl MockState {
    pub fn calls(&self) -> Vec<TransportCall> {
        self.calls.lock().clone()
    }

    pub fn candidate_calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                TransportCall::AddCandidate(candidate) => Some(candidate.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn close_calls(&self) -> usize {
        self.calls.lock().iter().filter(|call| **call == TransportCall::Close).count()
    }

    pub fn last_local(&self) -> Option<SessionDescription> {
        self.calls.lock().iter().rev().find_map(|call| match call {
            TransportCall::SetLocal(description) => Some(description.clone()),
            _ => None,
        })
    }

    pub fn last_remote(&self) -> Option<SessionDescription> {
        self.calls.lock().iter().rev().find_map(|call| match call {
            TransportCall::SetRemote(description) => Some(description.clone()),
            _ => None,
        })
    }

    /// The sender the session handed to the engine
    pub fn events(&self) -> TransportEventSender {
        self.events.lock().clone().expect("transport not created")
    }

    fn record(&self, call: TransportCall) {
        self.calls.lock().push(call);
    }
}

pub struct MockTransport {
    state: Arc<MockState>,
}

#[async_trait]
impl TransportAdapter for MockTransport {
    async fn create_offer(
        &self,
        _options: &OfferOptions,
    ) -> Result<SessionDescription, TransportError> {
        self.state.record(TransportCall::CreateOffer);
        if self.state.failures.lock().create_offer {
            return Err(TransportError::new("offer synthesis failed"));
        }
        Ok(SessionDescription::offer(LOCAL_OFFER))
    }

    async fn create_answer(
        &self,
        _constraints: &OfferOptions,
    ) -> Result<SessionDescription, TransportError> {
        self.state.record(TransportCall::CreateAnswer);
        if self.state.failures.lock().create_answer {
            return Err(TransportError::new("no remote offer"));
        }
        Ok(SessionDescription::answer(self.state.answer_sdp.lock().clone()))
    }

    async fn set_local_description(
        &self,
        description: &SessionDescription,
    ) -> Result<(), TransportError> {
        self.state.record(TransportCall::SetLocal(description.clone()));
        if self.state.failures.lock().set_local {
            return Err(TransportError::new("local description rejected"));
        }
        Ok(())
    }

    async fn set_remote_description(
        &self,
        description: &SessionDescription,
    ) -> Result<(), TransportError> {
        self.state.record(TransportCall::SetRemote(description.clone()));
        if self.state.failures.lock().set_remote {
            return Err(TransportError::new("remote description rejected"));
        }
        Ok(())
    }

    async fn add_ice_candidate(&self, candidate: &Candidate) -> Result<(), TransportError> {
        self.state.record(TransportCall::AddCandidate(candidate.candidate.clone()));
        if self.state.failures.lock().rejected_candidates.contains(&candidate.candidate) {
            return Err(TransportError::new("candidate rejected"));
        }
        Ok(())
    }

    fn add_local_media(&self, stream: Arc<dyn MediaStream>) -> Result<(), TransportError> {
        self.state.record(TransportCall::AddLocalMedia(stream.id().to_string()));
        Ok(())
    }

    fn connectivity_state(&self) -> ConnectivityState {
        *self.state.connectivity.lock()
    }

    async fn close(&self) -> Result<(), TransportError> {
        self.state.record(TransportCall::Close);
        if self.state.failures.lock().close {
            return Err(TransportError::new("engine already gone"));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MockTransportFactory {
    pub state: Arc<MockState>,
}

#[async_trait]
impl TransportFactory for MockTransportFactory {
    async fn create_transport(
        &self,
        config: TransportConfig,
        events: TransportEventSender,
    ) -> Result<Box<dyn TransportAdapter>, TransportError> {
        if self.state.failures.lock().create_transport {
            return Err(TransportError::new("engine unavailable"));
        }
        *self.state.transport_config.lock() = Some(config);
        *self.state.events.lock() = Some(events);
        Ok(Box::new(MockTransport {
            state: self.state.clone(),
        }))
    }
}

#[derive(Debug)]
pub struct MockStream {
    id: String,
    stopped: AtomicBool,
}

impl MockStream {
    pub fn new(id: &str) -> Arc<Self> {
        Arc::new(Self {
            id: id.to_string(),
            stopped: AtomicBool::new(false),
        })
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

impl MediaStream for MockStream {
    fn id(&self) -> &str {
        &self.id
    }

    fn stop_tracks(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

/// Handler callbacks as observed by the application
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerEvent {
    LocalCandidate(String),
    Connectivity(ConnectivityState),
    SessionFailed(NegotiationError),
    RemoteMedia(String),
    CandidateError(NegotiationError),
    Closed,
}

#[derive(Default)]
pub struct RecordingHandler {
    pub events: Mutex<Vec<HandlerEvent>>,
}

impl RecordingHandler {
    pub fn events(&self) -> Vec<HandlerEvent> {
        self.events.lock().clone()
    }
}

#[async_trait]
impl SessionEventHandler for RecordingHandler {
    async fn on_local_candidate(&self, _session_id: &SessionId, candidate: &Candidate) {
        self.events.lock().push(HandlerEvent::LocalCandidate(candidate.candidate.clone()));
    }

    async fn on_connectivity_state_changed(
        &self,
        _session_id: &SessionId,
        state: ConnectivityState,
    ) {
        self.events.lock().push(HandlerEvent::Connectivity(state));
    }

    async fn on_session_failed(&self, _session_id: &SessionId, error: &NegotiationError) {
        self.events.lock().push(HandlerEvent::SessionFailed(error.clone()));
    }

    async fn on_remote_media(&self, _session_id: &SessionId, stream: Arc<dyn MediaStream>) {
        self.events.lock().push(HandlerEvent::RemoteMedia(stream.id().to_string()));
    }

    async fn on_candidate_error(&self, _session_id: &SessionId, error: &NegotiationError) {
        self.events.lock().push(HandlerEvent::CandidateError(error.clone()));
    }

    async fn on_closed(&self, _session_id: &SessionId) {
        self.events.lock().push(HandlerEvent::Closed);
    }
}

pub struct Harness {
    pub session: NegotiationSession,
    pub state: Arc<MockState>,
    pub handler: Arc<RecordingHandler>,
}

pub fn harness(config: SessionConfig) -> Harness {
    let factory = MockTransportFactory::default();
    let state = factory.state.clone();
    let handler = Arc::new(RecordingHandler::default());
    let session = NegotiationSession::new(
        SessionId::new("RTC-test"),
        config,
        Arc::new(factory),
        handler.clone(),
    );
    Harness { session, state, handler }
}

/// A harness whose session is already initialized
pub async fn initialized(config: SessionConfig) -> Harness {
    let mut harness = harness(config);
    harness.session.initialize(None).await.expect("initialize");
    harness
}

pub fn remote_offer() -> SessionDescription {
    SessionDescription::offer(REMOTE_OFFER)
}

pub fn kind_of(call: &TransportCall) -> Option<SdpType> {
    match call {
        TransportCall::SetLocal(description) | TransportCall::SetRemote(description) => {
            Some(description.kind())
        }
        _ => None,
    }
}

pub async fn send(state: &MockState, event: TransportEvent) {
    state.events().send(event).await.expect("session dropped its receiver");
}
