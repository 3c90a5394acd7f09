//! Session factory
//!
//! Hands out [`NegotiationSession`]s that share a transport factory, a default
//! configuration and an event handler. Session ids come from a counter owned
//! by the factory, so two factories number their sessions independently.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::adapter::TransportFactory;
use crate::config::SessionConfig;
use crate::errors::Result;
use crate::events::{LoggingEventHandler, SessionEventHandler};
use crate::session::{NegotiationSession, SessionId};

pub struct SessionFactory {
    transport_factory: Arc<dyn TransportFactory>,
    config: SessionConfig,
    handler: Arc<dyn SessionEventHandler>,
    next_id: AtomicU64,
}

impl SessionFactory {
    /// Create a factory; fails on an invalid configuration
    pub fn new(
        transport_factory: Arc<dyn TransportFactory>,
        config: SessionConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            transport_factory,
            config,
            handler: Arc::new(LoggingEventHandler),
            next_id: AtomicU64::new(0),
        })
    }

    /// Report events of every future session to `handler`
    pub fn with_handler(mut self, handler: Arc<dyn SessionEventHandler>) -> Self {
        self.handler = handler;
        self
    }

    /// A new session with the factory's configuration
    pub fn create_session(&self) -> NegotiationSession {
        self.create_session_with_config(self.config.clone())
    }

    /// A new session with its own configuration
    pub fn create_session_with_config(&self, config: SessionConfig) -> NegotiationSession {
        let id = SessionId::from_sequence(self.next_id.fetch_add(1, Ordering::Relaxed));
        debug!("Session factory created session {}", id);
        NegotiationSession::new(id, config, self.transport_factory.clone(), self.handler.clone())
    }

    pub fn sessions_created(&self) -> u64 {
        self.next_id.load(Ordering::Relaxed)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}
