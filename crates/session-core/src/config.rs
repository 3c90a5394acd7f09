//! Session configuration
//!
//! This module holds everything a negotiation session is configured with:
//! the ICE settings forwarded to the transport engine, the offer options, the
//! local-candidate policy, and the legacy stream identity settings used to
//! rewrite outgoing answers.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────┐
//! │      SessionConfig       │
//! │ ┌──────────────────────┐ │
//! │ │ IceConfig           ─┼─┼─> TransportConfig (forced mux + max-bundle)
//! │ │ OfferOptions         │ │
//! │ │ CandidatePolicy      │ │
//! │ │ LegacyIdentityConfig │ │
//! │ └──────────────────────┘ │
//! └──────────────────────────┘
//! ```
//!
//! # Usage Examples
//!
//! ```rust
//! use rtcpeer_session_core::config::{
//!     BundlePolicy, IceConfig, IceServer, IceTransportPolicy, RtcpMuxPolicy, SessionConfig,
//! };
//!
//! let config = SessionConfig::new()
//!     .with_ice(
//!         IceConfig::new()
//!             .with_server(IceServer::new("turn:turn.example.com:3478").with_credentials("user", "secret"))
//!             .with_relay_only(true),
//!     )
//!     .with_legacy_identity(true);
//!
//! let transport = config.ice.clone().unwrap_or_default().to_transport_config();
//! assert_eq!(transport.ice_transport_policy, IceTransportPolicy::Relay);
//! assert_eq!(transport.bundle_policy, BundlePolicy::MaxBundle);
//! assert_eq!(transport.rtcp_mux_policy, RtcpMuxPolicy::Require);
//! assert!(config.legacy_identity.enabled);
//! ```
//!
//! ## Loading From JSON
//!
//! ```rust
//! use rtcpeer_session_core::config::SessionConfig;
//!
//! let config = SessionConfig::from_json_str(r#"{
//!     "ice": { "ice_servers": [{ "urls": ["stun:stun.example.com:3478"] }], "relay_only": false },
//!     "legacy_identity": { "enabled": true }
//! }"#).unwrap();
//!
//! assert_eq!(config.legacy_identity.group_id, "MS_0000");
//! assert_eq!(config.event_channel_capacity, 100);
//! ```

use serde::{Deserialize, Serialize};

use crate::candidate::CandidateTransport;
use crate::errors::{NegotiationError, Result};

/// A STUN or TURN server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceServer {
    pub urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
}

impl IceServer {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            urls: vec![url.into()],
            ..Default::default()
        }
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        credential: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.credential = Some(credential.into());
        self
    }
}

/// Which candidates the engine may use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IceTransportPolicy {
    #[default]
    All,
    Relay,
}

/// How media sections are bundled onto transports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BundlePolicy {
    #[default]
    Balanced,
    MaxCompat,
    MaxBundle,
}

/// Whether RTCP must share the RTP transport
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RtcpMuxPolicy {
    #[default]
    Negotiate,
    Require,
}

/// ICE configuration as supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IceConfig {
    pub ice_servers: Vec<IceServer>,
    /// Only gather relay candidates
    pub relay_only: bool,
    pub ice_transport_policy: IceTransportPolicy,
    pub bundle_policy: BundlePolicy,
    pub rtcp_mux_policy: RtcpMuxPolicy,
}

impl IceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_server(mut self, server: IceServer) -> Self {
        self.ice_servers.push(server);
        self
    }

    pub fn with_relay_only(mut self, relay_only: bool) -> Self {
        self.relay_only = relay_only;
        self
    }

    /// The configuration actually handed to the transport engine
    ///
    /// RTCP multiplexing and max-bundle are always forced on to keep the
    /// candidate count down; `relay_only` forces the relay transport policy.
    pub fn to_transport_config(&self) -> TransportConfig {
        let ice_transport_policy = if self.relay_only {
            IceTransportPolicy::Relay
        } else {
            self.ice_transport_policy
        };

        TransportConfig {
            ice_servers: self.ice_servers.clone(),
            ice_transport_policy,
            bundle_policy: BundlePolicy::MaxBundle,
            rtcp_mux_policy: RtcpMuxPolicy::Require,
        }
    }
}

/// Configuration passed to [`TransportFactory::create_transport`](crate::adapter::TransportFactory::create_transport)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportConfig {
    pub ice_servers: Vec<IceServer>,
    pub ice_transport_policy: IceTransportPolicy,
    pub bundle_policy: BundlePolicy,
    pub rtcp_mux_policy: RtcpMuxPolicy,
}

/// Options for offer synthesis; also used as answer constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfferOptions {
    pub offer_to_receive_audio: bool,
    pub offer_to_receive_video: bool,
}

impl Default for OfferOptions {
    fn default() -> Self {
        Self {
            offer_to_receive_audio: true,
            offer_to_receive_video: true,
        }
    }
}

/// Local-candidate filtering policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidatePolicy {
    /// Candidates on any other transport are never forwarded
    pub preferred_transport: CandidateTransport,
}

impl Default for CandidatePolicy {
    fn default() -> Self {
        Self {
            preferred_transport: CandidateTransport::Udp,
        }
    }
}

/// Legacy stream identity settings for outgoing answers
///
/// When `enabled`, answers get their ssrc/msid lines replaced before and after
/// the local apply. Provisional answers are always normalized after the local
/// apply, whatever `enabled` says.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyIdentityConfig {
    pub enabled: bool,
    /// Concrete group id used instead of the `*` wildcard, and by the post-apply pass
    pub group_id: String,
    pub cname: String,
    pub audio_ssrc: u32,
    pub video_ssrc: u32,
    pub audio_label: String,
    pub video_label: String,
}

impl Default for LegacyIdentityConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            group_id: "MS_0000".to_string(),
            cname: "CHROME0000".to_string(),
            audio_ssrc: 1000,
            video_ssrc: 2000,
            audio_label: "LABEL_AUDIO_1000".to_string(),
            video_label: "LABEL_VIDEO_2000".to_string(),
        }
    }
}

/// Configuration of a negotiation session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Used by `initialize` when it is not given a configuration of its own
    pub ice: Option<IceConfig>,
    pub offer_options: OfferOptions,
    pub candidate_policy: CandidatePolicy,
    pub legacy_identity: LegacyIdentityConfig,
    /// Capacity of the transport event channel
    pub event_channel_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ice: None,
            offer_options: OfferOptions::default(),
            candidate_policy: CandidatePolicy::default(),
            legacy_identity: LegacyIdentityConfig::default(),
            event_channel_capacity: 100,
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ice(mut self, ice: IceConfig) -> Self {
        self.ice = Some(ice);
        self
    }

    pub fn with_offer_options(mut self, offer_options: OfferOptions) -> Self {
        self.offer_options = offer_options;
        self
    }

    pub fn with_candidate_policy(mut self, candidate_policy: CandidatePolicy) -> Self {
        self.candidate_policy = candidate_policy;
        self
    }

    /// Turn the legacy stream identity rewrite of answers on or off
    pub fn with_legacy_identity(mut self, enabled: bool) -> Self {
        self.legacy_identity.enabled = enabled;
        self
    }

    pub fn with_legacy_identity_config(mut self, legacy_identity: LegacyIdentityConfig) -> Self {
        self.legacy_identity = legacy_identity;
        self
    }

    pub fn with_event_channel_capacity(mut self, capacity: usize) -> Self {
        self.event_channel_capacity = capacity;
        self
    }

    /// Load a configuration from a JSON document; absent fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| {
                NegotiationError::configuration(format!("invalid session config: {}", e))
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.event_channel_capacity == 0 {
            return Err(NegotiationError::configuration(
                "event_channel_capacity must be greater than zero",
            ));
        }
        if self.legacy_identity.group_id.is_empty() || self.legacy_identity.group_id == "*" {
            return Err(NegotiationError::configuration(
                "legacy_identity.group_id must be a concrete group id",
            ));
        }
        Ok(())
    }
}
