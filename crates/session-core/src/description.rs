//! Session descriptions as exchanged with the peer

use std::fmt;

use rtcpeer_sdp_core::DescriptionSections;
use serde::{Deserialize, Serialize};

/// Kind of a session description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SdpType {
    #[serde(rename = "offer")]
    Offer,
    #[serde(rename = "answer")]
    Answer,
    /// Provisional answer: commits to a transport but not yet to a media direction
    #[serde(rename = "pranswer")]
    ProvisionalAnswer,
}

impl fmt::Display for SdpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SdpType::Offer => write!(f, "offer"),
            SdpType::Answer => write!(f, "answer"),
            SdpType::ProvisionalAnswer => write!(f, "pranswer"),
        }
    }
}

/// A session description: its kind plus the SDP body
///
/// Values are never mutated once built; every rewrite produces a new
/// description through [`SessionDescription::with_sdp`].
///
/// # Examples
///
/// ```rust
/// use rtcpeer_session_core::description::{SdpType, SessionDescription};
///
/// let answer: SessionDescription =
///     serde_json::from_str(r#"{"type":"answer","sdp":"v=0\r\n"}"#).unwrap();
/// assert_eq!(answer.kind(), SdpType::Answer);
/// assert_eq!(answer.sdp(), "v=0\r\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDescription {
    #[serde(rename = "type")]
    kind: SdpType,
    sdp: String,
}

impl SessionDescription {
    pub fn new(kind: SdpType, sdp: impl Into<String>) -> Self {
        Self {
            kind,
            sdp: sdp.into(),
        }
    }

    pub fn offer(sdp: impl Into<String>) -> Self {
        Self::new(SdpType::Offer, sdp)
    }

    pub fn answer(sdp: impl Into<String>) -> Self {
        Self::new(SdpType::Answer, sdp)
    }

    pub fn provisional_answer(sdp: impl Into<String>) -> Self {
        Self::new(SdpType::ProvisionalAnswer, sdp)
    }

    pub fn kind(&self) -> SdpType {
        self.kind
    }

    pub fn sdp(&self) -> &str {
        &self.sdp
    }

    /// A new description of the same kind with a different body
    pub fn with_sdp(&self, sdp: impl Into<String>) -> Self {
        Self::new(self.kind, sdp)
    }

    /// A new description with the same body and a different kind
    pub fn with_kind(&self, kind: SdpType) -> Self {
        Self::new(kind, self.sdp.clone())
    }

    /// Header/audio/video view of the body
    pub fn sections(&self) -> DescriptionSections {
        DescriptionSections::split(&self.sdp)
    }

    pub fn into_sdp(self) -> String {
        self.sdp
    }
}
