//! ICE candidates and the local-candidate filter
//!
//! Candidates are opaque to the negotiation core. The only thing ever read out
//! of one is the transport token (third field of the candidate line), which
//! the local-candidate filter uses to suppress the non-preferred transport.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::CandidatePolicy;

/// A network reachability candidate in the shape signaling transports ship
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// The candidate line, e.g. `candidate:1 1 udp 2122260223 10.0.0.2 54321 typ host`
    pub candidate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdp_mid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdp_m_line_index: Option<u16>,
}

impl Candidate {
    pub fn new(candidate: impl Into<String>) -> Self {
        Self {
            candidate: candidate.into(),
            sdp_mid: None,
            sdp_m_line_index: None,
        }
    }

    pub fn with_mid(mut self, sdp_mid: impl Into<String>, sdp_m_line_index: u16) -> Self {
        self.sdp_mid = Some(sdp_mid.into());
        self.sdp_m_line_index = Some(sdp_m_line_index);
        self
    }

    /// Transport protocol named by the candidate line, if recognizable
    pub fn transport(&self) -> Option<CandidateTransport> {
        self.candidate
            .split_whitespace()
            .nth(2)
            .and_then(CandidateTransport::from_token)
    }

    /// Engines signal the end of gathering with an empty candidate line
    pub fn is_end_of_candidates(&self) -> bool {
        self.candidate.trim().is_empty()
    }
}

/// Transport protocol of a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateTransport {
    Udp,
    Tcp,
}

impl CandidateTransport {
    pub fn from_token(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("udp") {
            Some(CandidateTransport::Udp)
        } else if token.eq_ignore_ascii_case("tcp") {
            Some(CandidateTransport::Tcp)
        } else {
            None
        }
    }
}

impl fmt::Display for CandidateTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateTransport::Udp => write!(f, "udp"),
            CandidateTransport::Tcp => write!(f, "tcp"),
        }
    }
}

/// What to do with a locally discovered candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateDecision {
    /// Hand it to the signaling transport
    Forward,
    /// Drop it; it uses the non-preferred transport
    Suppress,
    /// Gathering finished; nothing to forward and nothing went wrong
    EndOfCandidates,
}

/// Decide whether a locally discovered candidate is forwarded
///
/// `None` is the engine's terminal marker. Candidates whose transport cannot
/// be read are forwarded.
pub fn filter_local_candidate(
    candidate: Option<&Candidate>,
    policy: &CandidatePolicy,
) -> CandidateDecision {
    let Some(candidate) = candidate else {
        return CandidateDecision::EndOfCandidates;
    };

    if candidate.is_end_of_candidates() {
        return CandidateDecision::EndOfCandidates;
    }

    match candidate.transport() {
        Some(transport) if transport != policy.preferred_transport => CandidateDecision::Suppress,
        _ => CandidateDecision::Forward,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UDP_HOST: &str = "candidate:842163049 1 udp 1677729535 203.0.113.7 46154 typ srflx raddr 10.0.0.2 rport 46154";
    const TCP_HOST: &str = "candidate:1 1 tcp 1518280447 10.0.0.2 9 typ host tcptype active";

    #[test]
    fn test_transport_token() {
        assert_eq!(Candidate::new(UDP_HOST).transport(), Some(CandidateTransport::Udp));
        assert_eq!(Candidate::new(TCP_HOST).transport(), Some(CandidateTransport::Tcp));
        assert_eq!(
            Candidate::new("a=candidate:1 1 UDP 2130706431 192.168.1.1 8000 typ host").transport(),
            Some(CandidateTransport::Udp)
        );
        assert_eq!(Candidate::new("garbage").transport(), None);
    }

    #[test]
    fn test_filter_local_candidate() {
        let policy = CandidatePolicy::default();

        assert_eq!(
            filter_local_candidate(Some(&Candidate::new(UDP_HOST)), &policy),
            CandidateDecision::Forward
        );
        assert_eq!(
            filter_local_candidate(Some(&Candidate::new(TCP_HOST)), &policy),
            CandidateDecision::Suppress
        );
        assert_eq!(filter_local_candidate(None, &policy), CandidateDecision::EndOfCandidates);
        assert_eq!(
            filter_local_candidate(Some(&Candidate::new("")), &policy),
            CandidateDecision::EndOfCandidates
        );
        assert_eq!(
            filter_local_candidate(Some(&Candidate::new("garbage")), &policy),
            CandidateDecision::Forward
        );

        let tcp_policy = CandidatePolicy {
            preferred_transport: CandidateTransport::Tcp,
        };
        assert_eq!(
            filter_local_candidate(Some(&Candidate::new(UDP_HOST)), &tcp_policy),
            CandidateDecision::Suppress
        );
    }

    #[test]
    fn test_wire_shape() {
        let candidate = Candidate::new(UDP_HOST).with_mid("0", 0);
        let json = serde_json::to_value(&candidate).unwrap();
        assert_eq!(json["candidate"], UDP_HOST);
        assert_eq!(json["sdpMid"], "0");
        assert_eq!(json["sdpMLineIndex"], 0);

        let bare: Candidate =
            serde_json::from_str(r#"{"candidate":"candidate:1 1 udp 1 10.0.0.1 9 typ host"}"#)
                .unwrap();
        assert_eq!(bare.sdp_mid, None);
        assert_eq!(bare.sdp_m_line_index, None);
    }
}
