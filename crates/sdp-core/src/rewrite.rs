//! Whole-document rewrites: media direction and transport profile

use std::fmt;

use crate::attributes::line_content;

/// Transport profile token older peers put on their media lines
pub const LEGACY_TRANSPORT_PROFILE: &str = "UDP/TLS/RTP/SAVPF";

/// Transport profile token the transport engine expects
pub const TRANSPORT_PROFILE: &str = "RTP/SAVPF";

/// Media direction attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaDirection {
    SendRecv,
    SendOnly,
    RecvOnly,
    Inactive,
}

impl MediaDirection {
    /// The attribute line for this direction, e.g. `a=recvonly`
    pub fn attribute(&self) -> &'static str {
        match self {
            MediaDirection::SendRecv => "a=sendrecv",
            MediaDirection::SendOnly => "a=sendonly",
            MediaDirection::RecvOnly => "a=recvonly",
            MediaDirection::Inactive => "a=inactive",
        }
    }

    /// Parse a direction attribute line
    pub fn from_attribute(line: &str) -> Option<Self> {
        match line_content(line) {
            "a=sendrecv" => Some(MediaDirection::SendRecv),
            "a=sendonly" => Some(MediaDirection::SendOnly),
            "a=recvonly" => Some(MediaDirection::RecvOnly),
            "a=inactive" => Some(MediaDirection::Inactive),
            _ => None,
        }
    }
}

impl fmt::Display for MediaDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.attribute()[2..])
    }
}

/// Replace every `from` direction line with `to`, keeping line terminators
pub fn replace_direction(body: &str, from: MediaDirection, to: MediaDirection) -> String {
    body.split_inclusive('\n')
        .map(|line| {
            if MediaDirection::from_attribute(line) == Some(from) {
                let terminator = &line[line_content(line).len()..];
                format!("{}{}", to.attribute(), terminator)
            } else {
                line.to_string()
            }
        })
        .collect()
}

/// Rewrite the legacy `UDP/TLS/RTP/SAVPF` profile token to `RTP/SAVPF`
pub fn normalize_transport_profile(body: &str) -> String {
    body.replace(LEGACY_TRANSPORT_PROFILE, TRANSPORT_PROFILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_replace_direction() {
        let body = "m=audio 9 RTP/SAVPF 0\r\na=recvonly\r\nm=video 9 RTP/SAVPF 96\r\na=recvonly\r\na=recvonly-ish\r\n";
        let replaced = replace_direction(body, MediaDirection::RecvOnly, MediaDirection::Inactive);
        assert_eq!(
            replaced,
            "m=audio 9 RTP/SAVPF 0\r\na=inactive\r\nm=video 9 RTP/SAVPF 96\r\na=inactive\r\na=recvonly-ish\r\n"
        );
    }

    #[test]
    fn test_replace_direction_leaves_other_directions() {
        let body = "a=sendrecv\na=sendonly\na=recvonly";
        let replaced = replace_direction(body, MediaDirection::RecvOnly, MediaDirection::Inactive);
        assert_eq!(replaced, "a=sendrecv\na=sendonly\na=inactive");
    }

    #[test]
    fn test_normalize_transport_profile() {
        let body = "m=audio 9 UDP/TLS/RTP/SAVPF 111\r\nm=video 9 UDP/TLS/RTP/SAVPF 96\r\n";
        assert_eq!(
            normalize_transport_profile(body),
            "m=audio 9 RTP/SAVPF 111\r\nm=video 9 RTP/SAVPF 96\r\n"
        );

        let already = "m=audio 9 RTP/SAVPF 111\r\n";
        assert_eq!(normalize_transport_profile(already), already);
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(MediaDirection::Inactive.to_string(), "inactive");
        assert_eq!(
            MediaDirection::from_attribute("a=sendonly\r\n"),
            Some(MediaDirection::SendOnly)
        );
        assert_eq!(MediaDirection::from_attribute("a=rtcp-mux"), None);
    }
}
