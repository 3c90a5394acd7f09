//! Per-section stream identity (`a=ssrc:` cname/msid/mslabel/label lines)

use crate::attributes::{
    is_msid_line, is_ssrc_line, line_content, line_ending, parse_ssrc_attribute,
};

/// The legacy identity of one media section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamIdentity {
    /// Synchronization source the attribute lines are scoped to
    pub ssrc: u32,
    /// Canonical name
    pub cname: String,
    /// Stream-association group; also emitted as the `mslabel`
    pub msid: String,
    /// Track label
    pub label: String,
}

impl StreamIdentity {
    pub fn new(
        ssrc: u32,
        cname: impl Into<String>,
        msid: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            ssrc,
            cname: cname.into(),
            msid: msid.into(),
            label: label.into(),
        }
    }

    /// The four attribute lines for this identity, without terminators
    pub fn attribute_lines(&self) -> [String; 4] {
        [
            format!("a=ssrc:{} cname:{}", self.ssrc, self.cname),
            format!("a=ssrc:{} msid:{} {}", self.ssrc, self.msid, self.label),
            format!("a=ssrc:{} mslabel:{}", self.ssrc, self.msid),
            format!("a=ssrc:{} label:{}", self.ssrc, self.label),
        ]
    }
}

/// Stream identity attributes found in an existing section
///
/// Later lines win when a key repeats, so a section carrying several ssrcs
/// reports the values of the last one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedStreamIdentity {
    pub ssrc: u32,
    pub cname: Option<String>,
    pub msid: Option<String>,
    pub mslabel: Option<String>,
    pub label: Option<String>,
    /// Every matched ssrc line, without terminators
    pub lines: Vec<String>,
}

/// Remove every `a=ssrc:` and `a=msid:` line from a section
///
/// Blank lines are dropped as well, which makes the operation idempotent.
pub fn strip_stream_attributes(section: &str) -> String {
    section
        .split_inclusive('\n')
        .filter(|line| {
            let content = line_content(line);
            !(content.is_empty() || is_ssrc_line(content) || is_msid_line(content))
        })
        .collect()
}

/// Replace a section's stream identity with `identity`
///
/// Strips the existing ssrc/msid lines, then appends the four generated lines
/// using the section's own line terminator.
pub fn apply_stream_identity(section: &str, identity: &StreamIdentity) -> String {
    let eol = line_ending(section);
    let mut out = strip_stream_attributes(section);

    if !out.is_empty() && !out.ends_with('\n') {
        out.push_str(eol);
    }

    for line in identity.attribute_lines() {
        out.push_str(&line);
        out.push_str(eol);
    }

    out
}

/// Read the stream identity attributes of a section, if it has any
pub fn parse_stream_identity(section: &str) -> Option<ParsedStreamIdentity> {
    let mut parsed: Option<ParsedStreamIdentity> = None;

    for line in section.split_inclusive('\n') {
        let Some(attr) = parse_ssrc_attribute(line) else {
            continue;
        };

        let identity = parsed.get_or_insert_with(ParsedStreamIdentity::default);
        identity.ssrc = attr.ssrc;
        identity.lines.push(line_content(line).to_string());

        let value = Some(attr.value.to_string());
        match attr.key {
            "cname" => identity.cname = value,
            "msid" => identity.msid = value,
            "mslabel" => identity.mslabel = value,
            "label" => identity.label = value,
            _ => {}
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const AUDIO: &str = "m=audio 9 UDP/TLS/RTP/SAVPF 111\r\nc=IN IP4 0.0.0.0\r\na=ssrc-group:FID 1 2\r\na=ssrc:111 cname:X\r\na=msid:Y Z\r\na=ssrc:111 label:remote-audio\r\n";

    #[test]
    fn test_strip_stream_attributes() {
        let stripped = strip_stream_attributes(AUDIO);
        assert_eq!(
            stripped,
            "m=audio 9 UDP/TLS/RTP/SAVPF 111\r\nc=IN IP4 0.0.0.0\r\na=ssrc-group:FID 1 2\r\n"
        );
        assert_eq!(strip_stream_attributes(&stripped), stripped);
    }

    #[test]
    fn test_strip_drops_blank_lines() {
        let section = "m=video 9 RTP/SAVPF 96\n\na=ssrc:1 cname:x\n\na=sendrecv\n";
        assert_eq!(strip_stream_attributes(section), "m=video 9 RTP/SAVPF 96\na=sendrecv\n");
    }

    #[test]
    fn test_apply_stream_identity() {
        let identity = StreamIdentity::new(1000, "CHROME0000", "MS_0000", "LABEL_AUDIO_1000");
        let applied = apply_stream_identity(AUDIO, &identity);
        assert_eq!(
            applied,
            "m=audio 9 UDP/TLS/RTP/SAVPF 111\r\nc=IN IP4 0.0.0.0\r\na=ssrc-group:FID 1 2\r\n\
             a=ssrc:1000 cname:CHROME0000\r\n\
             a=ssrc:1000 msid:MS_0000 LABEL_AUDIO_1000\r\n\
             a=ssrc:1000 mslabel:MS_0000\r\n\
             a=ssrc:1000 label:LABEL_AUDIO_1000\r\n"
        );
    }

    #[test]
    fn test_apply_twice_keeps_only_latest_identity() {
        let first = StreamIdentity::new(1, "first-cname", "first-msid", "first-label");
        let second = StreamIdentity::new(2, "second-cname", "second-msid", "second-label");

        let applied = apply_stream_identity(&apply_stream_identity(AUDIO, &first), &second);

        let ssrc_lines: Vec<&str> = applied.lines().filter(|l| l.starts_with("a=ssrc:")).collect();
        assert_eq!(ssrc_lines.len(), 4);
        assert!(ssrc_lines.iter().all(|l| l.starts_with("a=ssrc:2 ")));
        assert!(!applied.contains("first"));
    }

    #[test]
    fn test_apply_terminates_unterminated_section() {
        let identity = StreamIdentity::new(2000, "c", "m", "l");
        let applied = apply_stream_identity("m=video 9 RTP/SAVPF 96", &identity);
        assert!(applied.starts_with("m=video 9 RTP/SAVPF 96\na=ssrc:2000 cname:c\n"));
        assert!(applied.ends_with("a=ssrc:2000 label:l\n"));
    }

    #[test]
    fn test_parse_stream_identity() {
        let parsed = parse_stream_identity(AUDIO).unwrap();
        assert_eq!(parsed.ssrc, 111);
        assert_eq!(parsed.cname.as_deref(), Some("X"));
        assert_eq!(parsed.label.as_deref(), Some("remote-audio"));
        assert_eq!(parsed.msid, None);
        assert_eq!(parsed.lines.len(), 2);

        let identity = StreamIdentity::new(1000, "CHROME0000", "MS_0000", "LABEL_AUDIO_1000");
        let parsed = parse_stream_identity(&apply_stream_identity(AUDIO, &identity)).unwrap();
        assert_eq!(parsed.ssrc, 1000);
        assert_eq!(parsed.msid.as_deref(), Some("MS_0000"));
        assert_eq!(parsed.mslabel.as_deref(), Some("MS_0000"));
        assert_eq!(parsed.label.as_deref(), Some("LABEL_AUDIO_1000"));

        assert!(parse_stream_identity("m=audio 9 RTP/SAVPF 0\r\na=msid:x y\r\n").is_none());
    }
}
