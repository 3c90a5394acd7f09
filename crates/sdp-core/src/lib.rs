//! Section-level session description rewriting
//!
//! This crate performs the text surgery a negotiation session needs to layer the
//! legacy stream identification scheme (`a=ssrc:` cname/msid/mslabel/label lines
//! plus the header `a=msid-semantic: WMS` line) onto descriptions produced by a
//! transport engine that speaks a different scheme, or none at all.
//!
//! ## Section Model
//!
//! ```text
//! v=0                          ┐
//! o=- 46117 2 IN IP4 127.0.0.1 │ header
//! a=msid-semantic: WMS *       ┘
//! m=audio 9 RTP/SAVPF 111      ┐
//! a=ssrc:1000 cname:CHROME0000 ┘ audio
//! m=video 9 RTP/SAVPF 96       ┐
//! a=ssrc:2000 cname:CHROME0000 ┘ video
//! ```
//!
//! Everything is line oriented: markers are only recognized at the start of a
//! line and every rewrite keeps the line terminator the document already uses.
//! All operations are total; a document without media markers is all header.
//!
//! ## Usage
//!
//! ```rust
//! use rtcpeer_sdp_core::{DescriptionSections, StreamIdentity};
//!
//! let body = "v=0\r\na=msid-semantic: WMS *\r\nm=audio 9 RTP/SAVPF 0\r\na=msid:x y\r\n";
//! let mut sections = DescriptionSections::split(body);
//! sections.set_group_identifier("MS_0000");
//! sections.apply_audio_identity(&StreamIdentity::new(1000, "CHROME0000", "MS_0000", "LABEL_AUDIO_1000"));
//!
//! let rewritten = sections.recompose();
//! assert!(rewritten.contains("a=msid-semantic: WMS MS_0000\r\n"));
//! assert!(rewritten.contains("a=ssrc:1000 label:LABEL_AUDIO_1000\r\n"));
//! assert!(!rewritten.contains("a=msid:x y"));
//! ```

pub mod attributes;
pub mod group;
pub mod identity;
pub mod rewrite;
pub mod sections;

pub use group::{
    group_attribute_line, parse_group_identifier, set_group_identifier, GroupIdentifier,
    WILDCARD_GROUP_ID,
};
pub use identity::{
    apply_stream_identity, parse_stream_identity, strip_stream_attributes, ParsedStreamIdentity,
    StreamIdentity,
};
pub use rewrite::{
    normalize_transport_profile, replace_direction, MediaDirection, LEGACY_TRANSPORT_PROFILE,
    TRANSPORT_PROFILE,
};
pub use sections::{DescriptionSections, AUDIO_MARKER, VIDEO_MARKER};

/// Re-export of common types and functions
pub mod prelude {
    pub use super::{
        apply_stream_identity, parse_group_identifier, parse_stream_identity,
        set_group_identifier, strip_stream_attributes, DescriptionSections, GroupIdentifier,
        MediaDirection, ParsedStreamIdentity, StreamIdentity,
    };
}
