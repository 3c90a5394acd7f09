//! Header / audio / video split of a session description

use crate::group::{parse_group_identifier, set_group_identifier, GroupIdentifier};
use crate::identity::{
    apply_stream_identity, parse_stream_identity, ParsedStreamIdentity, StreamIdentity,
};

/// Line prefix that opens the audio media block
pub const AUDIO_MARKER: &str = "m=audio";

/// Line prefix that opens the video media block
pub const VIDEO_MARKER: &str = "m=video";

/// A description body split into its header and media sections
///
/// `header` is everything before the first media marker. `video` runs from its
/// marker to the end of the text. `audio` runs from its marker to the video
/// marker, or to the end of the text without video. When video comes first
/// the audio block stays inside `video` and `audio` is absent, so
/// [`recompose`](Self::recompose) always gives back the original body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptionSections {
    pub header: String,
    pub audio: Option<String>,
    pub video: Option<String>,
}

/// Byte offset of the first line starting with `marker`
fn find_marker(body: &str, marker: &str) -> Option<usize> {
    let mut offset = 0;
    for line in body.split_inclusive('\n') {
        if line.starts_with(marker) {
            return Some(offset);
        }
        offset += line.len();
    }
    None
}

impl DescriptionSections {
    /// Split a description body
    ///
    /// Never fails: a body without media markers is all header.
    pub fn split(body: &str) -> Self {
        let audio_at = find_marker(body, AUDIO_MARKER);
        let video_at = find_marker(body, VIDEO_MARKER);

        let header_end = match (audio_at, video_at) {
            (Some(audio), Some(video)) => audio.min(video),
            (Some(start), None) | (None, Some(start)) => start,
            (None, None) => body.len(),
        };

        let audio = match (audio_at, video_at) {
            (Some(audio), Some(video)) if audio < video => Some(&body[audio..video]),
            (Some(audio), None) => Some(&body[audio..]),
            _ => None,
        };

        Self {
            header: body[..header_end].to_string(),
            audio: audio.map(str::to_string),
            video: video_at.map(|start| body[start..].to_string()),
        }
    }

    /// Concatenate header, audio and video, in that order
    pub fn recompose(&self) -> String {
        let mut body = self.header.clone();
        if let Some(audio) = &self.audio {
            body.push_str(audio);
        }
        if let Some(video) = &self.video {
            body.push_str(video);
        }
        body
    }

    /// Stream-association group currently referenced by the header
    pub fn group_identifier(&self) -> Option<GroupIdentifier> {
        parse_group_identifier(&self.header)
    }

    /// Point the header's stream-association group at `group_id`
    pub fn set_group_identifier(&mut self, group_id: &str) {
        self.header = set_group_identifier(&self.header, group_id);
    }

    pub fn audio_identity(&self) -> Option<ParsedStreamIdentity> {
        self.audio.as_deref().and_then(parse_stream_identity)
    }

    pub fn video_identity(&self) -> Option<ParsedStreamIdentity> {
        self.video.as_deref().and_then(parse_stream_identity)
    }

    /// Replace the audio section's stream identity; no-op without audio
    pub fn apply_audio_identity(&mut self, identity: &StreamIdentity) {
        if let Some(audio) = self.audio.take() {
            self.audio = Some(apply_stream_identity(&audio, identity));
        }
    }

    /// Replace the video section's stream identity; no-op without video
    pub fn apply_video_identity(&mut self, identity: &StreamIdentity) {
        if let Some(video) = self.video.take() {
            self.video = Some(apply_stream_identity(&video, identity));
        }
    }
}
