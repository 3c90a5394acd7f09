//! Legacy stream identity rewrites for outgoing answers
//!
//! Two passes exist. The label-preserving pass runs before the local apply:
//! it resolves a concrete group id and keeps any track label the engine put
//! in the answer. The normalizing pass runs after the local apply succeeded
//! and pins everything to the configured constants before the answer leaves.

use rtcpeer_sdp_core::{DescriptionSections, StreamIdentity};
use tracing::trace;

use crate::config::LegacyIdentityConfig;

/// Pre-apply pass: replace the identity lines, keeping existing labels
pub(crate) fn preserve_stream_labels(body: &str, legacy: &LegacyIdentityConfig) -> String {
    let mut sections = DescriptionSections::split(body);

    let group_id = match sections.group_identifier() {
        Some(group) if !group.is_wildcard() => group.group_id,
        other => {
            trace!("Replacing group {:?} with {}", other.map(|g| g.group_id), legacy.group_id);
            sections.set_group_identifier(&legacy.group_id);
            legacy.group_id.clone()
        }
    };

    let audio_label = sections
        .audio_identity()
        .and_then(|identity| identity.label)
        .unwrap_or_else(|| legacy.audio_label.clone());
    let video_label = sections
        .video_identity()
        .and_then(|identity| identity.label)
        .unwrap_or_else(|| legacy.video_label.clone());

    sections.apply_audio_identity(&StreamIdentity::new(
        legacy.audio_ssrc,
        &legacy.cname,
        &group_id,
        audio_label,
    ));
    sections.apply_video_identity(&StreamIdentity::new(
        legacy.video_ssrc,
        &legacy.cname,
        &group_id,
        video_label,
    ));

    sections.recompose()
}

/// Post-apply pass: fixed group id, ssrcs, cname and labels
pub(crate) fn normalize_stream_identity(body: &str, legacy: &LegacyIdentityConfig) -> String {
    let mut sections = DescriptionSections::split(body);

    sections.set_group_identifier(&legacy.group_id);
    sections.apply_audio_identity(&StreamIdentity::new(
        legacy.audio_ssrc,
        &legacy.cname,
        &legacy.group_id,
        &legacy.audio_label,
    ));
    sections.apply_video_identity(&StreamIdentity::new(
        legacy.video_ssrc,
        &legacy.cname,
        &legacy.group_id,
        &legacy.video_label,
    ));

    sections.recompose()
}
