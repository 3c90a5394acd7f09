//! Header-level stream-association group (`a=msid-semantic: WMS <id>`)

use crate::attributes::{is_msid_semantic_line, line_content, line_ending, parse_msid_semantic};

/// Group id some engines emit when no concrete stream id has been chosen
pub const WILDCARD_GROUP_ID: &str = "*";

/// The stream-association group found in a header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupIdentifier {
    /// The full attribute line, without its terminator
    pub line: String,
    /// The group id referenced by the line
    pub group_id: String,
}

impl GroupIdentifier {
    /// Whether the group id is the `*` wildcard
    pub fn is_wildcard(&self) -> bool {
        self.group_id == WILDCARD_GROUP_ID
    }
}

/// Build the `a=msid-semantic: WMS <id>` line for a group id
pub fn group_attribute_line(group_id: &str) -> String {
    format!("a=msid-semantic: WMS {}", group_id)
}

/// Extract the first stream-association group of a header
///
/// A group line without an id (`a=msid-semantic: WMS`) counts as absent.
pub fn parse_group_identifier(header: &str) -> Option<GroupIdentifier> {
    header.split_inclusive('\n').find_map(|line| {
        parse_msid_semantic(line).map(|group_id| GroupIdentifier {
            line: line_content(line).to_string(),
            group_id: group_id.to_string(),
        })
    })
}

/// Point the header's stream-association group at `group_id`
///
/// The first group line is replaced in place and any later duplicates are
/// dropped. When the header has no group line one is appended, terminated
/// like the rest of the header.
pub fn set_group_identifier(header: &str, group_id: &str) -> String {
    let eol = line_ending(header);
    let replacement = group_attribute_line(group_id);

    let mut out = String::with_capacity(header.len() + replacement.len() + eol.len());
    let mut replaced = false;
    let mut dropped = 0usize;

    for line in header.split_inclusive('\n') {
        if !is_msid_semantic_line(line) {
            out.push_str(line);
            continue;
        }

        if replaced {
            dropped += 1;
            continue;
        }

        out.push_str(&replacement);
        out.push_str(eol);
        replaced = true;
    }

    if dropped > 0 {
        tracing::debug!("Dropped {} duplicate msid-semantic lines from header", dropped);
    }

    if !replaced {
        if !out.is_empty() && !out.ends_with('\n') {
            out.push_str(eol);
        }
        out.push_str(&replacement);
        out.push_str(eol);
    }

    out
}
