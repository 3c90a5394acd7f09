//! Attribute line recognizers
//!
//! Only the handful of attribute forms the rewriter touches are recognized here:
//!
//! - `a=ssrc:<integer> <key>:<value>`
//! - `a=msid:<value> <value>`
//! - `a=msid-semantic: WMS <value>`
//!
//! Recognizers take a single line with or without its terminator. Values are
//! parsed with `nom` the same way the SIP stack parses SDP attribute values.

use nom::{
    bytes::complete::{tag, tag_no_case, take_till1},
    character::complete::{char, digit1, space0, space1},
    combinator::map_res,
    IResult,
};

/// Prefix of every ssrc-scoped attribute line
pub const SSRC_PREFIX: &str = "a=ssrc:";

/// Prefix of the media-level stream-association line
pub const MSID_PREFIX: &str = "a=msid:";

/// Prefix of the header-level stream-association-group line
pub const MSID_SEMANTIC_PREFIX: &str = "a=msid-semantic:";

/// A parsed `a=ssrc:<ssrc> <key>:<value>` line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SsrcAttribute<'a> {
    pub ssrc: u32,
    pub key: &'a str,
    pub value: &'a str,
}

/// Strip the `\n` or `\r\n` terminator from a line
pub fn line_content(line: &str) -> &str {
    line.trim_end_matches(|c| c == '\r' || c == '\n')
}

/// The line terminator a piece of text uses; `\n` unless it carries CRLF
pub fn line_ending(text: &str) -> &'static str {
    if text.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

/// Whether a line is an ssrc-scoped attribute (`a=ssrc:`, not `a=ssrc-group:`)
pub fn is_ssrc_line(line: &str) -> bool {
    line_content(line).starts_with(SSRC_PREFIX)
}

/// Whether a line is a media-level stream association (`a=msid:`, not `a=msid-semantic:`)
pub fn is_msid_line(line: &str) -> bool {
    line_content(line).starts_with(MSID_PREFIX)
}

/// Whether a line is the header-level stream-association-group attribute
pub fn is_msid_semantic_line(line: &str) -> bool {
    let content = line_content(line);
    content.len() >= MSID_SEMANTIC_PREFIX.len()
        && content.is_char_boundary(MSID_SEMANTIC_PREFIX.len())
        && content[..MSID_SEMANTIC_PREFIX.len()].eq_ignore_ascii_case(MSID_SEMANTIC_PREFIX)
}

fn ssrc_attribute(input: &str) -> IResult<&str, SsrcAttribute<'_>> {
    let (input, _) = tag(SSRC_PREFIX)(input)?;
    let (input, ssrc) = map_res(digit1, |digits: &str| digits.parse::<u32>())(input)?;
    let (input, _) = space1(input)?;
    let (input, key) = take_till1(|c: char| c == ':' || c.is_whitespace())(input)?;
    let (input, _) = char(':')(input)?;
    let (input, value) = take_till1(|c: char| c.is_whitespace())(input)?;

    Ok((input, SsrcAttribute { ssrc, key, value }))
}

fn msid_semantic(input: &str) -> IResult<&str, &str> {
    let (input, _) = tag_no_case(MSID_SEMANTIC_PREFIX)(input)?;
    let (input, _) = space0(input)?;
    let (input, _) = tag_no_case("WMS")(input)?;
    let (input, _) = space1(input)?;
    take_till1(|c: char| c.is_whitespace())(input)
}

/// Parse an `a=ssrc:<ssrc> <key>:<value>` line
///
/// Returns `None` for anything else, including ssrc lines whose value is not
/// a `key:value` pair.
///
/// # Examples
///
/// ```
/// use rtcpeer_sdp_core::attributes::parse_ssrc_attribute;
///
/// let attr = parse_ssrc_attribute("a=ssrc:1000 cname:CHROME0000\r\n").unwrap();
/// assert_eq!(attr.ssrc, 1000);
/// assert_eq!(attr.key, "cname");
/// assert_eq!(attr.value, "CHROME0000");
/// ```
pub fn parse_ssrc_attribute(line: &str) -> Option<SsrcAttribute<'_>> {
    ssrc_attribute(line_content(line)).ok().map(|(_, attr)| attr)
}

/// Parse the group id out of an `a=msid-semantic: WMS <id>` line
///
/// # Examples
///
/// ```
/// use rtcpeer_sdp_core::attributes::parse_msid_semantic;
///
/// assert_eq!(parse_msid_semantic("a=msid-semantic: WMS *"), Some("*"));
/// assert_eq!(parse_msid_semantic("a=msid-semantic: WMS"), None);
/// ```
pub fn parse_msid_semantic(line: &str) -> Option<&str> {
    msid_semantic(line_content(line)).ok().map(|(_, id)| id)
}
