//! The `#photo/<identifier>` deep-link protocol.
//!
//! Identifiers are percent-encoded in the hash the way a browser location
//! stores them, so urls with spaces or a literal `%` survive the round trip.

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

pub const PHOTO_PREFIX: &str = "photo/";

/// Fragment-unsafe characters, plus `%` so encoded output always decodes back.
const HASH_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'`');

/// Extracts and decodes the identifier from a location hash.
///
/// The leading `#` is optional. The raw identifier is everything after
/// `photo/` up to the first whitespace and must not be empty. Escapes that
/// do not decode to UTF-8 reject the hash.
pub fn parse_photo_hash(hash: &str) -> Option<String> {
    let route = hash.strip_prefix('#').unwrap_or(hash);
    let rest = route.strip_prefix(PHOTO_PREFIX)?;
    let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let raw = &rest[..end];

    if raw.is_empty() {
        return None;
    }

    percent_decode_str(raw)
        .decode_utf8()
        .ok()
        .map(|identifier| identifier.into_owned())
}

pub fn photo_hash(identifier: &str) -> String {
    format!(
        "#{PHOTO_PREFIX}{}",
        utf8_percent_encode(identifier, HASH_ENCODE_SET)
    )
}
