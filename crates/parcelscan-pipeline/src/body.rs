//! Message body decoding
//!
//! Providers hand bodies back base64url-encoded, either flat or as a
//! multipart list. Decoding prefers the first `text/plain` part, falls back
//! to the flat payload, and degrades to an empty string on any failure -
//! an undecodable body never fails the message.

use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use parcelscan_domain::BodyPayload;
use tracing::debug;

/// Decode a message body payload to plain text.
pub fn decode_message_body(body: &BodyPayload) -> String {
    for part in &body.parts {
        if part.mime_type == "text/plain" {
            if let Some(data) = &part.data {
                if let Some(text) = decode_part(data) {
                    return text;
                }
            }
        }
    }

    if let Some(data) = &body.data {
        if let Some(text) = decode_part(data) {
            return text;
        }
    }

    debug!("no decodable body part, treating body as empty");
    String::new()
}

fn decode_part(data: &str) -> Option<String> {
    // Providers are inconsistent about padding
    let bytes = URL_SAFE
        .decode(data.as_bytes())
        .or_else(|_| URL_SAFE_NO_PAD.decode(data.as_bytes()))
        .ok()?;
    String::from_utf8(bytes).ok().map(|s| s.trim().to_string())
}
