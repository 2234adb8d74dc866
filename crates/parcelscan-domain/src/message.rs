//! Provider message shapes
//!
//! These types mirror the shape a mail provider hands back: a paged id
//! listing, then per-message headers, snippet, and a base64url-encoded body
//! (flat or multipart). They exist transiently per pipeline run and are
//! never persisted.

use serde::{Deserialize, Serialize};

/// One page of a provider message listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagePage {
    /// Message identifiers on this page
    pub ids: Vec<String>,

    /// Continuation token for the next page, if any
    pub next_page_token: Option<String>,
}

/// A single body part of a multipart message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagePart {
    /// MIME type of the part (e.g. `text/plain`)
    pub mime_type: String,

    /// Attachment filename, if this part is an attachment
    #[serde(default)]
    pub filename: Option<String>,

    /// Base64url-encoded part content
    #[serde(default)]
    pub data: Option<String>,
}

/// The body payload of a provider message: either a flat encoded body or a
/// list of parts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyPayload {
    /// Flat base64url-encoded body, for single-part messages
    #[serde(default)]
    pub data: Option<String>,

    /// Body parts, for multipart messages
    #[serde(default)]
    pub parts: Vec<MessagePart>,
}

/// A raw message as returned by the provider, headers already flattened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMessage {
    /// Provider-assigned message identifier
    pub id: String,

    /// Subject header, or the provider's placeholder when missing
    #[serde(default)]
    pub subject: String,

    /// From header
    #[serde(default)]
    pub sender: String,

    /// Short preview text
    #[serde(default)]
    pub snippet: String,

    /// Provider receipt timestamp (Unix seconds)
    #[serde(default)]
    pub internal_timestamp: i64,

    /// Encoded body payload
    #[serde(default)]
    pub body: BodyPayload,
}

/// A message that passed into the pipeline's working set: identifying
/// headers plus the decoded body text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMessage {
    /// Provider-assigned message identifier (unique)
    pub id: String,

    /// Subject line
    pub subject: String,

    /// Sender address or display name
    pub sender: String,

    /// Short preview text
    pub snippet: String,

    /// Decoded body text; may be empty when decoding failed
    pub body: String,

    /// Provider receipt timestamp (Unix seconds)
    pub received_at: i64,
}
