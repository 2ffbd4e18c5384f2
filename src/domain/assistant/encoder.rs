//! Server-sent-events framing for stream events.

use super::events::StreamEvent;

/// Marker preceding the JSON body of every SSE frame.
pub const SSE_DATA_PREFIX: &str = "data: ";

/// Serializes an event into one `data: {json}\n\n` frame.
///
/// `serde_json` escapes control characters inside strings, so the JSON
/// body never contains a raw newline.
pub fn encode_event(event: &StreamEvent) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(event)?;
    Ok(format!("{}{}\n\n", SSE_DATA_PREFIX, json))
}
