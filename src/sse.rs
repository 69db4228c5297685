//! SSE (Server-Sent Events) decoding.
//!
//! Handles format variations (e.g. `data:{...}` vs `data: {...}`), events split
//! across network chunks, and multi-line `data:` fields.

use serde_json::Value;
use thiserror::Error;

/// Upper bound on buffered, not-yet-terminated event bytes.
pub const MAX_BUFFER_BYTES: usize = 4 * 1024 * 1024;

/// A decoded SSE event carrying a JSON payload.
#[derive(Debug, Clone, PartialEq)]
pub struct SseEvent {
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SseError {
    #[error("invalid UTF-8 in event stream")]
    InvalidUtf8,
    #[error("invalid JSON in event stream: {0}")]
    InvalidJson(String),
    /// Buffer grew past [`MAX_BUFFER_BYTES`] without an event boundary.
    #[error("event exceeded {} bytes", MAX_BUFFER_BYTES)]
    Overflow,
}

/// Incremental decoder: feed raw chunks, get back complete events.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and return every event completed by it.
    ///
    /// `[DONE]` markers, comments, and events without `data:` are skipped.
    pub fn push(&mut self, chunk: &[u8]) -> Result<Vec<SseEvent>, SseError> {
        self.buffer.extend_from_slice(chunk);
        let mut events = Vec::new();
        while let Some(raw) = drain_next_event(&mut self.buffer) {
            if let Some(event) = decode_event(&raw)? {
                events.push(event);
            }
        }
        if self.buffer.len() > MAX_BUFFER_BYTES {
            return Err(SseError::Overflow);
        }
        Ok(events)
    }

    /// Flush a trailing event that was not followed by a blank line.
    pub fn finish(&mut self) -> Result<Option<SseEvent>, SseError> {
        let raw = std::mem::take(&mut self.buffer);
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        decode_event(&raw)
    }
}

/// Parse a complete SSE body into events.
pub fn parse_sse_events(bytes: &[u8]) -> Result<Vec<SseEvent>, SseError> {
    let mut decoder = SseDecoder::new();
    let mut events = decoder.push(bytes)?;
    events.extend(decoder.finish()?);
    Ok(events)
}

/// Remove the next blank-line-terminated event from the front of `buffer`.
fn drain_next_event(buffer: &mut Vec<u8>) -> Option<Vec<u8>> {
    let (end, sep_len) = find_boundary(buffer)?;
    let event = buffer[..end].to_vec();
    buffer.drain(..end + sep_len);
    Some(event)
}

fn find_boundary(buffer: &[u8]) -> Option<(usize, usize)> {
    let lf = buffer.windows(2).position(|w| w == b"\n\n").map(|i| (i, 2));
    let crlf = buffer
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .map(|i| (i, 4));
    match (lf, crlf) {
        (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
        (a, b) => a.or(b),
    }
}

fn decode_event(raw: &[u8]) -> Result<Option<SseEvent>, SseError> {
    let text = std::str::from_utf8(raw).map_err(|_| SseError::InvalidUtf8)?;
    let Some(data) = extract_data(text) else {
        return Ok(None);
    };
    let data = data.trim();
    if data.is_empty() || data == "[DONE]" {
        return Ok(None);
    }
    let json: Value =
        serde_json::from_str(data).map_err(|e| SseError::InvalidJson(e.to_string()))?;
    Ok(Some(SseEvent { data: json }))
}

/// Join the `data:` lines of one event; other fields are ignored.
fn extract_data(event: &str) -> Option<String> {
    let mut data = String::new();
    let mut found = false;

    for line in event.lines() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if let Some(rest) = line.strip_prefix("data:") {
            let rest = rest.strip_prefix(' ').unwrap_or(rest);
            if found {
                data.push('\n');
            }
            data.push_str(rest);
            found = true;
        }
    }

    found.then_some(data)
}
