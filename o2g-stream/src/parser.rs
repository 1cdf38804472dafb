//! Newline-delimited JSON splitter for an incrementally delivered body
//!
//! The gateway appends one JSON record per line to a response that never
//! completes. Bytes arrive in arbitrary chunks, so a record may be split
//! across several deliveries; only newline-terminated records are released.

use bytes::BytesMut;
use serde_json::Value;
use tracing::warn;

/// Splits a growing response body into complete JSON records
///
/// The consumed offset only advances past complete lines. Bytes after the
/// last newline stay pending until the line is completed by a later chunk.
#[derive(Debug, Default)]
pub struct ChunkParser {
    buffer: BytesMut,
    /// Leading bytes of `buffer` already known to hold no newline
    scanned: usize,
    consumed: u64,
}

impl ChunkParser {
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::with_capacity(8192),
            scanned: 0,
            consumed: 0,
        }
    }

    /// Append a chunk and return every record it completes, in arrival order.
    ///
    /// Blank lines are consumed silently. A line that is not valid JSON is
    /// logged and dropped; it still counts as consumed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Value> {
        self.buffer.extend_from_slice(chunk);

        let mut records = Vec::new();
        while let Some(offset) = self.buffer[self.scanned..].iter().position(|&b| b == b'\n') {
            let mut line = self.buffer.split_to(self.scanned + offset + 1);
            self.scanned = 0;
            self.consumed += line.len() as u64;

            line.truncate(line.len() - 1);
            if line.last() == Some(&b'\r') {
                line.truncate(line.len() - 1);
            }

            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            match serde_json::from_slice::<Value>(&line) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(
                        "Dropping malformed event record ({} bytes): {}",
                        line.len(),
                        e
                    );
                }
            }
        }
        self.scanned = self.buffer.len();
        records
    }

    /// Number of bytes released as complete lines since the start
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Number of bytes waiting for their terminating newline
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}
