//! Incremental UTF-8 decoding for byte chunks.
//!
//! The transport hands us arbitrary byte slices, so a multi-byte character can
//! straddle two chunks. [`Utf8StreamDecoder`] holds the incomplete tail back
//! and prefixes it to the next chunk instead of emitting replacement
//! characters for it.

use std::char::REPLACEMENT_CHARACTER;

/// Streaming UTF-8 decoder that carries incomplete sequences across chunks.
///
/// Invalid byte sequences decode to U+FFFD (one per maximal invalid subpart),
/// the same degradation a browser `TextDecoder` applies.
#[derive(Debug, Default, Clone)]
pub struct Utf8StreamDecoder {
    /// Bytes of a character whose remaining bytes have not arrived yet (at most 3)
    pending: Vec<u8>,
}

impl Utf8StreamDecoder {
    /// Create a decoder with no carried state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one chunk in streaming mode.
    ///
    /// Any trailing incomplete sequence is kept for the next call.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.pending);
        bytes.extend_from_slice(chunk);

        let mut out = String::with_capacity(bytes.len());
        let mut rest: &[u8] = &bytes;

        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    out.push_str(valid);
                    break;
                }
                Err(err) => {
                    let (valid, after) = rest.split_at(err.valid_up_to());
                    // `valid` was just validated, so this borrows without replacing anything
                    out.push_str(&String::from_utf8_lossy(valid));

                    match err.error_len() {
                        Some(invalid_len) => {
                            out.push(REPLACEMENT_CHARACTER);
                            rest = &after[invalid_len..];
                        }
                        None => {
                            // Incomplete sequence at the end of input
                            self.pending = after.to_vec();
                            break;
                        }
                    }
                }
            }
        }

        out
    }

    /// Flush the decoder at end of stream.
    ///
    /// A still-incomplete sequence is decoded best-effort (as U+FFFD) so
    /// trailing bytes are never dropped silently.
    pub fn finish(&mut self) -> String {
        let tail = std::mem::take(&mut self.pending);
        if tail.is_empty() {
            return String::new();
        }
        String::from_utf8_lossy(&tail).into_owned()
    }

    /// Whether an incomplete sequence is being held back.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Drop any carried state.
    pub fn reset(&mut self) {
        self.pending.clear();
    }
}
