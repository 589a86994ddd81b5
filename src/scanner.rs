#![allow(clippy::module_name_repetitions)]
//! Forward-only marker search over the launcher's own executable image.
//!
//! The image may carry a multi-gigabyte archive after the embedded command
//! block, so the scanner never holds more than `2 × marker length` bytes: a
//! small window is filled one byte at a time from a buffered reader and its
//! first half is dropped whenever it fills up.

use std::fs::File;
use std::io::{BufReader, Bytes, Read};
use std::path::Path;

use crate::errors::LaunchError;

/// Start of the embedded command block.
///
/// Kept as a `static` so the compiled launcher carries exactly one copy of the
/// literal; that copy is the first occurrence `extract_payload` skips.
pub static BEGIN_MARKER: [u8; 18] = *b"#!/batrunner begin";

/// End of the embedded command block.
pub static END_MARKER: [u8; 16] = *b"#!/batrunner end";

pub struct PayloadScanner<R: Read> {
    bytes: Bytes<BufReader<R>>,
    window: Vec<u8>,
    half: usize,
    // Position in `window` where the next match attempt starts.
    cursor: usize,
    text: Vec<u8>,
    eof: bool,
}

impl<R: Read> PayloadScanner<R> {
    pub fn new(reader: R, max_marker_len: usize) -> Self {
        let half = max_marker_len.max(1);
        Self {
            bytes: BufReader::new(reader).bytes(),
            window: Vec::with_capacity(half * 2),
            half,
            cursor: 0,
            text: Vec::new(),
            eof: false,
        }
    }

    /// Advance until `marker` has been consumed from the stream.
    ///
    /// Returns `true` with the cursor just past the match, or `false` once the
    /// stream is exhausted. With `accumulate`, every byte the cursor steps
    /// over is appended to the extracted text; matched marker bytes never are.
    pub fn search(&mut self, marker: &[u8], accumulate: bool) -> bool {
        if marker.len() > self.half {
            self.half = marker.len();
            self.window.reserve(self.half * 2 - self.window.len());
        }
        let capacity = self.half * 2;

        while !self.eof {
            let mut pos = 0usize;
            let mut at = self.cursor;
            let mut matched = true;

            while pos < marker.len() {
                if at >= self.window.len() {
                    let Some(byte) = self.next_byte() else {
                        self.eof = true;
                        matched = false;
                        break;
                    };
                    if self.window.len() >= capacity {
                        // cursor > half here: at - cursor < marker.len() <= half
                        self.window.drain(..self.half);
                        at -= self.half;
                        self.cursor -= self.half;
                    }
                    self.window.push(byte);
                }
                if self.window[at] != marker[pos] {
                    if accumulate {
                        self.text.push(self.window[self.cursor]);
                    }
                    self.cursor += 1;
                    matched = false;
                    break;
                }
                pos += 1;
                at += 1;
            }

            if matched {
                self.cursor = at;
                tracing::debug!(
                    marker = %String::from_utf8_lossy(marker),
                    "marker found"
                );
                return true;
            }
        }

        tracing::debug!(
            marker = %String::from_utf8_lossy(marker),
            "end of stream reached before marker"
        );
        false
    }

    fn next_byte(&mut self) -> Option<u8> {
        match self.bytes.next()? {
            Ok(b) => Some(b),
            Err(e) => {
                tracing::debug!(error = %e, "read failed; treating as end of stream");
                None
            }
        }
    }

    pub fn is_eof(&self) -> bool {
        self.eof
    }

    pub fn text(&self) -> &[u8] {
        &self.text
    }

    pub fn into_text(self) -> Vec<u8> {
        self.text
    }

    /// Bytes currently buffered; never exceeds `window_capacity()`.
    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    pub fn window_capacity(&self) -> usize {
        self.half * 2
    }
}

/// Extract the command block: skip the first begin marker (the launcher's own
/// copy of the literal), match the second, then accumulate until the end marker.
pub fn extract_payload<R: Read>(reader: R) -> Result<Vec<u8>, LaunchError> {
    let max = BEGIN_MARKER.len().max(END_MARKER.len());
    let mut scanner = PayloadScanner::new(reader, max);

    for _ in 0..2 {
        if !scanner.search(&BEGIN_MARKER, false) {
            return Err(LaunchError::payload_not_found(&BEGIN_MARKER));
        }
    }
    if !scanner.search(&END_MARKER, true) {
        return Err(LaunchError::payload_not_found(&END_MARKER));
    }

    let text = scanner.into_text();
    tracing::debug!(len = text.len(), "payload extracted");
    Ok(text)
}

/// An unreadable self-image is reported like an empty one: the begin marker is missing.
pub fn extract_payload_from_file(path: &Path) -> Result<Vec<u8>, LaunchError> {
    match File::open(path) {
        Ok(f) => extract_payload(f),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "cannot open self-image");
            Err(LaunchError::payload_not_found(&BEGIN_MARKER))
        }
    }
}
