//! SSE line decoder and relay
//!
//! The MISO chat endpoint answers with a chunked SSE body whose chunk
//! boundaries fall anywhere, including mid-line. The relay re-frames that
//! body so the browser only ever sees complete `data: ` events: a
//! one-state line decoder accumulates the trailing partial line across
//! reads and emits on newline, independent of any runtime streaming
//! primitive.

use std::convert::Infallible;

use bytes::Bytes;
use futures::{Stream, StreamExt};

use crate::ByteStream;

/// Prefix of the lines forwarded downstream; everything else (event names,
/// comments, blank framing lines) is dropped and re-framed on emit.
const DATA_PREFIX: &str = "data: ";

/// Line-oriented SSE decoder.
///
/// State: the accumulated partial line. Transition: emit on `\n`.
#[derive(Debug, Default)]
pub struct SseLineDecoder {
    carry: String,
}

impl SseLineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one upstream chunk; returns every complete `data: ` line it
    /// closed, in order. The trailing partial line stays buffered.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.carry.push_str(&String::from_utf8_lossy(chunk));

        let mut lines = Vec::new();
        while let Some(pos) = self.carry.find('\n') {
            let line: String = self.carry.drain(..=pos).collect();
            let line = line.trim_end_matches(['\n', '\r']);
            if line.starts_with(DATA_PREFIX) {
                lines.push(line.to_string());
            }
        }
        lines
    }

    /// Flush the retained final line, if it is a `data: ` line. Called on
    /// clean upstream end only: a line cut off by a failed read is not a
    /// complete event.
    pub fn finish(self) -> Option<String> {
        let line = self.carry.trim_end_matches('\r');
        if line.starts_with(DATA_PREFIX) {
            Some(line.to_string())
        } else {
            None
        }
    }
}

/// Adapt an upstream SSE byte stream into an outgoing body stream of
/// complete, two-newline-framed `data: ` events.
///
/// The outgoing stream always terminates cleanly: an upstream read error is
/// logged and the relay closes (the client sees end-of-stream, not a
/// transport error). Dropping the returned stream drops the upstream
/// request with it.
pub fn relay(upstream: ByteStream) -> impl Stream<Item = Result<Bytes, Infallible>> {
    async_stream::stream! {
        let mut upstream = upstream;
        let mut decoder = SseLineDecoder::new();
        let mut failed = false;

        while let Some(next) = upstream.next().await {
            match next {
                Ok(chunk) => {
                    for line in decoder.feed(&chunk) {
                        yield Ok(Bytes::from(format!("{line}\n\n")));
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Upstream SSE read failed, closing relay");
                    failed = true;
                    break;
                }
            }
        }

        if !failed {
            if let Some(line) = decoder.finish() {
                yield Ok(Bytes::from(format!("{line}\n\n")));
            }
        }
    }
}
