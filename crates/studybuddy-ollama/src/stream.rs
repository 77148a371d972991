//! Incremental decoding of newline-delimited JSON response bodies.

use std::collections::VecDeque;

use futures_util::stream::{self, Stream, StreamExt};
use tracing::trace;

use crate::error::OllamaError;
use crate::types::GenerateChunk;

/// Splits a byte stream into complete lines.
///
/// Network chunks do not respect line boundaries, so partial lines are held
/// back until the rest arrives.
#[derive(Debug, Default)]
pub(crate) struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    /// Feed bytes in, get back every line they complete.
    pub(crate) fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(bytes);

        let mut lines = Vec::new();
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);
            let line = line.trim();
            if !line.is_empty() {
                lines.push(line.to_string());
            }
        }
        lines
    }

    /// Whatever is left once the body has ended.
    pub(crate) fn finish(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.pending);
        let rest = String::from_utf8_lossy(&rest);
        let rest = rest.trim();
        if rest.is_empty() {
            None
        } else {
            Some(rest.to_string())
        }
    }
}

fn parse_line(line: &str) -> Result<GenerateChunk, OllamaError> {
    trace!("generate line: {}", line);
    let chunk: GenerateChunk = serde_json::from_str(line)?;
    match chunk.error {
        Some(error) => Err(OllamaError::Api(error)),
        None => Ok(chunk),
    }
}

struct DecodeState<S> {
    body: S,
    lines: LineBuffer,
    ready: VecDeque<String>,
    finished: bool,
}

/// Turn a streaming response body into a stream of generate chunks.
///
/// A transport error ends the stream after it has been yielded.
pub(crate) fn decode_chunks<S, B, E>(
    body: S,
) -> impl Stream<Item = Result<GenerateChunk, OllamaError>>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: Into<OllamaError>,
{
    let state = DecodeState {
        body,
        lines: LineBuffer::default(),
        ready: VecDeque::new(),
        finished: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(line) = state.ready.pop_front() {
                return Some((parse_line(&line), state));
            }
            if state.finished {
                return None;
            }
            match state.body.next().await {
                Some(Ok(bytes)) => {
                    let lines = state.lines.push(bytes.as_ref());
                    state.ready.extend(lines);
                }
                Some(Err(e)) => {
                    state.finished = true;
                    state.ready.clear();
                    return Some((Err(e.into()), state));
                }
                None => {
                    state.finished = true;
                    state.ready.extend(state.lines.finish());
                }
            }
        }
    })
}
