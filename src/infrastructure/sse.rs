// Incremental Server-Sent Events decoder
use bytes::BytesMut;

/// A complete SSE frame: event name and (joined) data lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseFrame {
    pub event: String,
    pub data: String,
}

/// Largest frame buffered while waiting for its delimiter
pub const MAX_FRAME_BYTES: usize = 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum SseDecodeError {
    #[error("invalid UTF-8 in SSE frame: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("SSE frame exceeds {0} bytes, discarding it")]
    FrameTooLarge(usize),
}

/// Buffers raw bytes and yields frames once their blank-line delimiter
/// has arrived, so UTF-8 sequences split across chunks are handled.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: BytesMut,
    /// Bytes already searched for a delimiter
    scanned: usize,
    /// Dropping the tail of an oversized frame up to its delimiter
    discarding: bool,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: &[u8]) {
        self.buffer.extend_from_slice(chunk);
    }

    /// Next complete frame, skipping comments and keep-alives.
    /// Returns None until more bytes are needed.
    pub fn next_frame(&mut self) -> Option<Result<SseFrame, SseDecodeError>> {
        loop {
            let Some((content_end, frame_end)) = self.find_boundary() else {
                return self.check_pending();
            };
            let raw = self.buffer.split_to(frame_end);
            self.scanned = 0;
            if std::mem::take(&mut self.discarding) {
                continue;
            }

            let text = match std::str::from_utf8(&raw[..content_end]) {
                Ok(text) => text,
                Err(e) => return Some(Err(e.into())),
            };

            if let Some(frame) = parse_frame(text) {
                return Some(Ok(frame));
            }
        }
    }

    /// True if unconsumed, non-whitespace bytes remain
    pub fn has_remaining(&self) -> bool {
        self.buffer.iter().any(|b| !b.is_ascii_whitespace())
    }

    /// Earliest "\n\n" or "\r\n\r\n", as (end of content, end of delimiter).
    /// Resumes a few bytes before the previous scan so a delimiter split
    /// across chunks is still found.
    fn find_boundary(&mut self) -> Option<(usize, usize)> {
        let buf = &self.buffer[..];
        let start = self.scanned.saturating_sub(3);
        let found = (start..buf.len()).find_map(|i| {
            if buf[i..].starts_with(b"\r\n\r\n") {
                Some((i, i + 4))
            } else if buf[i..].starts_with(b"\n\n") {
                Some((i, i + 2))
            } else {
                None
            }
        });
        if found.is_none() {
            self.scanned = buf.len();
        }
        found
    }

    /// Bound the undelimited tail. Only the last bytes are kept while
    /// discarding, enough to recognise a delimiter that straddles chunks.
    fn check_pending(&mut self) -> Option<Result<SseFrame, SseDecodeError>> {
        let len = self.buffer.len();
        if self.discarding {
            if len > 3 {
                let _ = self.buffer.split_to(len - 3);
                self.scanned = 3;
            }
            return None;
        }
        if len > MAX_FRAME_BYTES {
            tracing::debug!("Dropping {} undelimited SSE bytes", len);
            self.buffer.clear();
            self.scanned = 0;
            self.discarding = true;
            return Some(Err(SseDecodeError::FrameTooLarge(MAX_FRAME_BYTES)));
        }
        None
    }
}

/// The space after the colon is optional; multiple data lines join with '\n';
/// a frame without `event:` is a "message". Frames without data are dropped.
fn parse_frame(text: &str) -> Option<SseFrame> {
    let mut event = None;
    let mut data_lines: Vec<&str> = Vec::new();

    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        if let Some(rest) = line.strip_prefix("event:") {
            event = Some(rest.strip_prefix(' ').unwrap_or(rest));
        } else if let Some(rest) = line.strip_prefix("data:") {
            data_lines.push(rest.strip_prefix(' ').unwrap_or(rest));
        }
    }

    if data_lines.is_empty() {
        return None;
    }

    Some(SseFrame {
        event: event.unwrap_or("message").to_string(),
        data: data_lines.join("\n"),
    })
}
