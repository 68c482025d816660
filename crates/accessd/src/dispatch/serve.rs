//! JSONL serve loop over any buffered reader and writer.

use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use super::DISPATCH_TARGET;
use super::dispatcher::Dispatcher;
use super::errors::ServeError;
use super::response::{ResponseEnvelope, ResponseStatus, ResponseWriter};

/// Counters reported when the input stream ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ServeSummary {
    /// Requests answered with a success response.
    pub succeeded: usize,
    /// Requests answered with an error response.
    pub rejected: usize,
    /// Requests answered with an incident response.
    pub incidents: usize,
}

impl ServeSummary {
    /// Total number of responses written.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.succeeded + self.rejected + self.incidents
    }

    fn record(&mut self, response: &ResponseEnvelope) {
        match response.status {
            ResponseStatus::Success => self.succeeded += 1,
            ResponseStatus::Error => self.rejected += 1,
            ResponseStatus::Incident => self.incidents += 1,
        }
    }
}

enum Line {
    Complete,
    Oversized(usize),
    Eof,
}

/// Answers one response line per non-blank request line until `reader` is
/// exhausted.
///
/// Lines longer than `max_request_bytes` are answered with an invalid
/// envelope error without being parsed.
///
/// # Errors
///
/// Returns [`ServeError`] when reading or writing fails. Request failures are
/// answered in-band and never end the loop.
pub fn serve<R, W>(
    dispatcher: &Dispatcher,
    mut reader: R,
    output: W,
    max_request_bytes: usize,
) -> Result<ServeSummary, ServeError>
where
    R: BufRead,
    W: Write,
{
    let mut writer = ResponseWriter::new(output);
    let mut summary = ServeSummary::default();
    let mut buffer = Vec::new();

    loop {
        buffer.clear();
        let response = match read_line(&mut reader, &mut buffer, max_request_bytes)? {
            Line::Eof => break,
            Line::Oversized(size) => {
                warn!(
                    target: DISPATCH_TARGET,
                    size,
                    limit = max_request_bytes,
                    "request too large"
                );
                dispatcher.reject_oversized(size, max_request_bytes)
            }
            Line::Complete if buffer.trim_ascii().is_empty() => continue,
            Line::Complete => dispatcher.dispatch(&buffer),
        };
        summary.record(&response);
        writer.write_response(&response)?;
    }

    debug!(
        target: DISPATCH_TARGET,
        total = summary.total(),
        incidents = summary.incidents,
        "input stream closed"
    );
    Ok(summary)
}

/// Reads up to and including the next newline. Content beyond `limit` bytes
/// is discarded but still consumed so the next line starts cleanly.
fn read_line<R: BufRead>(reader: &mut R, buffer: &mut Vec<u8>, limit: usize) -> io::Result<Line> {
    let mut size = 0_usize;
    let mut seen_any = false;

    loop {
        let available = match reader.fill_buf() {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
            Err(error) => return Err(error),
        };

        if available.is_empty() {
            return Ok(finish(seen_any, size, limit));
        }
        seen_any = true;

        let newline = available.iter().position(|byte| *byte == b'\n');
        let consumed = newline.map_or(available.len(), |position| position + 1);
        let content = newline.unwrap_or(available.len());

        size = size.saturating_add(content);
        if size <= limit {
            buffer.extend(available.iter().take(content));
        }
        reader.consume(consumed);

        if newline.is_some() {
            return Ok(finish(seen_any, size, limit));
        }
    }
}

const fn finish(seen_any: bool, size: usize, limit: usize) -> Line {
    if !seen_any {
        Line::Eof
    } else if size > limit {
        Line::Oversized(size)
    } else {
        Line::Complete
    }
}
