//! Gzip + NDJSON bounded reader.
//!
//! The object body is decompressed incrementally and read line by line, so
//! memory stays at one buffer plus one line no matter how large the object is.
//!
//! End of stream is checked before a line is parsed: a trailing newline never
//! yields an extra record, while a last line without a newline is still parsed.
//! Blank lines are skipped and do not count toward the record cap.

use async_compression::tokio::bufread::GzipDecoder;
use lm_error::{LmError, Result};
use lm_traits::ObjectFetcher;
use lm_types::DataRecord;
use std::fmt;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, BufReader, ReadBuf};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Buffer size for the decompressed line reader.
const LINE_BUFFER_CAPACITY: usize = 8192;

/// Open `key` and read up to `max_records` records from it.
///
/// The object body is owned by this call and released on every return path.
///
/// # Errors
///
/// - [`LmError::Get`] if the object cannot be opened or its body fails mid-read
/// - [`LmError::Decompress`] if the body is not valid gzip
/// - [`LmError::Parse`] if a line is not a valid record
/// - [`LmError::Cancelled`] if `cancel` fires first
pub async fn read_records<F>(
    fetcher: &F,
    bucket: &str,
    key: &str,
    max_records: usize,
    cancel: &CancellationToken,
) -> Result<Vec<DataRecord>>
where
    F: ObjectFetcher + ?Sized,
{
    info!(
        bucket = bucket,
        key = key,
        max_records = max_records,
        "Reading records"
    );

    let body = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(LmError::Cancelled("open")),
        body = fetcher.open(bucket, key) => body?,
    };

    let records = read_records_from(body, max_records, cancel).await?;

    debug!(key = key, records = records.len(), "Read records");

    Ok(records)
}

/// Decompress `body` as gzip and parse up to `max_records` NDJSON lines.
///
/// Concatenated gzip members are read as one stream.
pub async fn read_records_from<R>(
    body: R,
    max_records: usize,
    cancel: &CancellationToken,
) -> Result<Vec<DataRecord>>
where
    R: AsyncBufRead + Unpin,
{
    let mut decoder = GzipDecoder::new(BodyReader { inner: body });
    decoder.multiple_members(true);
    let mut reader = BufReader::with_capacity(LINE_BUFFER_CAPACITY, decoder);

    let mut records = Vec::with_capacity(max_records.min(64));
    let mut line = Vec::new();
    let mut line_number = 0usize;

    while records.len() < max_records {
        line.clear();

        let bytes_read = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(LmError::Cancelled("read")),
            read = reader.read_until(b'\n', &mut line) => read.map_err(read_error)?,
        };

        if bytes_read == 0 {
            break;
        }
        line_number += 1;

        let trimmed = line.trim_ascii();
        if trimmed.is_empty() {
            continue;
        }

        let record: DataRecord =
            serde_json::from_slice(trimmed).map_err(|e| LmError::Parse {
                line: line_number,
                message: e.to_string(),
            })?;
        records.push(record);
    }

    Ok(records)
}

/// Map an I/O failure from the decoder stack.
///
/// Failures of the raw body were tagged by [`BodyReader`]; everything else
/// comes from the gzip decoder.
fn read_error(e: io::Error) -> LmError {
    if e.get_ref().is_some_and(|inner| inner.is::<BodyError>()) {
        LmError::Get(format!("failed reading object body: {e}"))
    } else {
        LmError::Decompress(e.to_string())
    }
}

#[derive(Debug)]
struct BodyError(io::Error);

impl fmt::Display for BodyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for BodyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

fn tag_body_error(e: io::Error) -> io::Error {
    io::Error::new(e.kind(), BodyError(e))
}

/// Passes the object body through, tagging its I/O errors.
struct BodyReader<R> {
    inner: R,
}

impl<R: AsyncRead + Unpin> AsyncRead for BodyReader<R> {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner)
            .poll_read(cx, buf)
            .map_err(tag_body_error)
    }
}

impl<R: AsyncBufRead + Unpin> AsyncBufRead for BodyReader<R> {
    fn poll_fill_buf(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<&[u8]>> {
        Pin::new(&mut self.get_mut().inner)
            .poll_fill_buf(cx)
            .map_err(tag_body_error)
    }

    fn consume(mut self: Pin<&mut Self>, amt: usize) {
        Pin::new(&mut self.inner).consume(amt)
    }
}
