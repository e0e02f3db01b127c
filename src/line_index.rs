//! Lazy discovery of line terminators over immutable byte content.
//!
//! # Overview
//! A [`LineIndex`] owns a byte buffer and finds its line terminators
//! incrementally: nothing is scanned at construction, and every query only
//! advances an internal cursor as far as it needs. The intention is that most
//! of the content is never scanned at all. Discovered terminator offsets go
//! into a [`SortedAbsoluteArray`], so line lookups by offset are successor
//! searches over chunks rather than scans.
//!
//! # Terminators
//! Three styles are recognized while scanning bytes one at a time:
//! - `\n` alone records its own offset,
//! - `\r` immediately followed by `\n` consumes both bytes and records the
//!   offset of the `\n`, negated: the sign encodes "two-byte terminator"
//!   without a separate flag field,
//! - a lone `\r` records its own offset.
//!
//! # Invariants
//! - The recorded offsets are a prefix of the true terminator set of the
//!   content, in ascending order.
//! - The scan cursor never exceeds the content length and never regresses;
//!   once `cursor == len()` the index is fully scanned, a terminal state.
//! - All index and offset values are 0-based.
//!
//! Scanning methods take `&mut self`; a `LineIndex` is confined to one owner
//! or externally synchronized, never mutated concurrently.

use tracing::trace;

use crate::error::TextError;
use crate::sorted_array::{ChunkConfig, SortedAbsoluteArray};

/// Incremental line index over an immutable byte buffer.
pub struct LineIndex {
    content: Vec<u8>,
    terminators: SortedAbsoluteArray,
    /// Next byte to examine; monotonically non-decreasing.
    cursor: usize,
    /// Absolute offset of the last recorded terminator, 0 when none.
    last_seen: usize,
}

impl LineIndex {
    pub fn new(content: impl Into<Vec<u8>>) -> LineIndex {
        LineIndex::with_config(content, ChunkConfig::default())
    }

    /// Like [`LineIndex::new`] with explicit chunk sizing for the terminator
    /// array.
    pub fn with_config(content: impl Into<Vec<u8>>, config: ChunkConfig) -> LineIndex {
        LineIndex {
            content: content.into(),
            terminators: SortedAbsoluteArray::with_config(config),
            cursor: 0,
            last_seen: 0,
        }
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Number of terminators discovered so far. Not the logical line count
    /// unless the index is fully scanned.
    pub fn known_line_count(&self) -> usize {
        self.terminators.len()
    }

    pub fn is_fully_scanned(&self) -> bool {
        self.cursor >= self.content.len()
    }

    /// Total number of lines; forces a full scan.
    pub fn line_count(&mut self) -> usize {
        self.process_all_lines();
        self.known_line_count() + 1
    }

    /// Scans until the line containing `offset` is complete: the scan stops
    /// once a terminator at or beyond `offset` has been recorded, or the
    /// content is exhausted. Idempotent for already-satisfied targets.
    pub fn process_lines_to_offset(&mut self, offset: usize) {
        self.process_up_to(offset, usize::MAX);
    }

    /// Scans until `line_count` terminators are known or the content is
    /// exhausted. Idempotent for already-satisfied targets.
    pub fn process_to_line_count(&mut self, line_count: usize) {
        self.process_up_to(usize::MAX, line_count);
    }

    /// Scans to the end of the content.
    pub fn process_all_lines(&mut self) {
        self.process_to_line_count(usize::MAX);
    }

    /// The single resumable scan loop behind every `process_*` call.
    fn process_up_to(&mut self, offset_target: usize, line_target: usize) {
        let length = self.content.len();
        let offset_target = offset_target.min(length);
        let start_cursor = self.cursor;
        let mut known = self.known_line_count();

        while self.last_seen < offset_target && known < line_target && self.cursor < length {
            match self.content[self.cursor] {
                b'\r' => {
                    if self.content.get(self.cursor + 1) == Some(&b'\n') {
                        self.cursor += 1;
                        self.record(-(self.cursor as i64));
                    } else {
                        self.record(self.cursor as i64);
                    }
                    known += 1;
                }
                b'\n' => {
                    self.record(self.cursor as i64);
                    known += 1;
                }
                _ => {}
            }
            self.cursor += 1;
        }

        if self.cursor > start_cursor {
            trace!(
                "line scan advanced from offset {} to {} ({} terminators known)",
                start_cursor,
                self.cursor,
                known
            );
        }
    }

    fn record(&mut self, raw: i64) {
        if let Err(err) = self.terminators.add(raw) {
            panic!("bug: terminator offsets always increase: {err}");
        }
        self.last_seen = raw.unsigned_abs() as usize;
    }

    /// The terminator entry for `line` as stored: negative for a two-byte
    /// terminator, the content length for the final line.
    fn raw_end_offset(&mut self, line: usize) -> Result<i64, TextError> {
        self.process_to_line_count(line.saturating_add(1));
        if self.is_fully_scanned() {
            let line_count = self.known_line_count() + 1;
            if line >= line_count {
                return Err(TextError::OutOfRange(format!(
                    "line {line} is out of bounds for line count {line_count}"
                )));
            }
        }
        if line == self.known_line_count() {
            Ok(self.content.len() as i64)
        } else {
            self.terminators.get(line)
        }
    }

    /// Start offset of `line`; 0 for line 0. Scans on demand.
    pub fn start_offset(&mut self, line: usize) -> Result<usize, TextError> {
        if line == 0 {
            return Ok(0);
        }
        let raw = self.raw_end_offset(line - 1)?;
        if self.is_fully_scanned() && line > self.known_line_count() {
            return Err(TextError::OutOfRange(format!(
                "line {line} is out of bounds for line count {}",
                self.known_line_count() + 1
            )));
        }
        Ok(raw.unsigned_abs() as usize + 1)
    }

    /// End offset of `line`, excluding its terminator. Scans on demand.
    pub fn end_offset(&mut self, line: usize) -> Result<usize, TextError> {
        let raw = self.raw_end_offset(line)?;
        if raw < 0 {
            Ok((-raw - 1) as usize)
        } else {
            Ok(raw as usize)
        }
    }

    /// The bytes of `line`, excluding its terminator.
    pub fn line(&mut self, line: usize) -> Result<&[u8], TextError> {
        let start = self.start_offset(line)?;
        let end = self.end_offset(line)?;
        Ok(&self.content[start..end])
    }

    /// The bytes of `line` including its terminator exactly as it appears in
    /// the content (`\n`, `\r`, or `\r\n`); the final line has none.
    pub fn line_with_terminator(&mut self, line: usize) -> Result<&[u8], TextError> {
        let start = self.start_offset(line)?;
        let raw = self.raw_end_offset(line)?;
        let end = if line == self.known_line_count() {
            self.content.len()
        } else {
            raw.unsigned_abs() as usize + 1
        };
        Ok(&self.content[start..end])
    }

    /// Decoded terminator offsets in ascending order; forces a full scan.
    pub fn newline_offsets(&mut self) -> impl Iterator<Item = usize> + '_ {
        self.process_all_lines();
        self.terminators.values().map(|raw| raw.unsigned_abs() as usize)
    }

    /// 0-based line number containing `offset`. Scans as needed; offsets at
    /// or beyond the content length map to the last line.
    pub fn line_number_at_offset(&mut self, offset: usize) -> usize {
        self.process_lines_to_offset(offset);
        if self.terminators.is_empty() {
            return 0;
        }
        if offset >= self.content.len() {
            return self.line_count() - 1;
        }
        self.terminators.index_of(offset as i64)
    }

    /// The line containing `offset`, without its terminator.
    pub fn line_at_offset(&mut self, offset: usize) -> Result<&[u8], TextError> {
        let line = self.line_number_at_offset(offset);
        self.line(line)
    }

    /// Pull-based iterator over the lines, without terminators. The scan
    /// advances only as far as the iterator is consumed; calling `lines()`
    /// again restarts from the first line.
    pub fn lines(&mut self) -> Lines<'_> {
        Lines {
            index: self,
            next_line: 0,
            with_terminators: false,
        }
    }

    /// Like [`LineIndex::lines`], including each line's terminator.
    pub fn lines_with_terminators(&mut self) -> Lines<'_> {
        Lines {
            index: self,
            next_line: 0,
            with_terminators: true,
        }
    }
}

impl std::fmt::Debug for LineIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineIndex")
            .field("len", &self.content.len())
            .field("cursor", &self.cursor)
            .field("known_line_count", &self.known_line_count())
            .finish()
    }
}

/// Iterator returned by [`LineIndex::lines`] and
/// [`LineIndex::lines_with_terminators`]. Yields owned line buffers and
/// stops after the final line.
pub struct Lines<'a> {
    index: &'a mut LineIndex,
    next_line: usize,
    with_terminators: bool,
}

impl Iterator for Lines<'_> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Vec<u8>> {
        let line = self.next_line;
        self.index.process_to_line_count(line.saturating_add(1));
        if self.index.is_fully_scanned() && line > self.index.known_line_count() {
            return None;
        }
        self.next_line += 1;
        let bytes = if self.with_terminators {
            self.index.line_with_terminator(line)
        } else {
            self.index.line(line)
        };
        bytes.ok().map(<[u8]>::to_vec)
    }
}
