//! Chunked, append-only storage for offsets that grow in absolute value.
//!
//! Every offset lookup in this crate funnels through [`SortedAbsoluteArray`]:
//! the lazy line index stores terminator offsets in one, and every `Sequence`
//! text node stores its cumulative child lengths in one. Values are kept in
//! fixed-capacity chunks, so appending never reallocates previously stored
//! values and never boxes individual entries, and successor search runs over
//! the chunks directly without flattening them first.
//!
//! The sign of a stored value is a side channel that never affects ordering:
//! the line index marks two-byte terminators (`\r\n`) by storing the offset
//! negated.

use serde::{Deserialize, Serialize};

use crate::error::TextError;
use crate::search::find_index_2d;

/// Chunk sizing for [`SortedAbsoluteArray`], passed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkConfig {
    chunk_len: usize,
}

impl ChunkConfig {
    /// `chunk_len` is the number of values per chunk; at least 2.
    pub const fn new(chunk_len: usize) -> ChunkConfig {
        assert!(chunk_len >= 2);
        ChunkConfig { chunk_len }
    }

    pub const fn chunk_len(&self) -> usize {
        self.chunk_len
    }
}

impl Default for ChunkConfig {
    fn default() -> ChunkConfig {
        ChunkConfig::new(32)
    }
}

/// Append-only array of values whose absolute values strictly increase.
///
/// Reads never modify the array; appending is the only mutation and existing
/// entries are never touched. `get` and `len` are O(1), `index_of` is
/// O(log n), `add` is amortized O(1).
#[derive(Debug, Clone)]
pub struct SortedAbsoluteArray {
    chunks: Vec<Vec<i64>>,
    config: ChunkConfig,
    last: Option<i64>,
}

impl SortedAbsoluteArray {
    pub fn new() -> SortedAbsoluteArray {
        SortedAbsoluteArray::with_config(ChunkConfig::default())
    }

    pub fn with_config(config: ChunkConfig) -> SortedAbsoluteArray {
        SortedAbsoluteArray {
            chunks: Vec::new(),
            config,
            last: None,
        }
    }

    /// Appends a value.
    ///
    /// Fails with `InvalidArgument` unless the value's absolute value is
    /// strictly larger than the absolute value of the last stored value. The
    /// first value may be anything, including 0.
    pub fn add(&mut self, value: i64) -> Result<(), TextError> {
        if let Some(last) = self.last {
            if value.abs() <= last.abs() {
                return Err(TextError::InvalidArgument(format!(
                    "value {value} is not larger in absolute value than the last value {last}"
                )));
            }
        }

        let chunk_len = self.config.chunk_len();
        match self.chunks.last_mut() {
            Some(chunk) if chunk.len() < chunk_len => chunk.push(value),
            _ => {
                let mut chunk = Vec::with_capacity(chunk_len);
                chunk.push(value);
                self.chunks.push(chunk);
            }
        }
        self.last = Some(value);
        Ok(())
    }

    /// Total stored count, from the chunk count and the fill level of the
    /// last chunk. All chunks except the last are always full.
    pub fn len(&self) -> usize {
        match self.chunks.last() {
            Some(last_chunk) => (self.chunks.len() - 1) * self.config.chunk_len() + last_chunk.len(),
            None => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// The most recently appended value, if any.
    pub fn last(&self) -> Option<i64> {
        self.last
    }

    /// The value at `index`, in O(1).
    pub fn get(&self, index: usize) -> Result<i64, TextError> {
        let length = self.len();
        if index >= length {
            return Err(TextError::OutOfRange(format!(
                "index {index} is out of bounds for length {length}"
            )));
        }
        let chunk_len = self.config.chunk_len();
        Ok(self.chunks[index / chunk_len][index % chunk_len])
    }

    /// Successor search: the smallest index whose stored absolute value is at
    /// least `abs(needle)`, or `len()` when every stored value is smaller.
    /// O(log n), searching the chunks directly.
    pub fn index_of(&self, needle: i64) -> usize {
        if self.chunks.is_empty() {
            return 0;
        }
        find_index_2d(
            |row, col| self.chunks[row][col].abs(),
            self.chunks.len(),
            self.config.chunk_len(),
            |row| self.chunks[row].len(),
            needle.abs(),
        )
    }

    /// Lazy iterator over the stored values in insertion order. Restartable:
    /// each call starts over from the first value.
    pub fn values(&self) -> impl Iterator<Item = i64> + '_ {
        self.chunks.iter().flat_map(|chunk| chunk.iter().copied())
    }
}

impl Default for SortedAbsoluteArray {
    fn default() -> SortedAbsoluteArray {
        SortedAbsoluteArray::new()
    }
}
