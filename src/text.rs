//! Immutable text tree: `Str` leaves, `Part` windows and `Sequence`
//! concatenations.
//!
//! # Overview
//! [`Text`] is a persistent, rope-like representation of a byte sequence.
//! A node is one of a closed set of three variants and is never mutated
//! after construction; "with"-style operations build new nodes that share
//! unmodified subtrees through `Arc`. Construction never copies byte data:
//! a `Part` is a window into another text, and a `Sequence` holds handles
//! to its children plus a [`SortedAbsoluteArray`] of cumulative lengths so
//! `byte_at` can find the owning child in O(log k) without walking the
//! children.
//!
//! `sub_sequence` is O(1) for every variant: it wraps the receiver in a
//! `Part` (composing windows rather than nesting them) instead of
//! decomposing a concatenation into per-child sub-ranges, deferring that
//! cost to `byte_at`.
//!
//! Once built, every node is read-only and may be shared and read from
//! multiple threads without synchronization.
//!
//! # Equality
//! Equality and hashing are structural over the fully rendered byte form:
//! two texts are equal iff their flattened bytes are equal, whatever their
//! tree shapes. This trades performance for simplicity; both walk the tree
//! and allocate.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::TextError;
use crate::sorted_array::SortedAbsoluteArray;

/// An immutable text: a leaf, a window, or a concatenation.
#[derive(Debug, Clone)]
pub enum Text {
    /// A leaf owning one byte buffer.
    Str(Arc<[u8]>),
    /// A `[start, end)` window into a shared full text; owns no bytes.
    Part {
        full: Arc<Text>,
        start: usize,
        end: usize,
    },
    /// An ordered concatenation of non-empty children.
    Sequence(Arc<SequenceNode>),
}

/// Shared payload of [`Text::Sequence`]: the filtered children and their
/// cumulative end offsets.
#[derive(Debug)]
pub struct SequenceNode {
    children: Vec<Text>,
    end_offsets: SortedAbsoluteArray,
}

impl SequenceNode {
    fn len(&self) -> usize {
        self.end_offsets.last().map_or(0, |total| total as usize)
    }

    pub fn children(&self) -> &[Text] {
        &self.children
    }
}

impl Text {
    pub fn empty() -> Text {
        Text::Str(Arc::from(&b""[..]))
    }

    /// A leaf from any byte-like content.
    pub fn str(content: impl AsRef<[u8]>) -> Text {
        Text::Str(Arc::from(content.as_ref()))
    }

    /// A `[start, end)` window into `full`.
    ///
    /// Fails with `InvalidArgument` unless `start <= end <= full.len()`.
    pub fn part(full: Arc<Text>, start: usize, end: usize) -> Result<Text, TextError> {
        let full_len = full.len();
        if start > full_len {
            return Err(TextError::InvalidArgument(format!(
                "'start' offset cannot be larger than the full length: start={start}, length={full_len}"
            )));
        }
        if end < start {
            return Err(TextError::InvalidArgument(format!(
                "'end' offset cannot be lesser than the 'start' offset: start={start}, end={end}"
            )));
        }
        if end > full_len {
            return Err(TextError::InvalidArgument(format!(
                "'end' offset cannot be larger than the full length: end={end}, length={full_len}"
            )));
        }
        Ok(Text::Part { full, start, end })
    }

    /// A concatenation. Empty children are filtered out; the cumulative
    /// offsets are built over the filtered children only.
    pub fn sequence(children: impl IntoIterator<Item = Text>) -> Text {
        let children: Vec<Text> = children
            .into_iter()
            .filter(|child| !child.is_empty())
            .collect();

        let mut end_offsets = SortedAbsoluteArray::new();
        let mut total = 0usize;
        for child in &children {
            total += child.len();
            if let Err(err) = end_offsets.add(total as i64) {
                panic!("bug: cumulative lengths of non-empty children always increase: {err}");
            }
        }
        Text::Sequence(Arc::new(SequenceNode {
            children,
            end_offsets,
        }))
    }

    pub fn len(&self) -> usize {
        match self {
            Text::Str(bytes) => bytes.len(),
            Text::Part { start, end, .. } => end - start,
            Text::Sequence(node) => node.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The byte at `index`.
    ///
    /// O(1) for `Str` and `Part` over `Str`; O(log k) per `Sequence` level.
    pub fn byte_at(&self, index: usize) -> Result<u8, TextError> {
        let length = self.len();
        if index >= length {
            return Err(TextError::OutOfRange(format!(
                "index {index} is out of bounds for length {length}"
            )));
        }
        match self {
            Text::Str(bytes) => Ok(bytes[index]),
            Text::Part { full, start, .. } => full.byte_at(start + index),
            Text::Sequence(node) => {
                let child_index = node.end_offsets.index_of(index as i64 + 1);
                let local = if child_index == 0 {
                    index
                } else {
                    index - node.end_offsets.get(child_index - 1)?.unsigned_abs() as usize
                };
                node.children[child_index].byte_at(local)
            }
        }
    }

    /// An O(1) window `[start, end)` of this text.
    ///
    /// `Str` and `Sequence` wrap themselves in a `Part`; a `Part` composes
    /// into a `Part` of its own full text, never a `Part` of a `Part`.
    pub fn sub_sequence(&self, start: usize, end: usize) -> Result<Text, TextError> {
        match self {
            Text::Part {
                full,
                start: offset,
                ..
            } => {
                let length = self.len();
                if end > length {
                    return Err(TextError::InvalidArgument(format!(
                        "'end' offset cannot be larger than the full length: end={end}, length={length}"
                    )));
                }
                Text::part(Arc::clone(full), offset + start, offset + end)
            }
            _ => Text::part(Arc::new(self.clone()), start, end),
        }
    }

    /// Flattens the tree into a contiguous byte vector.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        self.collect_range_into(0, self.len(), &mut out);
        out
    }

    /// Appends `[start, end)` of this text to `out` without rendering
    /// anything outside the range; a `Part` of a huge text never flattens
    /// the whole thing.
    fn collect_range_into(&self, start: usize, end: usize, out: &mut Vec<u8>) {
        match self {
            Text::Str(bytes) => out.extend_from_slice(&bytes[start..end]),
            Text::Part {
                full,
                start: offset,
                ..
            } => full.collect_range_into(offset + start, offset + end, out),
            Text::Sequence(node) => {
                let mut child_start = 0;
                for child in &node.children {
                    let child_end = child_start + child.len();
                    if child_start >= end {
                        break;
                    }
                    if child_end > start {
                        let from = start.max(child_start) - child_start;
                        let to = end.min(child_end) - child_start;
                        child.collect_range_into(from, to, out);
                    }
                    child_start = child_end;
                }
            }
        }
    }

    /// Attaches a caller-supplied payload, keeping this text's behavior.
    pub fn with_extra<E>(self, extra: E) -> WithExtra<E> {
        WithExtra { text: self, extra }
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.to_bytes()))
    }
}

impl PartialEq for Text {
    fn eq(&self, other: &Text) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for Text {}

impl Hash for Text {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_bytes().hash(state);
    }
}

impl From<&str> for Text {
    fn from(content: &str) -> Text {
        Text::str(content)
    }
}

impl From<String> for Text {
    fn from(content: String) -> Text {
        Text::str(content)
    }
}

impl From<&[u8]> for Text {
    fn from(content: &[u8]) -> Text {
        Text::str(content)
    }
}

/// A text plus one caller-supplied payload.
///
/// One generic wrapper covers every [`Text`] variant; the payload never
/// affects the behavior or equality of the underlying text.
#[derive(Debug, Clone)]
pub struct WithExtra<E> {
    text: Text,
    extra: E,
}

impl<E> WithExtra<E> {
    pub fn new(text: Text, extra: E) -> WithExtra<E> {
        WithExtra { text, extra }
    }

    pub fn text(&self) -> &Text {
        &self.text
    }

    pub fn extra(&self) -> &E {
        &self.extra
    }

    /// Replaces the payload, keeping the text.
    pub fn with_extra<T>(self, extra: T) -> WithExtra<T> {
        WithExtra {
            text: self.text,
            extra,
        }
    }

    pub fn into_parts(self) -> (Text, E) {
        (self.text, self.extra)
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn byte_at(&self, index: usize) -> Result<u8, TextError> {
        self.text.byte_at(index)
    }

    pub fn sub_sequence(&self, start: usize, end: usize) -> Result<Text, TextError> {
        self.text.sub_sequence(start, end)
    }
}
