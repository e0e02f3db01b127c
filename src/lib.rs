//! Lazy line indexing and an immutable text tree over uncopied byte content.
//!
//! The crate has two consumers built on one shared core:
//!
//! - [`SortedAbsoluteArray`]: a chunked, append-only array of offsets that
//!   strictly increase in absolute value, with O(log n) successor search and
//!   no flattening. Every offset lookup in the crate goes through it.
//! - [`LineIndex`]: an incremental newline scanner that discovers line
//!   terminators (`\n`, `\r`, `\r\n`) on demand and answers line/offset
//!   queries without ever scanning content it was not asked about.
//! - [`Text`]: a persistent Str / Part / Sequence tree representing a byte
//!   sequence with O(log n) indexed access and O(1) sub-sequencing, sharing
//!   subtrees instead of copying bytes.
//!
//! The [`format`] module is a presentation layer on top of the index: plain
//! and VT100 segment rendering with column rulers and highlight merging.
//!
//! Indexes confine their scan state to one owner (`&mut self`); a fully
//! constructed [`Text`] is immutable and freely shareable across threads.

pub mod error;
pub mod format;
pub mod line_index;
pub mod search;
pub mod sorted_array;
pub mod text;

pub use error::TextError;
pub use line_index::LineIndex;
pub use sorted_array::{ChunkConfig, SortedAbsoluteArray};
pub use text::Text;
