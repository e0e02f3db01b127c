use serde::{Deserialize, Serialize};

use crate::error::TextError;

/// A highlighted `[start, end)` byte interval with a palette color index.
///
/// The end offset is optional at construction; omitting it is the sentinel
/// for "equal to the start offset" (a zero-width mark).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    start_offset: usize,
    end_offset: Option<usize>,
    color: usize,
}

impl Highlight {
    /// Fails with `InvalidArgument` when `end_offset < start_offset`.
    pub fn new(start_offset: usize, end_offset: usize, color: usize) -> Result<Highlight, TextError> {
        if end_offset < start_offset {
            return Err(TextError::InvalidArgument(format!(
                "end offset must be greater than or equal to the start offset: \
                 start_offset={start_offset}, end_offset={end_offset}"
            )));
        }
        Ok(Highlight {
            start_offset,
            end_offset: Some(end_offset),
            color,
        })
    }

    /// A zero-width highlight at `start_offset`.
    pub fn at(start_offset: usize, color: usize) -> Highlight {
        Highlight {
            start_offset,
            end_offset: None,
            color,
        }
    }

    pub fn start_offset(&self) -> usize {
        self.start_offset
    }

    /// The end offset, with the sentinel resolved to the start offset.
    pub fn end_offset(&self) -> usize {
        self.end_offset.unwrap_or(self.start_offset)
    }

    pub fn color(&self) -> usize {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_interval() {
        let highlight = Highlight::new(3, 8, 1).unwrap();
        assert_eq!(highlight.start_offset(), 3);
        assert_eq!(highlight.end_offset(), 8);
        assert_eq!(highlight.color(), 1);
    }

    #[test]
    fn test_sentinel_end_equals_start() {
        let mark = Highlight::at(5, 0);
        assert_eq!(mark.start_offset(), 5);
        assert_eq!(mark.end_offset(), 5);
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let err = Highlight::new(8, 3, 0).unwrap_err();
        assert!(matches!(err, TextError::InvalidArgument(_)));
        assert_eq!(
            err.to_string(),
            "invalid argument: end offset must be greater than or equal to the start offset: \
             start_offset=8, end_offset=3"
        );
    }

    #[test]
    fn test_round_trips_through_serde() {
        let highlight = Highlight::new(3, 8, 2).unwrap();
        let json = serde_json::to_string(&highlight).unwrap();
        let back: Highlight = serde_json::from_str(&json).unwrap();
        assert_eq!(highlight, back);
    }
}
