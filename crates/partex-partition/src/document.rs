//! Checked random access into the immutable text snapshot.
//!
//! The scanner itself walks the text with its own cursor; these helpers are
//! for the selection services, which probe arbitrary offsets supplied by the
//! host editor. Out-of-bounds access is the only hard failure in the crate:
//! it indicates a caller defect, not a property of the document.

use thiserror::Error;

use crate::ir::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("offset {offset} out of range for document of length {len}")]
    OutOfRange { offset: usize, len: usize },
}

/// The character starting at byte `offset`.
///
/// Fails with [`DocumentError::OutOfRange`] if `offset` is past the end of
/// the text or not on a character boundary.
pub fn char_at(text: &str, offset: usize) -> Result<char, DocumentError> {
    text.get(offset..)
        .and_then(|rest| rest.chars().next())
        .ok_or(DocumentError::OutOfRange {
            offset,
            len: text.len(),
        })
}

/// The text covered by `span`.
pub fn slice(text: &str, span: Span) -> Result<&str, DocumentError> {
    text.get(span.start..span.end)
        .ok_or(DocumentError::OutOfRange {
            offset: span.end,
            len: text.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_at_in_bounds() {
        assert_eq!(char_at("abc", 1), Ok('b'));
    }

    #[test]
    fn test_char_at_past_end_is_out_of_range() {
        assert_eq!(
            char_at("abc", 3),
            Err(DocumentError::OutOfRange { offset: 3, len: 3 })
        );
    }

    #[test]
    fn test_char_at_mid_codepoint_is_out_of_range() {
        // 'é' is two bytes; offset 1 is inside it.
        assert!(char_at("é", 1).is_err());
    }

    #[test]
    fn test_slice_round_trips() {
        assert_eq!(slice("plain $x$", Span::new(6, 9)), Ok("$x$"));
        assert!(slice("plain", Span::new(2, 9)).is_err());
    }
}
