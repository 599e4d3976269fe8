//! Host-side partition cache.
//!
//! The scanner's callers own the token sequence; `PartitionMap` is the
//! reference index over it, answering the boundary-biased lookups the
//! selection services need. A host editor may substitute its own storage;
//! the map is rebuildable at any time by rescanning from offset zero with a
//! clean state.

use crate::PartitionKind;
use crate::ir::Token;
use crate::scanner::PartitionScanner;

/// An ordered, gap-free sequence of partitions over a scanned range.
///
/// Every token is its own partition: adjacent same-kind tokens (e.g. the two
/// math regions of `$a$$b$`) stay distinct, since selection semantics depend
/// on their individual boundaries.
#[derive(Debug, Clone)]
pub struct PartitionMap {
    tokens: Vec<Token>,
}

impl PartitionMap {
    pub fn from_tokens(tokens: impl IntoIterator<Item = Token>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
        }
    }

    /// Scans `text` from a clean state and indexes the result.
    pub fn build(scanner: &PartitionScanner, text: &str) -> Self {
        Self::from_tokens(scanner.scan_document(text))
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The partition at `offset`.
    ///
    /// At an interior boundary between two partitions, `prefer_open`
    /// selects the one still open there (ending at `offset`); otherwise the
    /// newly starting one wins. The end-of-document offset resolves to the
    /// last partition under either bias. Offsets outside the scanned range
    /// yield `None`.
    pub fn partition_at(&self, offset: usize, prefer_open: bool) -> Option<Token> {
        let after = self.tokens.partition_point(|t| t.span.start <= offset);
        if after == 0 {
            return None;
        }
        let candidate = self.tokens[after - 1];
        if offset >= candidate.span.end {
            // Past the last partition's interior: only the exact document
            // end still resolves.
            return (offset == candidate.span.end).then_some(candidate);
        }
        if prefer_open && offset == candidate.span.start && after >= 2 {
            return Some(self.tokens[after - 2]);
        }
        Some(candidate)
    }

    /// The kind at `offset`, taking the partition containing that character.
    pub fn kind_at(&self, offset: usize) -> Option<PartitionKind> {
        self.partition_at(offset, false).map(|t| t.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::EnvironmentRegistry;

    use PartitionKind::{Math, Plain};

    fn map_of(text: &str) -> PartitionMap {
        let scanner = PartitionScanner::new(EnvironmentRegistry::latex_defaults());
        PartitionMap::build(&scanner, text)
    }

    #[test]
    fn test_interior_lookup_ignores_bias() {
        let map = map_of("ab $x$ cd");
        for prefer_open in [false, true] {
            assert_eq!(map.partition_at(1, prefer_open).unwrap().kind, Plain);
            assert_eq!(map.partition_at(4, prefer_open).unwrap().kind, Math);
        }
    }

    #[test]
    fn test_boundary_bias() {
        // Partitions: Plain [0,3), Math [3,6), Plain [6,9).
        let map = map_of("ab $x$ cd");
        let open = map.partition_at(3, true).unwrap();
        assert_eq!((open.kind, open.span.end), (Plain, 3));
        let new = map.partition_at(3, false).unwrap();
        assert_eq!((new.kind, new.span.start), (Math, 3));
    }

    #[test]
    fn test_document_edges() {
        let map = map_of("ab $x$ cd");
        // Offset 0 has no open partition to prefer.
        assert_eq!(map.partition_at(0, true).unwrap().span.start, 0);
        // The end offset resolves to the last partition under either bias.
        assert_eq!(map.partition_at(9, true).unwrap().span.end, 9);
        assert_eq!(map.partition_at(9, false).unwrap().span.end, 9);
        assert_eq!(map.partition_at(10, false), None);
    }

    #[test]
    fn test_adjacent_partitions_of_same_kind() {
        // Partitions: Math [0,3), Math [3,6).
        let map = map_of("$a$$b$");
        assert_eq!(map.partition_at(3, true).unwrap().span.start, 0);
        assert_eq!(map.partition_at(3, false).unwrap().span.start, 3);
    }

    #[test]
    fn test_empty_map() {
        let map = map_of("");
        assert_eq!(map.partition_at(0, true), None);
    }
}
