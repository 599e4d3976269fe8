//! Bracket pair matching.

use partex_partition::{PartitionKind, PartitionMap, Span, char_at};

use crate::heuristic::{HeuristicScanner, PartitionConstraint};

/// The recognized pairs, opener first.
pub const BRACKETS: [(char, char); 3] = [('{', '}'), ('(', ')'), ('[', ']')];

const ESCAPE: char = '\\';

/// Finds the counterpart of a bracket adjacent to a given offset.
///
/// The search walks the text with a nesting counter for the bracket's own
/// pair kind, skips brackets preceded by the escape character, and stays
/// within the partition discipline: the walk is bounded to the enclosing
/// partition unless that partition is plain markup, and only brackets lying
/// in partitions of the same kind as the starting bracket count (a `}`
/// inside a comment never answers a plain `{`).
pub struct PairMatcher<'a> {
    text: &'a str,
    map: &'a PartitionMap,
}

impl<'a> PairMatcher<'a> {
    pub fn new(text: &'a str, map: &'a PartitionMap) -> Self {
        Self { text, map }
    }

    /// The span from one bracket of a pair to its counterpart, both
    /// included, or `None` when `offset` is not adjacent to an unescaped
    /// bracket or no counterpart exists within bounds.
    pub fn match_at(&self, offset: usize) -> Option<Span> {
        let (bracket_pos, pair, forward) = self.candidate(offset)?;
        let kind = self.map.partition_at(bracket_pos, false)?.kind;
        let (open, close) = pair;
        if forward {
            let counterpart = self.walk_forward(bracket_pos, open, close, kind)?;
            Some(Span::new(bracket_pos, counterpart + 1))
        } else {
            let counterpart = self.walk_backward(bracket_pos, open, close, kind)?;
            Some(Span::new(counterpart, bracket_pos + 1))
        }
    }

    /// The bracket the offset is adjacent to, if any: first the character at
    /// the offset (opener searches forward, closer backward), then the one
    /// before it (closer backward, opener forward).
    fn candidate(&self, offset: usize) -> Option<(usize, (char, char), bool)> {
        if !self.text.is_char_boundary(offset) {
            return None;
        }
        if let Ok(c) = char_at(self.text, offset) {
            if !self.is_escaped(offset) {
                if let Some(pair) = BRACKETS.iter().find(|p| p.0 == c) {
                    return Some((offset, *pair, true));
                }
                if let Some(pair) = BRACKETS.iter().find(|p| p.1 == c) {
                    return Some((offset, *pair, false));
                }
            }
        }
        let prev = self.text[..offset].chars().next_back()?;
        let prev_pos = offset - prev.len_utf8();
        if self.is_escaped(prev_pos) {
            return None;
        }
        if let Some(pair) = BRACKETS.iter().find(|p| p.1 == prev) {
            return Some((prev_pos, *pair, false));
        }
        if let Some(pair) = BRACKETS.iter().find(|p| p.0 == prev) {
            return Some((prev_pos, *pair, true));
        }
        None
    }

    fn is_escaped(&self, pos: usize) -> bool {
        self.text[..pos].chars().next_back() == Some(ESCAPE)
    }

    /// True if the bracket at `pos` participates in the search: unescaped
    /// and inside a partition of the search's own kind.
    fn counts(&self, pos: usize, kind: PartitionKind) -> bool {
        !self.is_escaped(pos) && self.map.partition_at(pos, false).map(|p| p.kind) == Some(kind)
    }

    fn walk_forward(
        &self,
        from: usize,
        open: char,
        close: char,
        kind: PartitionKind,
    ) -> Option<usize> {
        let bounds = self.bounds_for(kind);
        let high = bounds.forward_bound(from);
        let mut depth = 1usize;
        let start = from + open.len_utf8();
        for (i, c) in self.text[start..high].char_indices() {
            let pos = start + i;
            if c == open && self.counts(pos, kind) {
                depth += 1;
            } else if c == close && self.counts(pos, kind) {
                depth -= 1;
                if depth == 0 {
                    return Some(pos);
                }
            }
        }
        None
    }

    fn walk_backward(
        &self,
        from: usize,
        open: char,
        close: char,
        kind: PartitionKind,
    ) -> Option<usize> {
        let bounds = self.bounds_for(kind);
        let low = bounds.backward_bound(from);
        let mut depth = 1usize;
        for (i, c) in self.text[low..from].char_indices().rev() {
            let pos = low + i;
            if c == close && self.counts(pos, kind) {
                depth += 1;
            } else if c == open && self.counts(pos, kind) {
                depth -= 1;
                if depth == 0 {
                    return Some(pos);
                }
            }
        }
        None
    }

    fn bounds_for(&self, kind: PartitionKind) -> HeuristicScanner<'a> {
        HeuristicScanner::with_constraint(self.text, self.map, PartitionConstraint::only(kind))
    }
}
