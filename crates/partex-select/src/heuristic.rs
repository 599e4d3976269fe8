//! Partition-bounded heuristic text scanning.

use partex_partition::{PartitionKind, PartitionMap, Span};

/// Which partition kinds a structural search may traverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionConstraint {
    bits: u8,
}

impl PartitionConstraint {
    fn bit(kind: PartitionKind) -> u8 {
        1 << kind as u8
    }

    /// Accepts exactly one kind.
    pub fn only(kind: PartitionKind) -> Self {
        Self {
            bits: Self::bit(kind),
        }
    }

    /// Accepts plain markup only, the configuration under which searches
    /// are unbounded.
    pub fn plain() -> Self {
        Self::only(PartitionKind::Plain)
    }

    pub fn any_of(kinds: &[PartitionKind]) -> Self {
        Self {
            bits: kinds.iter().fold(0, |bits, &k| bits | Self::bit(k)),
        }
    }

    pub fn accepts(&self, kind: PartitionKind) -> bool {
        self.bits & Self::bit(kind) != 0
    }
}

/// Bounded text scanning over a snapshot and its partition map.
///
/// When the constraint accepts `Plain` the search range is the whole
/// document; otherwise it is clipped to the partition enclosing the start
/// position, so word lookup and bracket matching never leak across a math,
/// verbatim, or comment boundary.
pub struct HeuristicScanner<'a> {
    text: &'a str,
    map: &'a PartitionMap,
    constraint: PartitionConstraint,
}

impl<'a> HeuristicScanner<'a> {
    pub fn new(text: &'a str, map: &'a PartitionMap) -> Self {
        Self::with_constraint(text, map, PartitionConstraint::plain())
    }

    pub fn with_constraint(
        text: &'a str,
        map: &'a PartitionMap,
        constraint: PartitionConstraint,
    ) -> Self {
        Self {
            text,
            map,
            constraint,
        }
    }

    /// Exclusive upper bound for a forward search starting at `pos`.
    pub fn forward_bound(&self, pos: usize) -> usize {
        if self.constraint.accepts(PartitionKind::Plain) {
            return self.text.len();
        }
        self.map
            .partition_at(pos, false)
            .map(|p| p.span.end)
            .unwrap_or(pos)
    }

    /// Inclusive lower bound for a backward search starting at `pos`.
    pub fn backward_bound(&self, pos: usize) -> usize {
        if self.constraint.accepts(PartitionKind::Plain) {
            return 0;
        }
        self.map
            .partition_at(pos, false)
            .map(|p| p.span.start)
            .unwrap_or(pos)
    }

    /// The word around `pos`, scanning outward over identifier characters
    /// within the bounds. `None` when `pos` touches no word character.
    pub fn find_common_word(&self, pos: usize) -> Option<Span> {
        if self.text.get(pos..).is_none() {
            return None;
        }
        let low = self.backward_bound(pos);
        let high = self.forward_bound(pos);

        let mut start = pos;
        while start > low {
            match self.text[low..start].chars().next_back() {
                Some(c) if is_word_char(c) => start -= c.len_utf8(),
                _ => break,
            }
        }
        let mut end = pos;
        while end < high {
            match self.text[end..high].chars().next() {
                Some(c) if is_word_char(c) => end += c.len_utf8(),
                _ => break,
            }
        }
        (start < end).then(|| Span::new(start, end))
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
