//! Double-click / structural selection resolution.
//!
//! Composes the partition map, the pair matcher, and the heuristic scanner
//! into the selection an editor applies on double-click: bracket interiors
//! in plain markup, delimiter interiors when clicking the edge of a math or
//! inline-verbatim region, words otherwise. Every failure mode collapses to
//! a zero-length selection at the click offset; nothing here errors.

use partex_partition::{PartitionKind, PartitionMap, Span, Token, char_at};

use crate::heuristic::{HeuristicScanner, PartitionConstraint};
use crate::pair::PairMatcher;

pub struct SelectionResolver<'a> {
    text: &'a str,
    map: &'a PartitionMap,
}

impl<'a> SelectionResolver<'a> {
    pub fn new(text: &'a str, map: &'a PartitionMap) -> Self {
        Self { text, map }
    }

    /// The span to select for a double-click at `offset`.
    pub fn resolve(&self, offset: usize) -> Span {
        self.try_resolve(offset)
            .unwrap_or_else(|| Span::empty(offset))
    }

    fn try_resolve(&self, offset: usize) -> Option<Span> {
        if !self.text.is_char_boundary(offset) {
            return None;
        }
        let matcher = PairMatcher::new(self.text, self.map);

        // In plain markup, bracket interiors win over words.
        let partition = self.map.partition_at(offset, true)?;
        if partition.kind == PartitionKind::Plain {
            if let Some(pair) = matcher.match_at(offset) {
                if pair.len() >= 2 {
                    return Some(Span::new(pair.start + 1, pair.end - 1));
                }
            }
            return self.word_selection(offset);
        }

        // Elsewhere prefer the partition newly started at the offset, so a
        // click on an opening delimiter selects the construct it opens, not
        // the one it closes.
        let partition = self.map.partition_at(offset, false)?;
        match partition.kind {
            PartitionKind::Math => self.resolve_math(offset, partition, &matcher),
            PartitionKind::Verbatim => self
                .resolve_verbatim(offset, partition)
                .or_else(|| self.word_selection(offset)),
            _ => self.word_selection(offset),
        }
    }

    /// Clicking within two characters of a math partition's edge selects the
    /// interior between its delimiters; clicks elsewhere in the partition
    /// fall back to bracket matching, then to a word, then to the caret.
    fn resolve_math(
        &self,
        offset: usize,
        partition: Token,
        matcher: &PairMatcher,
    ) -> Option<Span> {
        let Span { start: ps, end: pe } = partition.span;
        let near_boundary = offset == ps || offset == ps + 1 || offset == pe || offset + 1 == pe;
        if partition.span.len() >= 4 && near_boundary {
            let c0 = char_at(self.text, ps).ok()?;
            let c1 = char_at(self.text, ps + 1).ok()?;
            let (inner, closer) = match (c0, c1) {
                ('$', '$') => (ps + 2, "$$"),
                ('$', _) => (ps + 1, "$"),
                ('\\', '[') => (ps + 2, "\\]"),
                ('\\', '(') => (ps + 2, "\\)"),
                _ => return None,
            };
            let end = end_offset(self.text, pe, closer).max(inner);
            log::trace!("math delimiter interior [{inner}, {end}) selected at {offset}");
            return Some(Span::new(inner, end));
        }
        if let Some(pair) = matcher.match_at(offset) {
            if pair.len() >= 2 {
                return Some(Span::new(pair.start + 1, pair.end - 1));
            }
        }
        let words = HeuristicScanner::with_constraint(
            self.text,
            self.map,
            PartitionConstraint::only(PartitionKind::Math),
        );
        Some(
            words
                .find_common_word(offset)
                .unwrap_or_else(|| Span::empty(offset)),
        )
    }

    /// Clicking within one character of an inline `\verb` delimiter selects
    /// the interior between the two delimiter occurrences.
    fn resolve_verbatim(&self, offset: usize, partition: Token) -> Option<Span> {
        let Span { start: ps, end: pe } = partition.span;
        let body = &self.text[ps..pe];
        if body.len() < 7 || !body.starts_with("\\verb") {
            return None;
        }
        let delim = body[5..].chars().next()?;
        let inner = ps + 5 + delim.len_utf8();
        let near_boundary =
            offset == ps + 5 || offset == inner || offset == pe || offset + delim.len_utf8() == pe;
        if !near_boundary {
            return None;
        }
        let mut buf = [0u8; 4];
        let closer: &str = delim.encode_utf8(&mut buf);
        let end = end_offset(self.text, pe, closer).max(inner);
        Some(Span::new(inner, end))
    }

    /// The explicit default arm: a common word around the offset, bounded to
    /// the partition the offset lies in.
    fn word_selection(&self, offset: usize) -> Option<Span> {
        let kind = self.map.partition_at(offset, true)?.kind;
        let words = HeuristicScanner::with_constraint(
            self.text,
            self.map,
            PartitionConstraint::only(kind),
        );
        words.find_common_word(offset)
    }
}

/// Scans backward from `end` over the trailing characters matching `closer`
/// (compared back to front), returning where the matched tail begins; `end`
/// itself when nothing matches. A partially present closer shortens the
/// result by exactly the characters found.
fn end_offset(text: &str, end: usize, closer: &str) -> usize {
    let mut e = end;
    for expected in closer.chars().rev() {
        match text[..e].chars().next_back() {
            Some(c) if c == expected => e -= c.len_utf8(),
            _ => break,
        }
    }
    e
}
