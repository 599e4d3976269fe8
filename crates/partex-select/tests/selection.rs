//! End-to-end: scan → partition map → selection resolution, over one
//! document mixing every construct.

use partex_partition::{EnvironmentRegistry, PartitionMap, PartitionScanner, Span};
use partex_select::{PairMatcher, SelectionResolver};

struct Fixture {
    text: &'static str,
    map: PartitionMap,
}

impl Fixture {
    fn new(text: &'static str) -> Self {
        let scanner = PartitionScanner::new(EnvironmentRegistry::latex_defaults());
        let map = PartitionMap::build(&scanner, text);
        Self { text, map }
    }

    fn select(&self, offset: usize) -> &str {
        let span = SelectionResolver::new(self.text, &self.map).resolve(offset);
        &self.text[span.start..span.end]
    }
}

#[test]
fn test_selections_across_a_mixed_document() {
    //             0         1         2         3         4
    //             0123456789012345678901234567890123456789012345
    let fixture = Fixture::new("see {hello} and $$x$$ or \\verb|run me| % done");

    // Bracket interior in plain markup.
    assert_eq!(fixture.select(5), "hello");
    // Display-math delimiter needs two characters of lookahead.
    assert_eq!(fixture.select(16), "x");
    assert_eq!(fixture.select(20), "x");
    // Inline verbatim delimiter.
    assert_eq!(fixture.select(30), "run me");
    // Word inside the comment.
    assert_eq!(fixture.select(41), "done");
    // Plain word fallback.
    assert_eq!(fixture.select(1), "see");
}

#[test]
fn test_bracket_matching_respects_partitions_end_to_end() {
    let fixture = Fixture::new("{a $b}c$ d}");
    let matcher = PairMatcher::new(fixture.text, &fixture.map);
    // The `}` inside math does not close the plain `{`; the later plain one
    // does.
    assert_eq!(matcher.match_at(0), Some(Span::new(0, 11)));
}

#[test]
fn test_selection_inside_math_falls_back_gracefully() {
    let fixture = Fixture::new("$$ alpha {b} $$");
    // Word in the math interior.
    assert_eq!(fixture.select(4), "alpha");
    // Bracket pair in the math interior.
    assert_eq!(fixture.select(10), "b");
    // Nothing selectable at a blank spot: caret (zero-length).
    assert_eq!(fixture.select(2), "");
}

#[test]
fn test_every_offset_resolves_without_panicking() {
    let text = "a $x$ %c\n\\begin{verbatim}v\\end{verbatim}\\[m\\] \\verb!q! end";
    let fixture = Fixture::new(text);
    let resolver = SelectionResolver::new(fixture.text, &fixture.map);
    for offset in 0..=text.len() {
        let span = resolver.resolve(offset);
        assert!(span.start <= span.end);
        assert!(span.end <= text.len());
    }
}
