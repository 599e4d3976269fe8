#![no_main]
use libfuzzer_sys::fuzz_target;
use partex_partition::{EnvironmentRegistry, PartitionScanner};

fuzz_target!(|data: &[u8]| {
    // Panic freedom plus the tiling invariant: the emitted tokens must
    // cover the input exactly, with no gaps, overlaps, or empty tokens.
    // Lossy conversion maximizes coverage of inputs that are "almost" text.
    let s = String::from_utf8_lossy(data);
    let scanner = PartitionScanner::new(EnvironmentRegistry::latex_defaults());
    let mut next = 0usize;
    for token in scanner.scan_document(&s) {
        assert_eq!(token.span.start, next);
        assert!(token.span.end > token.span.start);
        next = token.span.end;
    }
    assert_eq!(next, s.len());
});
