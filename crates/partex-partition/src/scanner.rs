//! The partition scanner state machine.
//!
//! A hand-rolled finite-state tokenizer over an immutable `&str` snapshot.
//! Openers are recognized only from the `Plain` state; inside a math,
//! verbatim, or comment region the single recognized sequence is the
//! matching closer. Every token includes its own delimiters, so the token
//! stream tiles the scanned range exactly.
//!
//! The scanner is a pure function of (text, range, resume state): it holds
//! only configuration (the environment registry and the template-mode flag)
//! and builds a fresh cursor per [`PartitionScanner::scan`] call.

use crate::PartitionKind;
use crate::ir::{Span, Token};
use crate::registry::EnvironmentRegistry;

/// Partition scanner configuration: the environment registry plus the
/// template-mode flag.
///
/// In template mode a lone `$` is literal text (so it can serve as a
/// placeholder sigil) and math requires doubled dollars; `$$$` and `$$$$`
/// runs are then recognized as longer display-math delimiters.
pub struct PartitionScanner {
    registry: EnvironmentRegistry,
    template_mode: bool,
}

/// Bootstrap for resuming a scan mid-document: the kind of the partition
/// enclosing the range start and, when known, that partition's start offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resume {
    pub kind: PartitionKind,
    pub partition_start: Option<usize>,
}

impl Resume {
    pub fn new(kind: PartitionKind, partition_start: Option<usize>) -> Self {
        Self {
            kind,
            partition_start,
        }
    }

    /// Resume state derived from a previously scanned partition token.
    pub fn from_partition(partition: Token) -> Self {
        Self {
            kind: partition.kind,
            partition_start: Some(partition.span.start),
        }
    }
}

/// Classification of the last significant character consumed. Exposed for
/// hosts that chain chunked scans and need to seed the next chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastChar {
    Other,
    Backslash,
    Newline,
}

/// Scanner state, each closing variant carrying the pattern that ends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScannerState<'s> {
    Plain,
    /// Math opened by `$`, `$$`, `\(` or `\[`; closes on the literal closer.
    MathDelimited { closer: &'static str },
    /// Math opened by `\begin{name}`; closes on `\end{name}`.
    MathEnvironment { name: &'s str },
    /// `\verb<delim>`; closes on the delimiter or a line break.
    VerbatimInline { delim: char },
    VerbatimEnvironment { name: &'s str },
    /// `%`; closes before the line break.
    CommentLine,
    CommentEnvironment { name: &'s str },
    /// A whitespace-tolerant `\end{name}` has been confirmed by lookahead;
    /// the boundary commits when the closing brace is actually consumed.
    EndEnvironmentLookahead { kind: PartitionKind },
}

impl ScannerState<'_> {
    fn kind(&self) -> PartitionKind {
        match self {
            ScannerState::Plain => PartitionKind::Plain,
            ScannerState::MathDelimited { .. } | ScannerState::MathEnvironment { .. } => {
                PartitionKind::Math
            }
            ScannerState::VerbatimInline { .. } | ScannerState::VerbatimEnvironment { .. } => {
                PartitionKind::Verbatim
            }
            ScannerState::CommentLine | ScannerState::CommentEnvironment { .. } => {
                PartitionKind::Comment
            }
            ScannerState::EndEnvironmentLookahead { kind } => *kind,
        }
    }
}

impl PartitionScanner {
    pub fn new(registry: EnvironmentRegistry) -> Self {
        Self {
            registry,
            template_mode: false,
        }
    }

    /// Enables or disables template mode (lone `$` literal, `$$$`/`$$$$`
    /// delimiters recognized).
    pub fn template_mode(mut self, enabled: bool) -> Self {
        self.template_mode = enabled;
        self
    }

    pub fn registry(&self) -> &EnvironmentRegistry {
        &self.registry
    }

    /// Scans the whole text from a clean state.
    pub fn scan_document<'s, 't>(&'s self, text: &'t str) -> Tokens<'s, 't> {
        self.scan(text, Span::new(0, text.len()), None)
    }

    /// Scans `range`, optionally resuming inside a known partition.
    ///
    /// Range bounds are clamped to the text and floored to character
    /// boundaries. With no resume state (or a `Plain` one) scanning starts
    /// clean at the range start. For a non-plain resume whose partition
    /// start lies before the range, the scanner re-reads the opener at the
    /// partition start to re-derive its internal state, and the first
    /// emitted token covers the partition from that offset. A bootstrap that
    /// does not actually open a region of the advertised kind degrades to a
    /// clean plain-text scan.
    pub fn scan<'s, 't>(
        &'s self,
        text: &'t str,
        range: Span,
        resume: Option<Resume>,
    ) -> Tokens<'s, 't> {
        let end = floor_char_boundary(text, range.end);
        let start = floor_char_boundary(text, range.start).min(end);
        let mut tokens = Tokens::clean(self, text, start, end);

        let Some(resume) = resume else {
            return tokens;
        };
        if resume.kind == PartitionKind::Plain {
            return tokens;
        }
        let Some(partition_start) = resume
            .partition_start
            .map(|p| floor_char_boundary(text, p))
            .filter(|&p| p < start)
        else {
            // The opener sits at the range start and is re-recognized there.
            return tokens;
        };

        // One plain-state dispatch at the partition start re-derives the
        // state and its end pattern, since every opener is recognized from
        // its first character.
        let mut probe = Tokens::clean(self, text, partition_start, end);
        let _ = probe.step();
        if probe.state.kind() == resume.kind {
            log::trace!(
                "resuming {:?} scan at {start} from partition start {partition_start}",
                resume.kind
            );
            tokens.state = probe.state;
            tokens.token_start = partition_start;
            tokens.pos = probe.pos.max(start);
        } else {
            log::debug!(
                "partition bootstrap at {partition_start} does not open a {:?} region; \
                 rescanning as plain text",
                resume.kind
            );
        }
        tokens
    }
}

/// Lazy token stream over a scanned range. Finite, deterministic, and
/// re-derivable: a fresh [`PartitionScanner::scan`] call with the same
/// inputs reproduces the same sequence.
pub struct Tokens<'s, 't> {
    scanner: &'s PartitionScanner,
    text: &'t str,
    /// Exclusive end of the scanned range; lookahead never reads past it.
    end: usize,
    pos: usize,
    token_start: usize,
    state: ScannerState<'s>,
    last: LastChar,
}

impl<'s, 't> Tokens<'s, 't> {
    fn clean(scanner: &'s PartitionScanner, text: &'t str, start: usize, end: usize) -> Self {
        Self {
            scanner,
            text,
            end,
            pos: start,
            token_start: start,
            state: ScannerState::Plain,
            last: initial_last(text, start),
        }
    }

    /// The classification of the last significant character consumed so far.
    pub fn last_char(&self) -> LastChar {
        self.last
    }

    fn peek(&self) -> Option<char> {
        self.text
            .get(self.pos..self.end)
            .and_then(|rest| rest.chars().next())
    }

    fn rest(&self) -> &'t str {
        &self.text[self.pos..self.end]
    }

    fn byte_at(&self, offset: usize) -> Option<u8> {
        (offset < self.end).then(|| self.text.as_bytes()[offset])
    }

    /// The character starting at `offset`, clipped to the scan range.
    fn char_after(&self, offset: usize) -> Option<char> {
        self.text
            .get(offset..self.end)
            .and_then(|rest| rest.chars().next())
    }

    fn bump(&mut self, c: char) {
        self.pos += c.len_utf8();
    }

    /// Skips the whitespace the original grammar tolerates inside openers.
    fn skip_ws(&self, mut offset: usize) -> usize {
        while matches!(self.byte_at(offset), Some(b' ' | b'\r' | b'\n' | b'\t')) {
            offset += 1;
        }
        offset
    }

    /// Ends the current token before `trigger` (the first character of the
    /// new region) and switches state; scanning continues at `resume_at`.
    fn enter(
        &mut self,
        trigger: usize,
        resume_at: usize,
        next: ScannerState<'s>,
    ) -> Option<Token> {
        let emitted = (trigger > self.token_start)
            .then(|| Token::new(self.state.kind(), self.token_start, trigger));
        self.token_start = trigger;
        self.pos = resume_at;
        self.state = next;
        emitted
    }

    /// Emits the current token ending at `end` (closer included) and returns
    /// to the plain state.
    fn close(&mut self, end: usize) -> Option<Token> {
        let token = Token::new(self.state.kind(), self.token_start, end);
        self.token_start = end;
        self.pos = end;
        self.state = ScannerState::Plain;
        Some(token)
    }

    fn step(&mut self) -> Option<Token> {
        let Some(c) = self.peek() else {
            // Range end fell inside a multi-byte character; stop here.
            self.pos = self.end;
            return None;
        };
        match self.state {
            ScannerState::Plain => self.step_plain(c),
            ScannerState::MathDelimited { closer } => self.step_math_delimited(c, closer),
            ScannerState::MathEnvironment { name } => {
                self.step_environment(c, PartitionKind::Math, name, false)
            }
            ScannerState::VerbatimEnvironment { name } => {
                self.step_environment(c, PartitionKind::Verbatim, name, false)
            }
            ScannerState::CommentEnvironment { name } => {
                self.step_environment(c, PartitionKind::Comment, name, true)
            }
            ScannerState::VerbatimInline { delim } => self.step_verbatim_inline(c, delim),
            ScannerState::CommentLine => self.step_comment_line(c),
            ScannerState::EndEnvironmentLookahead { .. } => self.step_end_lookahead(c),
        }
    }

    fn step_plain(&mut self, c: char) -> Option<Token> {
        match c {
            '\r' | '\n' => {
                self.bump(c);
                self.last = LastChar::Newline;
                None
            }
            '\\' => self.plain_backslash(),
            '%' => {
                self.last = LastChar::Other;
                self.enter(self.pos, self.pos + 1, ScannerState::CommentLine)
            }
            '$' => self.plain_dollar(),
            _ => {
                self.bump(c);
                self.last = LastChar::Other;
                None
            }
        }
    }

    fn plain_backslash(&mut self) -> Option<Token> {
        let start = self.pos;
        self.last = LastChar::Other;
        let tail = &self.text[start + 1..self.end];
        let Some(c2) = tail.chars().next() else {
            self.pos = start + 1;
            return None;
        };
        if (c2 as u32) <= 32 {
            // A backslash before whitespace escapes nothing.
            self.pos = start + 1;
            return None;
        }
        match c2 {
            'b' if tail.starts_with("begin") => self.check_begin_env(start),
            'v' if tail.starts_with("verb") => self.check_verb(start),
            '[' => self.enter(
                start,
                start + 2,
                ScannerState::MathDelimited { closer: "\\]" },
            ),
            '(' => self.enter(
                start,
                start + 2,
                ScannerState::MathDelimited { closer: "\\)" },
            ),
            _ => {
                // Any other escaped character is inert, `\$` and `\%` included.
                self.pos = start + 1 + c2.len_utf8();
                None
            }
        }
    }

    fn plain_dollar(&mut self) -> Option<Token> {
        let start = self.pos;
        self.last = LastChar::Other;
        let run = self.text.as_bytes()[start..self.end]
            .iter()
            .take(4)
            .take_while(|&&b| b == b'$')
            .count();
        if self.scanner.template_mode {
            match run {
                1 => {
                    // Lone dollar is a template placeholder sigil, not math.
                    self.pos = start + 1;
                    None
                }
                2 => self.enter(start, start + 2, ScannerState::MathDelimited { closer: "$$" }),
                3 => self.enter(start, start + 3, ScannerState::MathDelimited { closer: "$$" }),
                _ => self.enter(
                    start,
                    start + 4,
                    ScannerState::MathDelimited { closer: "$$$$" },
                ),
            }
        } else if run >= 2 {
            self.enter(start, start + 2, ScannerState::MathDelimited { closer: "$$" })
        } else {
            self.enter(start, start + 1, ScannerState::MathDelimited { closer: "$" })
        }
    }

    /// `\begin` has been read at `start`. Looks ahead for
    /// `ws* '*'? ws* '{' name '}'` with `name` registered; on success the
    /// environment token starts at `start` and content scanning resumes
    /// after `\begin`. On any failure nothing past `\begin` is consumed and
    /// the scanner stays plain.
    fn check_begin_env(&mut self, start: usize) -> Option<Token> {
        let after_begin = start + 6;
        let mut la = self.skip_ws(after_begin);
        if self.byte_at(la) == Some(b'*') {
            la = self.skip_ws(la + 1);
        }
        if self.byte_at(la) != Some(b'{') {
            self.pos = after_begin;
            return None;
        }
        la += 1;
        let name_start = la;
        while matches!(self.byte_at(la), Some(b) if b.is_ascii_alphanumeric() || b == b'*') {
            la += 1;
        }
        if self.byte_at(la) != Some(b'}') {
            self.pos = after_begin;
            return None;
        }
        let name = &self.text[name_start..la];
        let next = match self.scanner.registry.entry(name) {
            Some((name, PartitionKind::Math)) => ScannerState::MathEnvironment { name },
            Some((name, PartitionKind::Verbatim)) => ScannerState::VerbatimEnvironment { name },
            Some((name, PartitionKind::Comment)) => ScannerState::CommentEnvironment { name },
            Some((_, PartitionKind::Plain)) | None => {
                self.pos = after_begin;
                return None;
            }
        };
        self.enter(start, after_begin, next)
    }

    /// `\verb` has been read at `start`; the next character, if it is
    /// neither whitespace nor a letter, becomes the closing delimiter.
    fn check_verb(&mut self, start: usize) -> Option<Token> {
        let after_verb = start + 5;
        let Some(delim) = self.char_after(after_verb) else {
            self.pos = after_verb;
            return None;
        };
        if (delim as u32) <= 32 || delim.is_alphabetic() {
            self.pos = after_verb;
            return None;
        }
        self.enter(
            start,
            after_verb + delim.len_utf8(),
            ScannerState::VerbatimInline { delim },
        )
    }

    fn step_math_delimited(&mut self, c: char, closer: &'static str) -> Option<Token> {
        if closer.starts_with(c) {
            if self.rest().starts_with(closer) {
                self.last = LastChar::Other;
                return self.close(self.pos + closer.len());
            }
            // Partial closer: the character is ordinary content.
            self.bump(c);
            self.last = LastChar::Other;
            return None;
        }
        if c == '\\' {
            let start = self.pos;
            match self.char_after(start + 1) {
                Some(c2) if (c2 as u32) > 32 => {
                    // Escape: the next character cannot close the region.
                    self.pos = start + 1 + c2.len_utf8();
                    self.last = LastChar::Other;
                }
                _ => {
                    self.pos = start + 1;
                    self.last = LastChar::Backslash;
                }
            }
            return None;
        }
        if c == '\r' || c == '\n' {
            // Delimited math may span lines.
            self.bump(c);
            self.last = LastChar::Newline;
            return None;
        }
        self.bump(c);
        self.last = LastChar::Other;
        None
    }

    fn step_environment(
        &mut self,
        c: char,
        kind: PartitionKind,
        name: &'s str,
        strict: bool,
    ) -> Option<Token> {
        if c == '\\' {
            let start = self.pos;
            let tail = &self.text[start + 1..self.end];
            let Some(c2) = tail.chars().next() else {
                self.pos = start + 1;
                self.last = LastChar::Backslash;
                return None;
            };
            if (c2 as u32) <= 32 {
                self.pos = start + 1;
                self.last = LastChar::Backslash;
                return None;
            }
            self.last = LastChar::Other;
            if tail.starts_with("end") {
                self.pos = start + 4;
                return self.check_end_env(kind, name, strict);
            }
            self.pos = start + 1 + c2.len_utf8();
            return None;
        }
        if c == '\r' || c == '\n' {
            self.bump(c);
            self.last = LastChar::Newline;
            return None;
        }
        self.bump(c);
        self.last = LastChar::Other;
        None
    }

    /// `\end` has been consumed. A strict close requires `{name}`
    /// immediately and commits on the spot; a tolerant close allows
    /// whitespace first and defers the commit to the lookahead state, so a
    /// failed match reverts with only `\end` consumed as content.
    fn check_end_env(&mut self, kind: PartitionKind, name: &'s str, strict: bool) -> Option<Token> {
        let mut la = self.pos;
        if !strict {
            la = self.skip_ws(la);
        }
        if self.byte_at(la) != Some(b'{') {
            return None;
        }
        la += 1;
        if !self.text[la..self.end].starts_with(name) {
            return None;
        }
        la += name.len();
        if self.byte_at(la) != Some(b'}') {
            return None;
        }
        la += 1;
        if strict {
            self.last = LastChar::Other;
            return self.close(la);
        }
        self.state = ScannerState::EndEnvironmentLookahead { kind };
        None
    }

    fn step_end_lookahead(&mut self, c: char) -> Option<Token> {
        if c == '}' {
            self.last = LastChar::Other;
            return self.close(self.pos + 1);
        }
        self.bump(c);
        self.last = if c == '\r' || c == '\n' {
            LastChar::Newline
        } else {
            LastChar::Other
        };
        None
    }

    fn step_comment_line(&mut self, c: char) -> Option<Token> {
        if c == '\r' || c == '\n' {
            // The break is not part of the comment; it rejoins plain text.
            return self.close(self.pos);
        }
        self.bump(c);
        self.last = LastChar::Other;
        None
    }

    fn step_verbatim_inline(&mut self, c: char, delim: char) -> Option<Token> {
        if c == delim {
            self.last = LastChar::Other;
            return self.close(self.pos + c.len_utf8());
        }
        if c == '\r' || c == '\n' {
            // Inline verbatim never spans lines; close before the break.
            return self.close(self.pos);
        }
        self.bump(c);
        self.last = LastChar::Other;
        None
    }
}

impl Iterator for Tokens<'_, '_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if self.pos >= self.end {
                if self.token_start < self.end {
                    let token = Token::new(self.state.kind(), self.token_start, self.end);
                    self.token_start = self.end;
                    return Some(token);
                }
                return None;
            }
            if let Some(token) = self.step() {
                return Some(token);
            }
        }
    }
}

fn floor_char_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while offset > 0 && !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

fn initial_last(text: &str, offset: usize) -> LastChar {
    if offset == 0 {
        return LastChar::Newline;
    }
    match text[..offset].chars().next_back() {
        Some('\r' | '\n') => LastChar::Newline,
        _ => LastChar::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner() -> PartitionScanner {
        PartitionScanner::new(EnvironmentRegistry::latex_defaults())
    }

    fn pieces(text: &str) -> Vec<(PartitionKind, &str)> {
        let scanner = scanner();
        scanner
            .scan_document(text)
            .map(|t| (t.kind, &text[t.span.start..t.span.end]))
            .collect()
    }

    fn template_pieces(text: &str) -> Vec<(PartitionKind, &str)> {
        let scanner = scanner().template_mode(true);
        scanner
            .scan_document(text)
            .map(|t| (t.kind, &text[t.span.start..t.span.end]))
            .collect()
    }

    use PartitionKind::{Comment, Math, Plain, Verbatim};

    #[test]
    fn test_plain_only() {
        assert_eq!(pieces("just text"), vec![(Plain, "just text")]);
    }

    #[test]
    fn test_empty_input() {
        assert!(pieces("").is_empty());
    }

    #[test]
    fn test_inline_math() {
        assert_eq!(
            pieces("plain $x+y$ more"),
            vec![(Plain, "plain "), (Math, "$x+y$"), (Plain, " more")]
        );
    }

    #[test]
    fn test_display_math_is_greedy() {
        assert_eq!(
            pieces("a$$x$$b"),
            vec![(Plain, "a"), (Math, "$$x$$"), (Plain, "b")]
        );
    }

    #[test]
    fn test_single_dollar_inside_display_math_is_content() {
        assert_eq!(pieces("$$a$b$$"), vec![(Math, "$$a$b$$")]);
    }

    #[test]
    fn test_bracket_and_paren_math() {
        assert_eq!(
            pieces(r"a \(x\) b \[y\] c"),
            vec![
                (Plain, "a "),
                (Math, r"\(x\)"),
                (Plain, " b "),
                (Math, r"\[y\]"),
                (Plain, " c"),
            ]
        );
    }

    #[test]
    fn test_escaped_specials_are_inert() {
        assert_eq!(pieces(r"pay \$5 \% sure"), vec![(Plain, r"pay \$5 \% sure")]);
    }

    #[test]
    fn test_escaped_dollar_inside_math_does_not_close() {
        assert_eq!(
            pieces(r"$a\$b$c"),
            vec![(Math, r"$a\$b$"), (Plain, "c")]
        );
    }

    #[test]
    fn test_comment_ends_before_line_break() {
        assert_eq!(
            pieces("% note\nplain"),
            vec![(Comment, "% note"), (Plain, "\nplain")]
        );
    }

    #[test]
    fn test_comment_crlf() {
        assert_eq!(
            pieces("% note\r\nplain"),
            vec![(Comment, "% note"), (Plain, "\r\nplain")]
        );
    }

    #[test]
    fn test_markup_inside_comment_is_inert() {
        assert_eq!(
            pieces("% comment \\begin{equation}\nplain"),
            vec![(Comment, "% comment \\begin{equation}"), (Plain, "\nplain")]
        );
    }

    #[test]
    fn test_verbatim_environment_single_token() {
        let text = "\\begin{verbatim}raw\ttext\\end{verbatim}";
        assert_eq!(pieces(text), vec![(Verbatim, text)]);
    }

    #[test]
    fn test_unterminated_environment_runs_to_end() {
        assert_eq!(
            pieces("\\begin{equation}lost"),
            vec![(Math, "\\begin{equation}lost")]
        );
    }

    #[test]
    fn test_starred_environment() {
        assert_eq!(
            pieces("\\begin{align*}x\\end{align*}y"),
            vec![(Math, "\\begin{align*}x\\end{align*}"), (Plain, "y")]
        );
    }

    #[test]
    fn test_unknown_environment_stays_plain() {
        let text = "\\begin{unknown}x\\end{unknown}";
        assert_eq!(pieces(text), vec![(Plain, text)]);
    }

    #[test]
    fn test_malformed_begin_stays_plain() {
        assert_eq!(
            pieces("\\begin equation"),
            vec![(Plain, "\\begin equation")]
        );
    }

    #[test]
    fn test_begin_allows_whitespace_before_brace() {
        assert_eq!(
            pieces("\\begin {math}x\\end{math}!"),
            vec![(Math, "\\begin {math}x\\end{math}"), (Plain, "!")]
        );
    }

    #[test]
    fn test_end_with_whitespace_closes_math_environment() {
        assert_eq!(
            pieces("\\begin{equation}x\\end {equation}y"),
            vec![(Math, "\\begin{equation}x\\end {equation}"), (Plain, "y")]
        );
    }

    #[test]
    fn test_non_matching_end_is_content() {
        let text = "\\begin{align}a\\end{math}b\\end{align}";
        assert_eq!(pieces(text), vec![(Math, text)]);
    }

    #[test]
    fn test_comment_environment_is_strict_about_end() {
        assert_eq!(
            pieces("\\begin{comment}x\\end{comment}y"),
            vec![(Comment, "\\begin{comment}x\\end{comment}"), (Plain, "y")]
        );
        // Whitespace before the brace keeps the environment open.
        let tolerant = "\\begin{comment}x\\end {comment}";
        assert_eq!(pieces(tolerant), vec![(Comment, tolerant)]);
    }

    #[test]
    fn test_verb_inline() {
        assert_eq!(
            pieces("a \\verb|x{z| b"),
            vec![(Plain, "a "), (Verbatim, "\\verb|x{z|"), (Plain, " b")]
        );
    }

    #[test]
    fn test_verb_closes_before_line_break() {
        assert_eq!(
            pieces("\\verb|open\nrest"),
            vec![(Verbatim, "\\verb|open"), (Plain, "\nrest")]
        );
    }

    #[test]
    fn test_verb_needs_non_letter_delimiter() {
        assert_eq!(pieces("\\verb x"), vec![(Plain, "\\verb x")]);
        assert_eq!(pieces("\\verbose"), vec![(Plain, "\\verbose")]);
    }

    #[test]
    fn test_adjacent_math_partitions_stay_separate() {
        assert_eq!(
            pieces("$a$$b$"),
            vec![(Math, "$a$"), (Math, "$b$")]
        );
    }

    #[test]
    fn test_percent_inside_math_is_content() {
        assert_eq!(pieces("$a%b$"), vec![(Math, "$a%b$")]);
    }

    #[test]
    fn test_math_spans_lines() {
        assert_eq!(pieces("$a\nb$"), vec![(Math, "$a\nb$")]);
    }

    #[test]
    fn test_unterminated_inline_math_runs_to_end() {
        assert_eq!(pieces("a $x"), vec![(Plain, "a "), (Math, "$x")]);
    }

    #[test]
    fn test_template_mode_lone_dollar_is_literal() {
        assert_eq!(template_pieces("a $x$ b"), vec![(Plain, "a $x$ b")]);
    }

    #[test]
    fn test_template_mode_double_dollar_math() {
        assert_eq!(
            template_pieces("a $$x$$ b"),
            vec![(Plain, "a "), (Math, "$$x$$"), (Plain, " b")]
        );
    }

    #[test]
    fn test_template_mode_triple_dollar_closes_on_double() {
        assert_eq!(
            template_pieces("$$$x$$y"),
            vec![(Math, "$$$x$$"), (Plain, "y")]
        );
    }

    #[test]
    fn test_template_mode_quad_dollar() {
        assert_eq!(template_pieces("$$$$x$$$$"), vec![(Math, "$$$$x$$$$")]);
    }

    #[test]
    fn test_trailing_backslash() {
        assert_eq!(pieces("abc\\"), vec![(Plain, "abc\\")]);
    }

    #[test]
    fn test_double_backslash_swallows_a_would_be_end() {
        // `\\` consumes both backslashes, so the `end{equation}` right after
        // it is ordinary content; only the later real `\end` closes.
        let text = "\\begin{equation}a\\\\end{equation}b\\end{equation}";
        assert_eq!(pieces(text), vec![(Math, text)]);
    }

    #[test]
    fn test_multibyte_text() {
        assert_eq!(
            pieces("Étude $π$ über"),
            vec![(Plain, "Étude "), (Math, "$π$"), (Plain, " über")]
        );
    }

    #[test]
    fn test_scan_subrange_without_resume() {
        let text = "plain $x+y$ more";
        let scanner = scanner();
        let tokens: Vec<_> = scanner.scan(text, Span::new(6, 11), None).collect();
        assert_eq!(tokens, vec![Token::new(Math, 6, 11)]);
    }

    #[test]
    fn test_resume_at_partition_boundary_matches_full_scan() {
        let text = "a $x$ b % c\nd";
        let scanner = scanner();
        let full: Vec<_> = scanner.scan_document(text).collect();
        for (i, token) in full.iter().enumerate() {
            let resume = Resume::from_partition(*token);
            let suffix: Vec<_> = scanner
                .scan(text, Span::new(token.span.start, text.len()), Some(resume))
                .collect();
            assert_eq!(&full[i..], &suffix[..], "resume at {}", token.span.start);
        }
    }

    #[test]
    fn test_resume_mid_partition_covers_whole_partition() {
        let text = "\\begin{equation}x+y\\end{equation} rest";
        let scanner = scanner();
        let full: Vec<_> = scanner.scan_document(text).collect();
        assert_eq!(full[0], Token::new(Math, 0, 33));

        let resume = Resume::new(Math, Some(0));
        let resumed: Vec<_> = scanner
            .scan(text, Span::new(17, text.len()), Some(resume))
            .collect();
        assert_eq!(resumed, full);
    }

    #[test]
    fn test_resume_with_stale_bootstrap_degrades_to_plain() {
        let text = "no math here";
        let scanner = scanner();
        let resumed: Vec<_> = scanner
            .scan(
                text,
                Span::new(3, text.len()),
                Some(Resume::new(Math, Some(0))),
            )
            .collect();
        assert_eq!(resumed, vec![Token::new(Plain, 3, text.len())]);
    }

    #[test]
    fn test_resume_inside_comment_line() {
        let text = "ab % note\nrest";
        let scanner = scanner();
        let resumed: Vec<_> = scanner
            .scan(
                text,
                Span::new(6, text.len()),
                Some(Resume::new(Comment, Some(3))),
            )
            .collect();
        assert_eq!(resumed[0], Token::new(Comment, 3, 9));
        assert_eq!(resumed[1], Token::new(Plain, 9, text.len()));
    }

    #[test]
    fn test_tokens_tile_the_range() {
        let text = "a $x$ %c\n\\begin{verbatim}v\\end{verbatim}\\[m\\]end";
        let mut next = 0;
        for token in scanner().scan_document(text) {
            assert_eq!(token.span.start, next);
            assert!(token.span.end > token.span.start);
            next = token.span.end;
        }
        assert_eq!(next, text.len());
    }

    #[test]
    fn test_scanning_is_deterministic() {
        let text = "a $x$ %c\nrest \\verb!v! $$m$$";
        let scanner = scanner();
        let first: Vec<_> = scanner.scan_document(text).collect();
        let second: Vec<_> = scanner.scan_document(text).collect();
        assert_eq!(first, second);
    }
}
