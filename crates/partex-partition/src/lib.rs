//! # Partex Partition Scanner
//!
//! Streaming, incremental lexical partitioner for LaTeX-like markup.
//!
//! ## Overview
//!
//! This crate classifies spans of raw document text into typed regions
//! (plain markup, comments, math, verbatim) without building a syntax
//! tree. Editors consume the token stream for syntax highlighting and feed
//! the resulting partition map into structural services (bracket matching,
//! double-click selection; see the `partex-select` crate). The scanner
//! recognizes:
//!
//! - **Line comments**: `%` through end of line
//! - **Comment environments**: `\begin{comment} ... \end{comment}`
//! - **Delimited math**: `$ ... $`, `$$ ... $$`, `\( ... \)`, `\[ ... \]`
//! - **Math environments**: `\begin{equation} ... \end{equation}` and the
//!   other registered math environment names, starred variants included
//! - **Inline verbatim**: `\verb? ... ?` with an arbitrary delimiter
//! - **Verbatim environments**: `\begin{verbatim}`, `\begin{lstlisting}`, ...
//!
//! Everything else is plain markup. Inside a non-plain region the only
//! recognized sequence is the matching closer; markup does not nest
//! (a `\begin{equation}` inside a comment is inert text).
//!
//! ## Incremental rescanning
//!
//! The scanner can resume from an arbitrary offset given only the kind and
//! start offset of the enclosing partition (see [`Resume`]): it re-derives
//! the internal state by re-reading the opener at the partition start, so an
//! editor only re-lexes the region touched by an edit. Scanning from offset
//! zero with no resume state is always a correct fallback.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   scan(range, resume)   ┌──────────────────┐
//! │ text snapshot│ ───────────────────────▶│ PartitionScanner │
//! │    (&str)    │                         │  + registry      │
//! └──────────────┘    Tokens (lazy iter)   └──────────────────┘
//!                                                │
//!                                                ▼
//!                                         [Token { kind, span }]
//!                                                │ host cache
//!                                                ▼
//!                                          PartitionMap
//! ```
//!
//! Tokens emitted for a scanned range tile it exactly: contiguous,
//! non-overlapping, no gaps. Malformed markup is never an error; the scanner
//! degrades to the `Plain` classification locally so one bad construct
//! cannot corrupt the rest of the document.
//!
//! ## Examples
//!
//! ```
//! use partex_partition::{EnvironmentRegistry, PartitionKind, PartitionScanner};
//!
//! let scanner = PartitionScanner::new(EnvironmentRegistry::latex_defaults());
//! let tokens: Vec<_> = scanner.scan_document("plain $x+y$ more").collect();
//!
//! assert_eq!(tokens[0].kind, PartitionKind::Plain);
//! assert_eq!(tokens[1].kind, PartitionKind::Math);
//! assert_eq!(tokens[1].span.start, 6);
//! assert_eq!(tokens[2].kind, PartitionKind::Plain);
//! ```

pub mod document;
pub mod ir;
pub mod map;
pub mod registry;
pub mod scanner;

pub use document::{DocumentError, char_at, slice};
pub use ir::{Span, Token};
pub use map::PartitionMap;
pub use registry::{EnvironmentRegistry, is_math_env};
pub use scanner::{LastChar, PartitionScanner, Resume, Tokens};

use serde::{Deserialize, Serialize};

/// The lexical classification of a contiguous span of document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartitionKind {
    /// Ordinary markup: commands, arguments, running text.
    Plain,
    /// `%` line comments and comment environments.
    Comment,
    /// Delimited math and math environments.
    Math,
    /// Inline `\verb` and verbatim environments.
    Verbatim,
}
