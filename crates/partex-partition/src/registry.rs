//! Environment name registry.
//!
//! The scanner consults the registry exactly once per `\begin{name}`
//! candidate. Lookup is exact and case-sensitive: `\begin{Equation}` opens
//! nothing. The registry is an owned value injected at scanner construction,
//! so custom environment sets (or a stripped-down registry for tests)
//! compose without touching global state.

use std::collections::HashMap;

use crate::PartitionKind;

/// Environment names whose body is math, as commonly defined by LaTeX and
/// amsmath. Starred variants are distinct names and listed explicitly.
pub const MATH_ENVIRONMENTS: &[&str] = &[
    "equation",
    "eqnarray",
    "align",
    "alignat",
    "flalign",
    "multline",
    "gather",
    "equation*",
    "eqnarray*",
    "align*",
    "alignat*",
    "flalign*",
    "multline*",
    "gather*",
    "math",
    "displaymath",
];

/// Environment names whose body is taken verbatim.
pub const VERBATIM_ENVIRONMENTS: &[&str] = &["verbatim", "verbatim*", "lstlisting"];

/// True if `name` denotes one of the default math environments.
pub fn is_math_env(name: &str) -> bool {
    MATH_ENVIRONMENTS.contains(&name)
}

/// Maps environment names to the partition kind their body scans as.
#[derive(Debug, Clone)]
pub struct EnvironmentRegistry {
    entries: HashMap<String, PartitionKind>,
}

impl Default for EnvironmentRegistry {
    fn default() -> Self {
        Self::latex_defaults()
    }
}

impl EnvironmentRegistry {
    /// A registry with no entries; `\begin{...}` never opens a partition.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// The standard LaTeX set: `comment`, the verbatim environments, and the
    /// math environments including starred variants.
    pub fn latex_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register("comment", PartitionKind::Comment);
        for name in VERBATIM_ENVIRONMENTS {
            registry.register(*name, PartitionKind::Verbatim);
        }
        for name in MATH_ENVIRONMENTS {
            registry.register(*name, PartitionKind::Math);
        }
        registry
    }

    /// Registers `name`, replacing any previous entry. Registering
    /// `PartitionKind::Plain` makes the name inert: the scanner treats a
    /// `\begin` of it as ordinary markup.
    pub fn register(&mut self, name: impl Into<String>, kind: PartitionKind) {
        self.entries.insert(name.into(), kind);
    }

    pub fn lookup(&self, name: &str) -> Option<PartitionKind> {
        self.entries.get(name).copied()
    }

    /// Lookup returning the registry's own copy of the name, so scanner
    /// state can borrow it for the lifetime of the registry.
    pub(crate) fn entry(&self, name: &str) -> Option<(&str, PartitionKind)> {
        self.entries
            .get_key_value(name)
            .map(|(key, kind)| (key.as_str(), *kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_comment_verbatim_math() {
        let registry = EnvironmentRegistry::latex_defaults();
        assert_eq!(registry.lookup("comment"), Some(PartitionKind::Comment));
        assert_eq!(registry.lookup("verbatim"), Some(PartitionKind::Verbatim));
        assert_eq!(registry.lookup("verbatim*"), Some(PartitionKind::Verbatim));
        assert_eq!(registry.lookup("lstlisting"), Some(PartitionKind::Verbatim));
        assert_eq!(registry.lookup("equation"), Some(PartitionKind::Math));
        assert_eq!(registry.lookup("equation*"), Some(PartitionKind::Math));
        assert_eq!(registry.lookup("displaymath"), Some(PartitionKind::Math));
    }

    #[test]
    fn test_lookup_is_exact_and_case_sensitive() {
        let registry = EnvironmentRegistry::latex_defaults();
        assert_eq!(registry.lookup("Equation"), None);
        assert_eq!(registry.lookup("equatio"), None);
        assert_eq!(registry.lookup("equations"), None);
    }

    #[test]
    fn test_custom_registration() {
        let mut registry = EnvironmentRegistry::empty();
        registry.register("minted", PartitionKind::Verbatim);
        assert_eq!(registry.lookup("minted"), Some(PartitionKind::Verbatim));
        assert_eq!(registry.lookup("verbatim"), None);
    }

    #[test]
    fn test_is_math_env_matches_default_set() {
        assert!(is_math_env("align*"));
        assert!(is_math_env("displaymath"));
        assert!(!is_math_env("verbatim"));
        assert!(!is_math_env("Align"));
    }
}
