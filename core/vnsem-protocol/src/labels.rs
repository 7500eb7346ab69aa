use core::fmt;

use alloc::string::String;

/// What a syntactic argument is, independent of any `C-`/`R-` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArgKind {
    /// Numbered argument (`A0`, `ARG1`, ...)
    Numbered(u8),
    /// Modifier with its function tag (`ARGM-LOC` -> `LOC`)
    Modifier(String),
    /// The predicate itself
    Verb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgPrefix {
    Plain,
    /// Discontinuous continuation (`C-A1`)
    Continuation,
    /// Relative-pronoun reference (`R-A0`)
    Reference,
}

/// Syntactic argument label produced by the role labeler.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArgLabel {
    pub kind: ArgKind,
    pub prefix: ArgPrefix,
}

impl ArgLabel {
    pub fn new(kind: ArgKind, prefix: ArgPrefix) -> Self {
        Self { kind, prefix }
    }

    pub fn numbered(number: u8) -> Self {
        Self::new(ArgKind::Numbered(number), ArgPrefix::Plain)
    }

    pub fn modifier(tag: impl Into<String>) -> Self {
        Self::new(ArgKind::Modifier(tag.into()), ArgPrefix::Plain)
    }

    pub fn verb() -> Self {
        Self::new(ArgKind::Verb, ArgPrefix::Plain)
    }

    pub fn is_verb(&self) -> bool {
        self.kind == ArgKind::Verb
    }
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgKind::Numbered(n) => write!(f, "A{}", n),
            ArgKind::Modifier(tag) => write!(f, "AM-{}", tag),
            ArgKind::Verb => f.write_str("V"),
        }
    }
}

impl fmt::Display for ArgLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.prefix {
            ArgPrefix::Plain => {}
            ArgPrefix::Continuation => f.write_str("C-")?,
            ArgPrefix::Reference => f.write_str("R-")?,
        }
        write!(f, "{}", self.kind)
    }
}

// Labels travel as their canonical spelling in tool output
#[cfg(feature = "serde")]
impl serde::Serialize for ArgLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
