use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::Serialize as SerdeSerialize;

use crate::ids::ClassId;
use crate::labels::ArgLabel;
use crate::span::Span;

/// A predicate occurrence with its labeled argument spans.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeSerialize))]
pub struct Proposition {
    /// Token index of the predicate
    pub predicate: usize,
    /// Resolved verb class, if the classifier found one
    pub sense: Option<ClassId>,
    /// Argument spans in sentence order, including the predicate's own `V` span
    pub arguments: Vec<Span<ArgLabel>>,
}

impl Proposition {
    pub fn new(predicate: usize, sense: Option<ClassId>, arguments: Vec<Span<ArgLabel>>) -> Self {
        Self { predicate, sense, arguments }
    }

    pub fn predicate_span(&self) -> Option<&Span<ArgLabel>> {
        self.arguments.iter().find(|span| span.label.is_verb())
    }
}
