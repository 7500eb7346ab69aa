use core::fmt;

#[cfg(feature = "serde")]
use serde::Serialize as SerdeSerialize;

/// Inclusive token range `[start, end]` with a payload.
///
/// Indices refer to one specific token sequence and mean nothing outside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeSerialize))]
pub struct Span<T> {
    pub label: T,
    pub start: usize,
    pub end: usize,
}

impl<T> Span<T> {
    pub fn new(label: T, start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {} after end {}", start, end);
        Self { label, start, end }
    }

    /// Like [`Span::new`], but rejects reversed ranges instead of asserting.
    pub fn checked(label: T, start: usize, end: usize) -> Option<Self> {
        (start <= end).then(|| Self { label, start, end })
    }

    pub fn single(label: T, index: usize) -> Self {
        Self { label, start: index, end: index }
    }

    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    /// Same range, different payload.
    pub fn relabel<U>(&self, label: U) -> Span<U> {
        Span { label, start: self.start, end: self.end }
    }
}

impl<T: fmt::Display> fmt::Display for Span<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}[{}]", self.label, self.start)
        } else {
            write!(f, "{}[{}..{}]", self.label, self.start, self.end)
        }
    }
}
