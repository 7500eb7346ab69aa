#![no_std] // The resource model is shared with embedded/archive tooling

extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod ids;
pub mod labels;
pub mod vocabulary;
pub mod span;

// Re-export core types for convenience
pub use ids::{ClassId, FrameIndex, SentenceId, TokenId};
pub use labels::{ArgKind, ArgLabel, ArgPrefix};
pub use vocabulary::*;
pub use span::Span;

pub mod model;
pub use model::*;

pub mod proposition;
pub use proposition::Proposition;

pub mod semantics;
pub use semantics::{BoundArgument, BoundPredicate, BoundValue};
