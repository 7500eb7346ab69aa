//! Maps PropBank-style propositions onto VerbNet-style frames: light-verb
//! re-targeting, syntax-to-role alignment and semantic predicate binding.

pub mod align;
pub mod error;
pub mod index;
pub mod lightverb;
pub mod mappings;
pub mod output;
pub mod parser;
pub mod predicates;

#[cfg(test)]
pub(crate) mod fixtures;

pub use align::{phrase_category, Aligner, Alignment, RoleAssignment};
pub use error::ResourceError;
pub use index::{ClassIndex, FrameResource};
pub use lightverb::{retarget, ChildFilter, LightVerbMapper, PredicateDetector};
pub use mappings::{LexicalTable, RoleMappings, RoleRule};
pub use output::{PropositionParse, SemanticParse};
pub use parser::{resolve_senses, RoleLabeler, SemanticParser, SenseClassifier, SensePrediction};
pub use predicates::{build_predicates, refine_path_relation, role_equivalences};
