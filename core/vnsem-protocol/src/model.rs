use rkyv::{Archive, Deserialize, Serialize};
use crate::ids::{ClassId, FrameIndex};
use crate::vocabulary::{PhraseCategories, PredicateType, ThematicRole};
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// A verb listed in a class, with the verb-specific features the class's
/// templates can refer to.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Member {
    pub lemma: String,
    pub features: Vec<String>,
}

/// One position of a frame's syntactic pattern.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct SyntaxSlot {
    pub category: PhraseCategories,
    pub role: Option<ThematicRole>,
    /// Literal word for lexical slots (`{to}`)
    pub value: Option<String>,
}

impl SyntaxSlot {
    pub fn phrase(category: PhraseCategories, role: ThematicRole) -> Self {
        Self { category, role: Some(role), value: None }
    }

    pub fn verb() -> Self {
        Self { category: PhraseCategories::VERB, role: None, value: None }
    }

    pub fn lexical(value: impl Into<String>) -> Self {
        Self { category: PhraseCategories::LEX, role: None, value: Some(value.into()) }
    }

    pub fn is_verb(&self) -> bool {
        self.category.contains(PhraseCategories::VERB)
    }
}

/// Argument slot of a semantic-predicate template.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub enum TemplateArg {
    /// Event variable (`E`, `e1`, `during(E)`), bound to the sense instance
    Event(String),
    /// Participant, bound to the span aligned with `role`. Implicit roles are written `?Role`.
    ThematicRole { role: ThematicRole, implicit: bool },
    /// Literal tag, never bound
    Constant(String),
    /// Verb-specific slot (`V_Manner`), bound to the member's feature string
    VerbSpecific(String),
}

impl TemplateArg {
    pub fn is_constant(&self) -> bool {
        matches!(self, TemplateArg::Constant(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct PredicateTemplate {
    pub kind: PredicateType,
    pub negated: bool,
    pub args: Vec<TemplateArg>,
}

impl PredicateTemplate {
    pub fn roles(&self) -> impl Iterator<Item = ThematicRole> + '_ {
        self.args.iter().filter_map(|arg| match arg {
            TemplateArg::ThematicRole { role, .. } => Some(*role),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Frame {
    pub index: FrameIndex,
    pub description: String,
    pub syntax: Vec<SyntaxSlot>,
    pub semantics: Vec<PredicateTemplate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct VerbClass {
    pub id: ClassId,
    pub members: Vec<Member>,
    /// Frames in declaration order
    pub frames: Vec<Frame>,
}

impl VerbClass {
    pub fn member(&self, lemma: &str) -> Option<&Member> {
        self.members.iter().find(|member| member.lemma == lemma)
    }
}

/// Root of the compiled frame resource.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct FrameArchive {
    pub version: u32,
    pub classes: Vec<VerbClass>,
}
