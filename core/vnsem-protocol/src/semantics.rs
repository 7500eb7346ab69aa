use core::fmt;

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::Serialize as SerdeSerialize;

use crate::ids::ClassId;
use crate::labels::ArgLabel;
use crate::model::TemplateArg;
use crate::span::Span;
use crate::vocabulary::PredicateType;

/// Value substituted into a template slot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeSerialize))]
pub enum BoundValue {
    /// Aligned argument span (thematic-role slots)
    Span(Span<ArgLabel>),
    /// Resolved sense (event slots)
    Sense(ClassId),
    /// Joined verb-specific features
    Feature(String),
}

/// A template slot plus its binding. `None` means "unknown", never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeSerialize))]
pub struct BoundArgument {
    pub slot: TemplateArg,
    pub value: Option<BoundValue>,
}

impl BoundArgument {
    pub fn unbound(slot: TemplateArg) -> Self {
        Self { slot, value: None }
    }

    pub fn is_bound(&self) -> bool {
        self.value.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeSerialize))]
pub struct BoundPredicate {
    pub kind: PredicateType,
    pub negated: bool,
    pub args: Vec<BoundArgument>,
}

impl BoundPredicate {
    /// Binding of the first thematic-role slot naming `role`.
    pub fn role_value(&self, role: crate::ThematicRole) -> Option<&BoundValue> {
        self.args.iter().find_map(|arg| match &arg.slot {
            TemplateArg::ThematicRole { role: slot_role, .. } if *slot_role == role => arg.value.as_ref(),
            _ => None,
        })
    }
}

impl fmt::Display for BoundValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundValue::Span(span) => write!(f, "{}", span),
            BoundValue::Sense(sense) => write!(f, "{}", sense),
            BoundValue::Feature(features) => f.write_str(features),
        }
    }
}

impl fmt::Display for BoundArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.slot {
            TemplateArg::Event(name) => write!(f, "Event({}", name)?,
            TemplateArg::ThematicRole { role, implicit } => {
                write!(f, "ThemRole({}{}", if *implicit { "?" } else { "" }, role)?
            }
            TemplateArg::Constant(value) => return write!(f, "Constant({})", value),
            TemplateArg::VerbSpecific(name) => write!(f, "VerbSpecific({}", name)?,
        }
        match &self.value {
            Some(value) => write!(f, " = {})", value),
            None => f.write_str(")"),
        }
    }
}

impl fmt::Display for BoundPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            f.write_str("!")?;
        }
        write!(f, "{}(", self.kind)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", arg)?;
        }
        f.write_str(")")
    }
}
