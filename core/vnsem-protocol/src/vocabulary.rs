use core::fmt;
use core::str::FromStr;

use alloc::string::String;
use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use bitflags::bitflags;

/// A name that matched no entry of a closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownName {
    pub vocabulary: &'static str,
    pub name: String,
}

impl fmt::Display for UnknownName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: `{}`", self.vocabulary, self.name)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UnknownName {}

/// Lowercase, dropping the separators the resource spells inconsistently
/// (`Co-Agent`, `co_agent`, `CoAgent`).
fn fold_name(name: &str) -> impl Iterator<Item = char> + '_ {
    name.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .map(|c| c.to_ascii_lowercase())
}

fn same_name(a: &str, b: &str) -> bool {
    fold_name(a).eq(fold_name(b))
}

macro_rules! closed_vocabulary {
    ($(#[$meta:meta])* $ty:ident, $label:expr, { $($variant:ident => $name:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
        #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
        #[archive(check_bytes)]
        #[repr(u8)]
        pub enum $ty {
            $($variant),+
        }

        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            /// Spelling used by the lexical resource.
            pub const fn name(self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }
        }

        impl FromStr for $ty {
            type Err = UnknownName;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|candidate| same_name(candidate.name(), s))
                    .ok_or_else(|| UnknownName { vocabulary: $label, name: String::from(s) })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

closed_vocabulary!(
    /// Thematic roles of the verb-class inventory, plus the reserved `Verb`
    /// pseudo-role that the predicate span always aligns to.
    ThematicRole, "thematic role", {
    Actor => "Actor",
    Agent => "Agent",
    Asset => "Asset",
    Attribute => "Attribute",
    Beneficiary => "Beneficiary",
    Cause => "Cause",
    Circumstance => "Circumstance",
    CoAgent => "Co-Agent",
    CoPatient => "Co-Patient",
    CoTheme => "Co-Theme",
    Context => "Context",
    Destination => "Destination",
    Duration => "Duration",
    Eventuality => "Eventuality",
    Experiencer => "Experiencer",
    Extent => "Extent",
    FinalTime => "Final_Time",
    Frequency => "Frequency",
    Goal => "Goal",
    InitialLocation => "Initial_Location",
    InitialState => "Initial_State",
    InitialTime => "Initial_Time",
    Instrument => "Instrument",
    Location => "Location",
    Manner => "Manner",
    Material => "Material",
    Path => "Path",
    Patient => "Patient",
    Pivot => "Pivot",
    Place => "Place",
    Precondition => "Precondition",
    Predicate => "Predicate",
    Product => "Product",
    Recipient => "Recipient",
    Reflexive => "Reflexive",
    Result => "Result",
    Source => "Source",
    Stimulus => "Stimulus",
    Theme => "Theme",
    Time => "Time",
    Topic => "Topic",
    Trajectory => "Trajectory",
    Value => "Value",
    Verb => "Verb",
});

closed_vocabulary!(
    /// Semantic predicate vocabulary. `PathRel` is the generic path marker;
    /// the `Change*` and `TransferOfInformation` kinds are its refinements.
    PredicateType, "semantic predicate", {
    Absorb => "absorb",
    Adjust => "adjust",
    Adv => "adv",
    Alive => "alive",
    Appear => "appear",
    ApplyHeat => "apply_heat",
    Approve => "approve",
    Assess => "assess",
    Attached => "attached",
    AuthorityRelationship => "authority_relationship",
    Be => "be",
    Believe => "believe",
    BodyMotion => "body_motion",
    BodyProcess => "body_process",
    BodyReflexive => "body_reflexive",
    Capacity => "capacity",
    Cause => "cause",
    ChangeOfLocation => "change_of_location",
    ChangeOfPossession => "change_of_possession",
    ChangeOfState => "change_of_state",
    ChangeOnScale => "change_on_scale",
    Conflict => "conflict",
    Consider => "consider",
    Contact => "contact",
    Contain => "contain",
    Cooperate => "cooperate",
    CoTemporal => "co-temporal",
    CreatedImage => "created_image",
    Declare => "declare",
    DegradationMaterialIntegrity => "degradation_material_integrity",
    Desire => "desire",
    Different => "different",
    Direction => "direction",
    Disappear => "disappear",
    Discomfort => "discomfort",
    Do => "do",
    Emit => "emit",
    EmotionalState => "emotional_state",
    Equals => "equals",
    ExertForce => "exert_force",
    Exist => "exist",
    Experience => "experience",
    Free => "free",
    HasAttribute => "has_attribute",
    HasLocation => "has_location",
    HasOrganizationRole => "has_organization_role",
    HasOrientation => "has_orientation",
    HasPart => "has_part",
    HasPhysicalForm => "has_physical_form",
    HasPossession => "has_possession",
    HasRole => "has_role",
    HasState => "has_state",
    HasVal => "has_val",
    Help => "help",
    InReactionTo => "in_reaction_to",
    Indicate => "indicate",
    IntrinsicProperty => "intrinsic_property",
    Involuntary => "involuntary",
    Involve => "involve",
    Irrealis => "irrealis",
    Limit => "limit",
    Location => "location",
    Manner => "manner",
    Meets => "meets",
    Mingled => "mingled",
    Motion => "motion",
    Occur => "occur",
    PathRel => "path_rel",
    Perceive => "perceive",
    Property => "property",
    Require => "require",
    RotationalMotion => "rotational_motion",
    Satisfy => "satisfy",
    SocialInteraction => "social_interaction",
    SpatialConfig => "spatial_config",
    Suffocated => "suffocated",
    Support => "support",
    TakeCareOf => "take_care_of",
    TakeIn => "take_in",
    Transfer => "transfer",
    TransferInfo => "transfer_info",
    TransferOfInformation => "transfer_of_information",
    Utilize => "utilize",
    Wear => "wear",
    Work => "work",
});

bitflags! {
    /// Syntactic category of a frame slot or argument phrase.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    pub struct PhraseCategories: u32 {
        const NP = 1;
        const PP = 2;
        const ADJP = 4;
        const ADVP = 8;
        const S = 16;
        const VERB = 32;
        // Lexical items in a frame pattern (`{to}`, PREP)
        const LEX = 64;
    }
}

impl PhraseCategories {
    /// Resolve a category as written in frame patterns and mapping tables.
    pub fn parse_name(name: &str) -> Option<Self> {
        let category = match name.to_ascii_uppercase().as_str() {
            "NP" => Self::NP,
            "PP" => Self::PP,
            "ADJ" | "ADJP" => Self::ADJP,
            "ADV" | "ADVP" => Self::ADVP,
            "S" | "S_INF" | "S_ING" | "SBAR" => Self::S,
            "V" | "VERB" => Self::VERB,
            "LEX" | "PREP" => Self::LEX,
            _ => return None,
        };
        Some(category)
    }
}

// rkyv support for PhraseCategories
impl Archive for PhraseCategories {
    type Archived = u32;
    type Resolver = ();

    unsafe fn resolve(&self, _pos: usize, _resolver: Self::Resolver, out: *mut Self::Archived) {
        out.write(self.bits());
    }
}

impl<S: rkyv::ser::Serializer + ?Sized> Serialize<S> for PhraseCategories {
    fn serialize(&self, _serializer: &mut S) -> Result<Self::Resolver, S::Error> {
        Ok(())
    }
}

impl<D: rkyv::Fallible + ?Sized> Deserialize<PhraseCategories, D> for u32 {
    fn deserialize(&self, _deserializer: &mut D) -> Result<PhraseCategories, D::Error> {
        Ok(PhraseCategories::from_bits_truncate(*self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_spellings() {
        assert_eq!("Co-Agent".parse::<ThematicRole>(), Ok(ThematicRole::CoAgent));
        assert_eq!("co_agent".parse::<ThematicRole>(), Ok(ThematicRole::CoAgent));
        assert_eq!("initial_location".parse::<ThematicRole>(), Ok(ThematicRole::InitialLocation));
        assert!("Banana".parse::<ThematicRole>().is_err());
    }

    #[test]
    fn test_predicate_spellings() {
        assert_eq!("path_rel".parse::<PredicateType>(), Ok(PredicateType::PathRel));
        assert_eq!("PATH_REL".parse::<PredicateType>(), Ok(PredicateType::PathRel));
        assert_eq!("co-temporal".parse::<PredicateType>(), Ok(PredicateType::CoTemporal));
        assert_eq!(PredicateType::ChangeOfState.name(), "change_of_state");
    }

    #[test]
    fn test_category_names() {
        assert_eq!(PhraseCategories::parse_name("np"), Some(PhraseCategories::NP));
        assert_eq!(PhraseCategories::parse_name("S_INF"), Some(PhraseCategories::S));
        assert_eq!(PhraseCategories::parse_name("sbar"), Some(PhraseCategories::S));
        assert_eq!(PhraseCategories::parse_name("prep"), Some(PhraseCategories::LEX));
        assert_eq!(PhraseCategories::parse_name("QP"), None);
    }
}
