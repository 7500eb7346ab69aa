//! Syntax-to-role alignment: map each argument span of a proposition onto
//! the thematic role it realizes in one of the sense's frames.

use tracing::debug;
use vnsem_protocol::{
    ArgLabel, ClassId, Frame, PhraseCategories, Proposition, Span, SyntaxSlot, ThematicRole, VerbClass,
};
use vnsem_tree::DepTree;

use crate::index::FrameResource;
use crate::mappings::RoleMappings;

/// What an argument span was aligned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleAssignment {
    /// The predicate's own span
    Verb,
    Role(ThematicRole),
    Unassigned,
}

/// Best frame for a proposition plus one entry per argument span, in
/// argument order.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment<'r> {
    pub class: &'r VerbClass,
    pub frame: &'r Frame,
    pub entries: Vec<(Span<ArgLabel>, RoleAssignment)>,
    pub score: usize,
}

impl<'r> Alignment<'r> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Span aligned to `role`, if any.
    pub fn by_role(&self, role: ThematicRole) -> Option<&Span<ArgLabel>> {
        self.entries
            .iter()
            .find(|(_, assignment)| *assignment == RoleAssignment::Role(role))
            .map(|(span, _)| span)
    }

    pub fn verb(&self) -> Option<&Span<ArgLabel>> {
        self.entries
            .iter()
            .find(|(_, assignment)| *assignment == RoleAssignment::Verb)
            .map(|(span, _)| span)
    }

    /// The proposition re-expressed in thematic-role terms. Unassigned spans
    /// are left out.
    pub fn thematic_spans(&self) -> Vec<Span<ThematicRole>> {
        self.entries
            .iter()
            .filter_map(|(span, assignment)| match assignment {
                RoleAssignment::Verb => Some(span.relabel(ThematicRole::Verb)),
                RoleAssignment::Role(role) => Some(span.relabel(*role)),
                RoleAssignment::Unassigned => None,
            })
            .collect()
    }
}

/// Scores every frame of a sense against a proposition's arguments using the
/// structural correspondence table.
#[derive(Debug, Clone, Default)]
pub struct Aligner {
    mappings: RoleMappings,
}

impl Aligner {
    pub fn new(mappings: RoleMappings) -> Self {
        Self { mappings }
    }

    pub fn mappings(&self) -> &RoleMappings {
        &self.mappings
    }

    /// Highest-scoring frame of the proposition's sense. The earliest frame
    /// wins a tie. `None` when the sense is missing or unknown, or no frame
    /// aligns the predicate span.
    pub fn align<'r, R: FrameResource + ?Sized>(
        &self,
        resource: &'r R,
        proposition: &Proposition,
        tree: &DepTree,
    ) -> Option<Alignment<'r>> {
        let sense = proposition.sense.as_ref()?;
        let Some(class) = resource.class_by_id(sense) else {
            debug!(sense = %sense, "sense has no frames");
            return None;
        };

        let categories: Vec<PhraseCategories> = proposition
            .arguments
            .iter()
            .map(|argument| phrase_category(tree, argument))
            .collect();

        let mut best: Option<Alignment<'r>> = None;
        for frame in &class.frames {
            let entries = self.match_frame(&class.id, frame, &proposition.arguments, &categories);
            let score = entries
                .iter()
                .filter(|(_, assignment)| *assignment != RoleAssignment::Unassigned)
                .count();
            let has_verb = entries.iter().any(|(_, assignment)| *assignment == RoleAssignment::Verb);
            debug!(class = %class.id, frame = frame.index.0, score, has_verb, "scored frame");

            if !has_verb {
                continue;
            }
            if best.as_ref().map_or(true, |current| score > current.score) {
                best = Some(Alignment { class, frame, entries, score });
            }
        }
        best
    }

    /// Assign argument spans to frame slots, maximizing the number of
    /// assigned spans. Without conflicts each span gets its first acceptable
    /// slot; earlier spans move to another slot only to make room.
    fn match_frame(
        &self,
        class: &ClassId,
        frame: &Frame,
        arguments: &[Span<ArgLabel>],
        categories: &[PhraseCategories],
    ) -> Vec<(Span<ArgLabel>, RoleAssignment)> {
        let slots = &frame.syntax;
        let accepted: Vec<Vec<usize>> = arguments
            .iter()
            .zip(categories)
            .map(|(argument, &category)| {
                if argument.label.is_verb() {
                    return (0..slots.len()).filter(|&i| slots[i].is_verb()).collect();
                }
                let candidates = self.mappings.candidates(class, &argument.label, category);
                (0..slots.len())
                    .filter(|&i| {
                        slots[i].role.is_some_and(|role| candidates.contains(&role))
                            && (category.is_empty() || slot_category(slots, i).intersects(category))
                    })
                    .collect()
            })
            .collect();

        let mut owner: Vec<Option<usize>> = vec![None; slots.len()];
        for argument in 0..arguments.len() {
            let mut seen = vec![false; slots.len()];
            augment(argument, &accepted, &mut owner, &mut seen);
        }

        arguments
            .iter()
            .enumerate()
            .map(|(i, argument)| {
                let assignment = owner
                    .iter()
                    .position(|owner| *owner == Some(i))
                    .and_then(|slot| {
                        if argument.label.is_verb() {
                            Some(RoleAssignment::Verb)
                        } else {
                            slots[slot].role.map(RoleAssignment::Role)
                        }
                    })
                    .unwrap_or(RoleAssignment::Unassigned);
                (argument.clone(), assignment)
            })
            .collect()
    }
}

/// Augmenting-path step of bipartite matching: give `argument` a slot,
/// moving earlier owners along if they have an alternative.
fn augment(argument: usize, accepted: &[Vec<usize>], owner: &mut [Option<usize>], seen: &mut [bool]) -> bool {
    for &slot in &accepted[argument] {
        if seen[slot] {
            continue;
        }
        seen[slot] = true;
        let free = match owner[slot] {
            None => true,
            Some(other) => augment(other, accepted, owner, seen),
        };
        if free {
            owner[slot] = Some(argument);
            return true;
        }
    }
    false
}

/// Categories slot `i` accepts. An NP right after a lexical slot
/// (`{to} NP.Recipient`) also takes the PP that includes the preposition.
fn slot_category(slots: &[SyntaxSlot], i: usize) -> PhraseCategories {
    let category = slots[i].category;
    let after_lexical = i > 0 && slots[i - 1].category.contains(PhraseCategories::LEX);
    if after_lexical && category.contains(PhraseCategories::NP) {
        category | PhraseCategories::PP
    } else {
        category
    }
}

/// Phrase category of an argument span, judged from its first token and its
/// head (the token whose head lies outside the span). Empty when unknown.
pub fn phrase_category(tree: &DepTree, span: &Span<ArgLabel>) -> PhraseCategories {
    if span.label.is_verb() {
        return PhraseCategories::VERB;
    }
    let head = (span.start..=span.end)
        .find(|&index| tree.head(index).map_or(true, |head| !span.contains(head)))
        .and_then(|index| tree.node(index));
    let (Some(head), Some(first)) = (head, tree.node(span.start)) else {
        return PhraseCategories::empty();
    };

    let preposition = |pos: &str| pos == "IN" || pos == "TO";
    let pos = head.pos.as_str();
    if pos.starts_with("VB") || pos == "MD" {
        PhraseCategories::S
    } else if preposition(pos) || (span.len() > 1 && preposition(&first.pos)) {
        PhraseCategories::PP
    } else if pos.starts_with('N') || pos.starts_with("PRP") || pos.starts_with("WP") || matches!(pos, "CD" | "DT" | "EX") {
        PhraseCategories::NP
    } else if pos.starts_with("JJ") {
        PhraseCategories::ADJP
    } else if pos.starts_with("RB") {
        PhraseCategories::ADVP
    } else {
        PhraseCategories::empty()
    }
}
