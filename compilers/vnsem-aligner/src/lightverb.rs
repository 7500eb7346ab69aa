//! Predicate re-targeting: light verbs ("take a look"), nominal and
//! adjectival predicate mappings.

use std::path::Path;

use tracing::debug;
use vnsem_protocol::{ArgLabel, ClassId, Proposition, Span};
use vnsem_tree::{DepTree, Node};

use crate::error::ResourceError;
use crate::index::FrameResource;
use crate::mappings::LexicalTable;

/// Which dependents of a predicate a mapper is allowed to consider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChildFilter {
    #[default]
    Any,
    /// Nouns that are not the modifier half of a compound
    Nominal,
    Adjectival,
}

impl ChildFilter {
    pub fn accepts(self, node: &Node) -> bool {
        match self {
            ChildFilter::Any => true,
            ChildFilter::Nominal => {
                node.pos.starts_with('N')
                    && !node
                        .relation
                        .as_deref()
                        .is_some_and(|relation| relation.eq_ignore_ascii_case("compound"))
            }
            ChildFilter::Adjectival => node.pos.starts_with("JJ"),
        }
    }
}

/// Maps a semantically light predicate onto the dependent carrying its sense.
#[derive(Debug, Clone, Default)]
pub struct LightVerbMapper {
    table: LexicalTable,
    filter: ChildFilter,
}

impl LightVerbMapper {
    pub fn new(table: LexicalTable) -> Self {
        Self { table, filter: ChildFilter::Any }
    }

    pub fn nominal(table: LexicalTable) -> Self {
        Self { table, filter: ChildFilter::Nominal }
    }

    pub fn adjectival(table: LexicalTable) -> Self {
        Self { table, filter: ChildFilter::Adjectival }
    }

    pub fn load<R: FrameResource + ?Sized>(
        path: impl AsRef<Path>,
        resource: &R,
        filter: ChildFilter,
    ) -> Result<Self, ResourceError> {
        let table = LexicalTable::load(path, resource)?;
        Ok(Self { table, filter })
    }

    pub fn table(&self) -> &LexicalTable {
        &self.table
    }

    /// First dependent, in the given order, whose lemma is listed under the
    /// predicate's lemma. Returns the dependent's one-token span labelled
    /// with the mapped class.
    pub fn detect(&self, predicate: &Node, children: &[Node]) -> Option<Span<ClassId>> {
        let entries = self.table.get(&predicate.lemma)?;
        children
            .iter()
            .filter(|child| self.filter.accepts(child))
            .find_map(|child| {
                entries
                    .iter()
                    .find(|(lemma, _)| *lemma == child.lemma)
                    .map(|(_, class)| Span::single(class.clone(), child.index))
            })
    }

    /// `detect` over the predicate at `index` and its dependents in `tree`.
    pub fn map_predicate(&self, tree: &DepTree, index: usize) -> Option<Span<ClassId>> {
        let predicate = tree.node(index)?;
        let target = self.detect(&predicate, &tree.child_nodes(index))?;
        debug!(predicate = %predicate.lemma, target = target.start, class = %target.label, "re-targeted predicate");
        Some(target)
    }
}

/// Ordered chain of mappers; the first one that finds a target wins.
#[derive(Debug, Clone, Default)]
pub struct PredicateDetector {
    mappers: Vec<LightVerbMapper>,
}

impl PredicateDetector {
    pub fn new(mappers: Vec<LightVerbMapper>) -> Self {
        Self { mappers }
    }

    pub fn push(&mut self, mapper: LightVerbMapper) {
        self.mappers.push(mapper);
    }

    pub fn is_empty(&self) -> bool {
        self.mappers.is_empty()
    }

    pub fn map_predicate(&self, tree: &DepTree, index: usize) -> Option<Span<ClassId>> {
        self.mappers.iter().find_map(|mapper| mapper.map_predicate(tree, index))
    }

    /// Re-target `proposition` if its predicate is mapped, else `None`.
    pub fn map_proposition(&self, tree: &DepTree, proposition: &Proposition) -> Option<Proposition> {
        let target = self.map_predicate(tree, proposition.predicate)?;
        Some(retarget(proposition, target))
    }
}

/// Move the predicate of `proposition` onto `target`. The old `V` span is
/// dropped and the argument covering the target is split around it: the
/// part before the target goes, the target becomes `V`, the rest keeps
/// the argument's label.
pub fn retarget(proposition: &Proposition, target: Span<ClassId>) -> Proposition {
    let child = target.start;
    let mut arguments = Vec::with_capacity(proposition.arguments.len() + 1);
    let mut placed = false;

    for argument in &proposition.arguments {
        if argument.label.is_verb() {
            continue;
        }
        if !argument.contains(child) {
            arguments.push(argument.clone());
            continue;
        }
        arguments.push(Span::single(ArgLabel::verb(), child));
        placed = true;
        if child < argument.end {
            arguments.push(Span::new(argument.label.clone(), child + 1, argument.end));
        }
    }

    if !placed {
        let position = arguments.iter().position(|argument| argument.start > child).unwrap_or(arguments.len());
        arguments.insert(position, Span::single(ArgLabel::verb(), child));
    }

    Proposition::new(child, Some(target.label), arguments)
}
