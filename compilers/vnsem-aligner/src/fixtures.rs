//! Shared test resources: a handful of classes, correspondences, and parsed
//! sentences.

use vnsem_protocol::{ArgKind, ArgLabel, ClassId, PhraseCategories, Proposition, Span, ThematicRole};
use vnsem_tree::{DepTree, TokenRow};

use crate::index::ClassIndex;
use crate::mappings::{LexicalTable, RoleMappings, RoleRule};

pub const CLASSES: &str = r#"{
    "version": 1,
    "classes": [
        {"id": "give-13.1",
         "members": ["give", {"lemma": "lend", "features": ["temporary"]}],
         "frames": [
            {"description": "NP V NP NP",
             "syntax": "NP.Agent V NP.Recipient NP.Theme",
             "semantics": ["has_possession(start(E), Agent, Theme)",
                           "has_possession(end(E), Recipient, Theme)",
                           "transfer(during(E), Theme)",
                           "cause(Agent, E)"]},
            {"description": "NP V NP PP.recipient",
             "syntax": "NP.Agent V NP.Theme PP.Recipient",
             "semantics": ["path_rel(start(E), Agent, Theme, ch_of_poss, prep)",
                           "cause(E, Agent, Theme, Recipient)"]}
         ]},
        {"id": "look-30.3",
         "members": ["look"],
         "frames": [
            {"syntax": "NP.Experiencer V PP.Stimulus",
             "semantics": ["perceive(during(E), Experiencer, Stimulus)"]}
         ]},
        {"id": "cut-21.1",
         "members": ["cut", {"lemma": "slash", "features": ["forceful", "swift"]}],
         "frames": [
            {"syntax": "NP.Agent V NP.Patient",
             "semantics": ["manner(during(E), V_Manner, Agent)",
                           "degradation_material_integrity(result(E), Patient)"]}
         ]},
        {"id": "become-109.1",
         "members": ["become"],
         "frames": [
            {"syntax": "NP.Patient V NP.Result",
             "semantics": ["equals(Patient, Theme)",
                           "path_rel(start(E), Theme, ?Initial_State, change-of-state, Result)",
                           "has_state(result(E), Theme, Result)"]}
         ]}
    ]
}"#;

pub fn index() -> ClassIndex {
    ClassIndex::from_source(CLASSES).unwrap()
}

pub fn role_mappings() -> RoleMappings {
    let rule = |scope: Option<&str>, label: ArgKind, categories: PhraseCategories, roles: &[ThematicRole]| RoleRule {
        scope: scope.map(ClassId::new),
        label,
        categories,
        roles: roles.to_vec(),
    };
    RoleMappings::new(vec![
        rule(None, ArgKind::Numbered(0), PhraseCategories::NP, &[ThematicRole::Agent, ThematicRole::Experiencer]),
        rule(None, ArgKind::Numbered(1), PhraseCategories::NP, &[ThematicRole::Theme, ThematicRole::Patient]),
        rule(
            None,
            ArgKind::Numbered(2),
            PhraseCategories::NP | PhraseCategories::PP,
            &[ThematicRole::Recipient, ThematicRole::Destination, ThematicRole::Result],
        ),
        rule(Some("look-30.3"), ArgKind::Numbered(1), PhraseCategories::PP, &[ThematicRole::Stimulus]),
        rule(None, ArgKind::Modifier("LOC".to_string()), PhraseCategories::all(), &[ThematicRole::Location]),
    ])
}

pub fn light_verbs() -> LexicalTable {
    let mut table = LexicalTable::new();
    table.insert("take", "look", ClassId::new("look-30.3"));
    table
}

fn row(text: &str, lemma: &str, pos: &str, head: Option<usize>, relation: &str) -> TokenRow {
    TokenRow {
        text: text.to_string(),
        lemma: lemma.to_string(),
        pos: pos.to_string(),
        head,
        relation: relation.to_string(),
    }
}

pub fn arg(label: ArgLabel, start: usize, end: usize) -> Span<ArgLabel> {
    Span::new(label, start, end)
}

/// "John gave a book to Mary"
pub fn give_tree() -> DepTree {
    DepTree::from_rows(vec![
        row("John", "john", "NNP", Some(1), "nsubj"),
        row("gave", "give", "VBD", None, "root"),
        row("a", "a", "DT", Some(3), "det"),
        row("book", "book", "NN", Some(1), "dobj"),
        row("to", "to", "IN", Some(1), "prep"),
        row("Mary", "mary", "NNP", Some(4), "pobj"),
    ])
    .unwrap()
}

pub fn give_prop() -> Proposition {
    Proposition::new(
        1,
        Some(ClassId::new("give-13.1")),
        vec![
            arg(ArgLabel::numbered(0), 0, 0),
            arg(ArgLabel::verb(), 1, 1),
            arg(ArgLabel::numbered(1), 2, 3),
            arg(ArgLabel::numbered(2), 4, 5),
        ],
    )
}

/// "John took a look at his phone"
pub fn look_tree() -> DepTree {
    DepTree::from_rows(vec![
        row("John", "john", "NNP", Some(1), "nsubj"),
        row("took", "take", "VBD", None, "root"),
        row("a", "a", "DT", Some(3), "det"),
        row("look", "look", "NN", Some(1), "dobj"),
        row("at", "at", "IN", Some(3), "prep"),
        row("his", "he", "PRP$", Some(6), "poss"),
        row("phone", "phone", "NN", Some(4), "pobj"),
    ])
    .unwrap()
}

pub fn took_prop() -> Proposition {
    Proposition::new(
        1,
        None,
        vec![
            arg(ArgLabel::numbered(0), 0, 0),
            arg(ArgLabel::verb(), 1, 1),
            arg(ArgLabel::numbered(1), 2, 6),
        ],
    )
}

/// "Mary slashed the rope"
pub fn slash_tree() -> DepTree {
    DepTree::from_rows(vec![
        row("Mary", "mary", "NNP", Some(1), "nsubj"),
        row("slashed", "slash", "VBD", None, "root"),
        row("the", "the", "DT", Some(3), "det"),
        row("rope", "rope", "NN", Some(1), "dobj"),
    ])
    .unwrap()
}

pub fn slash_prop() -> Proposition {
    Proposition::new(
        1,
        Some(ClassId::new("cut-21.1")),
        vec![
            arg(ArgLabel::numbered(0), 0, 0),
            arg(ArgLabel::verb(), 1, 1),
            arg(ArgLabel::numbered(1), 2, 3),
        ],
    )
}

/// "The water became ice"
pub fn become_tree() -> DepTree {
    DepTree::from_rows(vec![
        row("The", "the", "DT", Some(1), "det"),
        row("water", "water", "NN", Some(2), "nsubj"),
        row("became", "become", "VBD", None, "root"),
        row("ice", "ice", "NN", Some(2), "attr"),
    ])
    .unwrap()
}

pub fn become_prop() -> Proposition {
    Proposition::new(
        2,
        Some(ClassId::new("become-109.1")),
        vec![
            arg(ArgLabel::numbered(1), 0, 1),
            arg(ArgLabel::verb(), 2, 2),
            arg(ArgLabel::numbered(2), 3, 3),
        ],
    )
}
