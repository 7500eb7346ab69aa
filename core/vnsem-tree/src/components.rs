use hecs::Entity;
use vnsem_protocol::TokenId;

/// Basic data about the token (Source of Truth)
#[derive(Debug, Clone)]
pub struct TokenData {
    pub index: TokenId,
    pub text: String,
    pub lemma: String,
    /// Part-of-speech tag as produced by the parser (`NN`, `VBD`, ...)
    pub pos: String,
}

/// Edge to the syntactic head. Roots carry no `Syntax` component.
#[derive(Debug, Clone)]
pub struct Syntax {
    pub head: Entity,
    /// Dependency relation label (`nsubj`, `dobj`, `compound`, ...)
    pub relation: String,
}

/// Detached view of one token, for callers that should not hold world borrows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub index: usize,
    pub text: String,
    pub lemma: String,
    pub pos: String,
    pub head: Option<usize>,
    pub relation: Option<String>,
}

impl Node {
    /// Convenience constructor for dependents handed to mappers directly.
    pub fn new(index: usize, text: &str, lemma: &str, pos: &str) -> Self {
        Self {
            index,
            text: text.to_string(),
            lemma: lemma.to_string(),
            pos: pos.to_string(),
            head: None,
            relation: None,
        }
    }

    pub fn with_relation(mut self, head: usize, relation: &str) -> Self {
        self.head = Some(head);
        self.relation = Some(relation.to_string());
        self
    }
}
