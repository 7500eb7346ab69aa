pub mod components;
pub mod systems;

use hecs::{Entity, World};
use thiserror::Error;
use vnsem_protocol::TokenId;

pub use components::Node;
use components::{Syntax, TokenData};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("token {0} is out of range")]
    UnknownToken(usize),
    #[error("token {0} cannot head itself")]
    SelfLoop(usize),
    #[error("expected exactly one root, found {0}")]
    RootCount(usize),
    #[error("token {0} is part of a head cycle")]
    Cycle(usize),
}

/// One row of parser output, used to build a tree in a single pass.
#[derive(Debug, Clone)]
pub struct TokenRow {
    pub text: String,
    pub lemma: String,
    pub pos: String,
    /// Head token index, `None` for the root
    pub head: Option<usize>,
    pub relation: String,
}

/// Dependency tree of one sentence. Tokens are entities; head edges are
/// `Syntax` components, so the root is the entity without one.
pub struct DepTree {
    world: World,
    tokens: Vec<Entity>,
}

impl Default for DepTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DepTree {
    pub fn new() -> Self {
        Self { world: World::new(), tokens: Vec::new() }
    }

    /// Expose the inner hecs World for external systems
    pub fn inner(&self) -> &World {
        &self.world
    }

    /// Append a token and return its index
    pub fn add_token(&mut self, text: impl Into<String>, lemma: impl Into<String>, pos: impl Into<String>) -> usize {
        let index = self.tokens.len();
        let entity = self.world.spawn((TokenData {
            index: TokenId::new(index as u32),
            text: text.into(),
            lemma: lemma.into(),
            pos: pos.into(),
        },));
        self.tokens.push(entity);
        index
    }

    /// Attach `child` under `head`
    pub fn set_dependency(&mut self, child: usize, head: usize, relation: impl Into<String>) -> Result<(), TreeError> {
        if child == head {
            return Err(TreeError::SelfLoop(child));
        }
        let child_entity = self.entity(child)?;
        let head_entity = self.entity(head)?;
        self.world
            .insert_one(child_entity, Syntax { head: head_entity, relation: relation.into() })
            .map_err(|_| TreeError::UnknownToken(child))
    }

    /// Build a tree from parser rows; heads may point forward.
    pub fn from_rows(rows: impl IntoIterator<Item = TokenRow>) -> Result<Self, TreeError> {
        let mut tree = Self::new();
        let mut edges = Vec::new();
        for row in rows {
            let index = tree.add_token(row.text, row.lemma, row.pos);
            if let Some(head) = row.head {
                edges.push((index, head, row.relation));
            }
        }
        for (child, head, relation) in edges {
            tree.set_dependency(child, head, relation)?;
        }
        Ok(tree)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn node(&self, index: usize) -> Option<Node> {
        let entity = *self.tokens.get(index)?;
        let token = self.world.get::<&TokenData>(entity).ok()?;
        let (head, relation) = match self.world.get::<&Syntax>(entity) {
            Ok(syntax) => (self.index_of(syntax.head), Some(syntax.relation.clone())),
            Err(_) => (None, None),
        };
        Some(Node {
            index,
            text: token.text.clone(),
            lemma: token.lemma.clone(),
            pos: token.pos.clone(),
            head,
            relation,
        })
    }

    pub fn lemma(&self, index: usize) -> Option<String> {
        let entity = *self.tokens.get(index)?;
        let token = self.world.get::<&TokenData>(entity).ok()?;
        Some(token.lemma.clone())
    }

    pub fn head(&self, index: usize) -> Option<usize> {
        let entity = *self.tokens.get(index)?;
        let syntax = self.world.get::<&Syntax>(entity).ok()?;
        self.index_of(syntax.head)
    }

    /// Direct dependents of `index`, in sentence order.
    pub fn children(&self, index: usize) -> Vec<usize> {
        let Some(&entity) = self.tokens.get(index) else {
            return Vec::new();
        };
        let mut children: Vec<usize> = self
            .world
            .query::<(&TokenData, &Syntax)>()
            .iter()
            .filter(|(_, (_, syntax))| syntax.head == entity)
            .map(|(_, (token, _))| token.index.0 as usize)
            .collect();
        children.sort_unstable();
        children
    }

    pub fn child_nodes(&self, index: usize) -> Vec<Node> {
        self.children(index).into_iter().filter_map(|child| self.node(child)).collect()
    }

    /// Tokens without a head
    pub fn roots(&self) -> Vec<usize> {
        (0..self.len()).filter(|&index| self.head(index).is_none()).collect()
    }

    pub fn tokens(&self) -> Vec<String> {
        (0..self.len())
            .filter_map(|index| self.node(index).map(|node| node.text))
            .collect()
    }

    /// Surface text of the inclusive range `[start, end]`
    pub fn text(&self, start: usize, end: usize) -> String {
        (start..=end)
            .filter_map(|index| self.node(index).map(|node| node.text))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run all structural checks
    pub fn validate(&self) -> Vec<TreeError> {
        systems::structure::check_structure(self)
    }

    fn entity(&self, index: usize) -> Result<Entity, TreeError> {
        self.tokens.get(index).copied().ok_or(TreeError::UnknownToken(index))
    }

    fn index_of(&self, entity: Entity) -> Option<usize> {
        self.world
            .get::<&TokenData>(entity)
            .ok()
            .map(|token| token.index.0 as usize)
    }
}
