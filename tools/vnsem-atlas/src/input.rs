//! Pre-analysed sentence input: dependency tokens plus labeled propositions.

use anyhow::{bail, ensure, Context, Result};
use serde::Deserialize;
use vnsem_aligner::{resolve_senses, SensePrediction};
use vnsem_notation::parse_arg_label;
use vnsem_protocol::{ClassId, Proposition, Span};
use vnsem_tree::{DepTree, TokenRow};

#[derive(Debug, Clone, Deserialize)]
pub struct SentenceInput {
    pub tokens: Vec<TokenInput>,
    #[serde(default)]
    pub propositions: Vec<PropositionInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenInput {
    pub text: String,
    /// Defaults to the lowercased text
    #[serde(default)]
    pub lemma: Option<String>,
    pub pos: String,
    /// Zero-based index of the head token, `null` for the root
    #[serde(default)]
    pub head: Option<usize>,
    #[serde(default, alias = "deprel")]
    pub relation: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PropositionInput {
    pub predicate: usize,
    /// Resolved sense; wins over `senses`
    #[serde(default)]
    pub sense: Option<String>,
    /// Scored candidates from a sense classifier
    #[serde(default)]
    pub senses: Vec<ScoredSense>,
    pub arguments: Vec<ArgumentInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoredSense {
    pub id: String,
    pub score: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArgumentInput {
    pub label: String,
    pub start: usize,
    /// Inclusive; defaults to `start`
    #[serde(default)]
    pub end: Option<usize>,
}

impl SentenceInput {
    pub fn tree(&self) -> Result<DepTree> {
        let rows = self.tokens.iter().map(|token| TokenRow {
            text: token.text.clone(),
            lemma: token.lemma.clone().unwrap_or_else(|| token.text.to_lowercase()),
            pos: token.pos.clone(),
            head: token.head,
            relation: token.relation.clone(),
        });
        let tree = DepTree::from_rows(rows)?;
        if let Some(error) = tree.validate().into_iter().next() {
            bail!(error);
        }
        Ok(tree)
    }

    pub fn propositions(&self) -> Result<Vec<Proposition>> {
        let len = self.tokens.len();
        self.propositions
            .iter()
            .map(|input| {
                ensure!(input.predicate < len, "predicate {} is outside the sentence", input.predicate);
                let arguments = input
                    .arguments
                    .iter()
                    .map(|argument| argument.span(len))
                    .collect::<Result<Vec<_>>>()
                    .with_context(|| format!("proposition at {}", input.predicate))?;
                Ok(Proposition::new(input.predicate, input.resolve_sense(), arguments))
            })
            .collect()
    }
}

impl PropositionInput {
    fn resolve_sense(&self) -> Option<ClassId> {
        if let Some(sense) = &self.sense {
            return Some(ClassId::new(sense.as_str()));
        }
        let prediction = SensePrediction {
            index: self.predicate,
            senses: self.senses.iter().map(|scored| (ClassId::new(scored.id.as_str()), scored.score)).collect(),
        };
        resolve_senses(&[prediction]).pop().map(|span| span.label)
    }
}

impl ArgumentInput {
    fn span(&self, len: usize) -> Result<Span<vnsem_protocol::ArgLabel>> {
        let label = parse_arg_label(&self.label)?;
        let end = self.end.unwrap_or(self.start);
        match Span::checked(label, self.start, end) {
            Some(span) if span.end < len => Ok(span),
            _ => bail!("argument {} [{}..{}] is not a span of the sentence", self.label, self.start, end),
        }
    }
}
