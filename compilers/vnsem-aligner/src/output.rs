use std::fmt::Write;

use serde::Serialize;
use vnsem_protocol::{BoundPredicate, FrameIndex, Proposition, SentenceId, Span, ThematicRole};

/// Result for one proposition. Alignment failures keep the proposition with
/// no frame, no roles and no predicates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropositionParse {
    /// As produced by the role labeler
    pub proposition: Proposition,
    /// Re-targeted proposition when a light-verb or predicate mapping applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retargeted: Option<Proposition>,
    pub frame: Option<FrameIndex>,
    /// Argument spans in thematic-role terms
    pub roles: Option<Vec<Span<ThematicRole>>>,
    pub predicates: Vec<BoundPredicate>,
}

impl PropositionParse {
    pub fn unaligned(proposition: Proposition, retargeted: Option<Proposition>) -> Self {
        Self { proposition, retargeted, frame: None, roles: None, predicates: Vec::new() }
    }

    /// The proposition the semantics were derived from.
    pub fn effective(&self) -> &Proposition {
        self.retargeted.as_ref().unwrap_or(&self.proposition)
    }

    pub fn is_aligned(&self) -> bool {
        self.frame.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemanticParse {
    pub sentence: SentenceId,
    pub tokens: Vec<String>,
    pub propositions: Vec<PropositionParse>,
}

impl SemanticParse {
    /// Plain-text rendering, one block per proposition.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "#{} {}", self.sentence.0, self.tokens.join(" "));
        for parse in &self.propositions {
            let proposition = parse.effective();
            let word = self.tokens.get(proposition.predicate).map(String::as_str).unwrap_or("?");
            let sense = proposition.sense.as_ref().map(|sense| sense.as_str()).unwrap_or("-");
            match parse.frame {
                Some(frame) => {
                    let _ = writeln!(out, "  {} [{}] frame {}", word, sense, frame.0);
                }
                None => {
                    let _ = writeln!(out, "  {} [{}] unaligned", word, sense);
                }
            }
            if let Some(roles) = &parse.roles {
                let roles: Vec<String> = roles
                    .iter()
                    .map(|span| format!("{}={}", span.label, self.text(span.start, span.end)))
                    .collect();
                let _ = writeln!(out, "    roles: {}", roles.join(", "));
            }
            for predicate in &parse.predicates {
                let _ = writeln!(out, "    {}", predicate);
            }
        }
        out
    }

    fn text(&self, start: usize, end: usize) -> String {
        self.tokens
            .get(start..=end.min(self.tokens.len().saturating_sub(1)))
            .map(|words| words.join(" "))
            .unwrap_or_default()
    }
}
