//! Sentence and document pipeline: predicate re-targeting, alignment and
//! predicate binding over consumed sense and role predictions.

use tracing::debug;
use vnsem_protocol::{ClassId, Proposition, SentenceId, Span};
use vnsem_tree::DepTree;

use crate::align::Aligner;
use crate::index::FrameResource;
use crate::lightverb::PredicateDetector;
use crate::output::{PropositionParse, SemanticParse};
use crate::predicates::build_predicates;

/// Scored candidate senses for one predicate position.
#[derive(Debug, Clone, PartialEq)]
pub struct SensePrediction {
    pub index: usize,
    pub senses: Vec<(ClassId, f32)>,
}

/// Word-sense classifier over a parsed sentence.
pub trait SenseClassifier {
    fn predict(&self, tree: &DepTree) -> Vec<SensePrediction>;
}

/// Semantic role labeler producing the propositions of a sentence.
pub trait RoleLabeler {
    fn parse(&self, tree: &DepTree, senses: &[Span<ClassId>]) -> Vec<Proposition>;
}

/// Top-scoring sense per predicate. Ties keep the classifier's order;
/// predictions without candidates are skipped.
pub fn resolve_senses(predictions: &[SensePrediction]) -> Vec<Span<ClassId>> {
    predictions
        .iter()
        .filter_map(|prediction| {
            let mut best: Option<&(ClassId, f32)> = None;
            for candidate in &prediction.senses {
                if best.map_or(true, |(_, score)| candidate.1 > *score) {
                    best = Some(candidate);
                }
            }
            best.map(|(sense, _)| Span::single(sense.clone(), prediction.index))
        })
        .collect()
}

/// Maps propositions onto frames of a shared, read-only resource.
#[derive(Debug, Clone)]
pub struct SemanticParser<R> {
    resource: R,
    detector: PredicateDetector,
    aligner: Aligner,
}

impl<R: FrameResource> SemanticParser<R> {
    pub fn new(resource: R, detector: PredicateDetector, aligner: Aligner) -> Self {
        Self { resource, detector, aligner }
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    pub fn parse_proposition(&self, tree: &DepTree, proposition: Proposition) -> PropositionParse {
        // 1. Re-target light verbs and mapped nominal/adjectival predicates
        let retargeted = self.detector.map_proposition(tree, &proposition);
        let working = retargeted.as_ref().unwrap_or(&proposition);

        // 2. Align arguments with the best frame of the sense
        let Some(alignment) = self.aligner.align(&self.resource, working, tree) else {
            debug!(predicate = working.predicate, sense = ?working.sense, "no alignment");
            return PropositionParse::unaligned(proposition, retargeted);
        };
        debug_assert_eq!(alignment.len(), working.arguments.len());

        // 3. Bind the frame's templates
        let lemma = tree.lemma(working.predicate).unwrap_or_default();
        let predicates = build_predicates(&self.resource, &alignment, working, &lemma);

        PropositionParse {
            frame: Some(alignment.frame.index),
            roles: Some(alignment.thematic_spans()),
            predicates,
            proposition,
            retargeted,
        }
    }

    pub fn parse_propositions(&self, tree: &DepTree, propositions: Vec<Proposition>) -> Vec<PropositionParse> {
        propositions
            .into_iter()
            .map(|proposition| self.parse_proposition(tree, proposition))
            .collect()
    }

    /// Parse a sentence whose propositions are already labeled.
    pub fn parse_labeled(&self, sentence: SentenceId, tree: &DepTree, propositions: Vec<Proposition>) -> SemanticParse {
        SemanticParse {
            sentence,
            tokens: tree.tokens(),
            propositions: self.parse_propositions(tree, propositions),
        }
    }

    pub fn parse_sentence<C, L>(&self, sentence: SentenceId, tree: &DepTree, classifier: &C, labeler: &L) -> SemanticParse
    where
        C: SenseClassifier + ?Sized,
        L: RoleLabeler + ?Sized,
    {
        let senses = resolve_senses(&classifier.predict(tree));
        let propositions = labeler.parse(tree, &senses);
        self.parse_labeled(sentence, tree, propositions)
    }

    /// Parse every sentence, numbering them in input order.
    pub fn parse_document<C, L>(&self, trees: &[DepTree], classifier: &C, labeler: &L) -> Vec<SemanticParse>
    where
        C: SenseClassifier + ?Sized,
        L: RoleLabeler + ?Sized,
    {
        trees
            .iter()
            .enumerate()
            .map(|(i, tree)| self.parse_sentence(SentenceId(i as u32), tree, classifier, labeler))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, arg};
    use crate::index::ClassIndex;
    use crate::lightverb::LightVerbMapper;
    use vnsem_protocol::{ArgLabel, BoundValue, FrameIndex, PredicateType, ThematicRole};

    /// Fixed predictions keyed by sentence length.
    struct FixedClassifier(Vec<(usize, SensePrediction)>);

    impl SenseClassifier for FixedClassifier {
        fn predict(&self, tree: &DepTree) -> Vec<SensePrediction> {
            self.0
                .iter()
                .filter(|(len, _)| *len == tree.len())
                .map(|(_, prediction)| prediction.clone())
                .collect()
        }
    }

    /// Returns stored propositions, filling in the resolved senses.
    struct FixedLabeler(Vec<(usize, Proposition)>);

    impl RoleLabeler for FixedLabeler {
        fn parse(&self, tree: &DepTree, senses: &[Span<ClassId>]) -> Vec<Proposition> {
            self.0
                .iter()
                .filter(|(len, _)| *len == tree.len())
                .map(|(_, proposition)| {
                    let mut proposition = proposition.clone();
                    proposition.sense = senses
                        .iter()
                        .find(|span| span.start == proposition.predicate)
                        .map(|span| span.label.clone());
                    proposition
                })
                .collect()
        }
    }

    fn parser() -> SemanticParser<ClassIndex> {
        let detector = PredicateDetector::new(vec![LightVerbMapper::new(fixtures::light_verbs())]);
        SemanticParser::new(fixtures::index(), detector, Aligner::new(fixtures::role_mappings()))
    }

    fn prediction(index: usize, senses: &[(&str, f32)]) -> SensePrediction {
        SensePrediction {
            index,
            senses: senses.iter().map(|(id, score)| (ClassId::new(*id), *score)).collect(),
        }
    }

    #[test]
    fn test_parse_sentence_gave() {
        let tree = fixtures::give_tree();
        let classifier = FixedClassifier(vec![(6, prediction(1, &[("look-30.3", 0.2), ("give-13.1", 0.7)]))]);
        let mut unlabeled = fixtures::give_prop();
        unlabeled.sense = None;
        let labeler = FixedLabeler(vec![(6, unlabeled)]);

        let parse = parser().parse_sentence(SentenceId(3), &tree, &classifier, &labeler);
        assert_eq!(parse.sentence, SentenceId(3));
        assert_eq!(parse.propositions.len(), 1);

        let result = &parse.propositions[0];
        assert_eq!(result.proposition.sense, Some(ClassId::new("give-13.1")));
        assert_eq!(result.retargeted, None);
        assert_eq!(result.frame, Some(FrameIndex(1)));

        let cause = result
            .predicates
            .iter()
            .find(|predicate| predicate.kind == PredicateType::Cause)
            .unwrap();
        assert_eq!(cause.args[0].value, Some(BoundValue::Sense(ClassId::new("give-13.1"))));
        assert_eq!(
            cause.role_value(ThematicRole::Recipient),
            Some(&BoundValue::Span(arg(ArgLabel::numbered(2), 4, 5)))
        );

        let text = parse.render();
        assert!(text.starts_with("#3 John gave a book to Mary\n"));
        assert!(text.contains("gave [give-13.1] frame 1"));
        assert!(text.contains("Recipient=to Mary"));
    }

    #[test]
    fn test_light_verb_retargets() {
        let tree = fixtures::look_tree();
        let result = parser().parse_proposition(&tree, fixtures::took_prop());

        let retargeted = result.retargeted.as_ref().unwrap();
        assert_eq!(retargeted.predicate, 3);
        assert_eq!(result.proposition, fixtures::took_prop());
        assert_eq!(
            result.roles.as_deref(),
            Some(
                &[
                    Span::new(ThematicRole::Experiencer, 0, 0),
                    Span::new(ThematicRole::Verb, 3, 3),
                    Span::new(ThematicRole::Stimulus, 4, 6),
                ][..]
            )
        );

        let perceive = &result.predicates[0];
        assert_eq!(perceive.kind, PredicateType::Perceive);
        assert_eq!(
            perceive.role_value(ThematicRole::Stimulus),
            Some(&BoundValue::Span(arg(ArgLabel::numbered(1), 4, 6)))
        );
    }

    #[test]
    fn test_missing_sense_is_retained() {
        let tree = fixtures::give_tree();
        let mut prop = fixtures::give_prop();
        prop.sense = None;

        let result = parser().parse_proposition(&tree, prop.clone());
        assert_eq!(result, PropositionParse::unaligned(prop, None));
        assert!(!result.is_aligned());
    }

    #[test]
    fn test_parse_document_keeps_order() {
        let trees = vec![fixtures::look_tree(), fixtures::give_tree(), fixtures::slash_tree()];
        let classifier = FixedClassifier(vec![
            (6, prediction(1, &[("give-13.1", 0.9)])),
            (4, prediction(1, &[("cut-21.1", 0.5)])),
        ]);
        let labeler = FixedLabeler(vec![
            (7, fixtures::took_prop()),
            (6, fixtures::give_prop()),
            (4, fixtures::slash_prop()),
        ]);

        let document = parser().parse_document(&trees, &classifier, &labeler);
        let ids: Vec<u32> = document.iter().map(|parse| parse.sentence.0).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(document[0].tokens[1], "took");
        assert!(document.iter().all(|parse| parse.propositions[0].is_aligned()));
        assert_eq!(document[2].propositions[0].predicates[0].kind, PredicateType::Manner);
    }

    #[test]
    fn test_resolve_senses_ties_keep_order() {
        let senses = resolve_senses(&[
            prediction(1, &[("a-1", 0.4), ("b-2", 0.4), ("c-3", 0.1)]),
            prediction(2, &[]),
            prediction(4, &[("d-4", 0.1), ("e-5", 0.3)]),
        ]);
        assert_eq!(
            senses,
            vec![Span::single(ClassId::new("a-1"), 1), Span::single(ClassId::new("e-5"), 4)]
        );
    }

    #[test]
    fn test_parser_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SemanticParser<ClassIndex>>();
        assert_send_sync::<SemanticParser<&ClassIndex>>();
    }
}
