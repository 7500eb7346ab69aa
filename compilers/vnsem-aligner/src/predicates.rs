//! Instantiation of a frame's semantic-predicate templates against an
//! alignment.

use std::collections::HashMap;

use vnsem_protocol::{
    BoundArgument, BoundPredicate, BoundValue, PredicateTemplate, PredicateType, Proposition, TemplateArg,
    ThematicRole,
};

use crate::align::Alignment;
use crate::index::FrameResource;

/// Bind the selected frame's templates, in declaration order. `lemma` is the
/// predicate's lemma, used for verb-specific features. Resource templates
/// are cloned, never modified.
pub fn build_predicates<R: FrameResource + ?Sized>(
    resource: &R,
    alignment: &Alignment<'_>,
    proposition: &Proposition,
    lemma: &str,
) -> Vec<BoundPredicate> {
    let templates = &alignment.frame.semantics;
    let equivalences = role_equivalences(templates);

    let features = proposition
        .sense
        .as_ref()
        .and_then(|sense| resource.lexical_entry(sense, lemma))
        .filter(|features| !features.is_empty())
        .map(|features| features.join(", "));

    templates
        .iter()
        .filter(|template| template.kind != PredicateType::Equals)
        .map(|template| {
            let mut template = template.clone();
            refine_path_relation(&mut template);

            let args = template
                .args
                .into_iter()
                .map(|slot| {
                    let value = match &slot {
                        TemplateArg::Event(_) => proposition.sense.clone().map(BoundValue::Sense),
                        TemplateArg::ThematicRole { role, .. } => alignment
                            .by_role(*role)
                            .or_else(|| equivalences.get(role).and_then(|other| alignment.by_role(*other)))
                            .cloned()
                            .map(BoundValue::Span),
                        TemplateArg::VerbSpecific(_) => features.clone().map(BoundValue::Feature),
                        TemplateArg::Constant(_) => None,
                    };
                    BoundArgument { slot, value }
                })
                .collect();

            BoundPredicate { kind: template.kind, negated: template.negated, args }
        })
        .collect()
}

/// Symmetric role pairs declared by `equals` templates with exactly two role
/// arguments.
pub fn role_equivalences(templates: &[PredicateTemplate]) -> HashMap<ThematicRole, ThematicRole> {
    let mut equivalences = HashMap::new();
    for template in templates.iter().filter(|template| template.kind == PredicateType::Equals) {
        let roles: Vec<ThematicRole> = template.roles().collect();
        if let [left, right] = roles[..] {
            equivalences.insert(left, right);
            equivalences.insert(right, left);
        }
    }
    equivalences
}

/// Refined type for a path-relation constant. Accepts the short resource
/// tags (`ch_of_state`) and the long spelling (`change-of-state`).
pub fn path_refinement(constant: &str) -> Option<PredicateType> {
    let tag = constant.trim().to_ascii_lowercase().replace('-', "_");
    match tag.as_str() {
        "ch_on_scale" | "change_on_scale" => Some(PredicateType::ChangeOnScale),
        "ch_of_state" | "change_of_state" => Some(PredicateType::ChangeOfState),
        "ch_of_poss" | "change_of_possession" => Some(PredicateType::ChangeOfPossession),
        "ch_of_loc" | "change_of_location" => Some(PredicateType::ChangeOfLocation),
        "tr_of_info" | "transfer_of_information" => Some(PredicateType::TransferOfInformation),
        _ => None,
    }
}

/// Rewrite a `path_rel` template into its refined type and strip its
/// constants. The first constant decides; if it is not a path tag the
/// template is left untouched.
pub fn refine_path_relation(template: &mut PredicateTemplate) -> bool {
    if template.kind != PredicateType::PathRel {
        return false;
    }
    let refined = template
        .args
        .iter()
        .find_map(|arg| match arg {
            TemplateArg::Constant(value) => Some(value),
            _ => None,
        })
        .and_then(|value| path_refinement(value));
    match refined {
        Some(kind) => {
            template.kind = kind;
            template.args.retain(|arg| !arg.is_constant());
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::Aligner;
    use crate::fixtures::{self, arg};
    use proptest::prelude::*;
    use vnsem_protocol::{ArgLabel, ClassId};

    fn bind(prop: &Proposition, tree: &vnsem_tree::DepTree) -> Vec<BoundPredicate> {
        let index = fixtures::index();
        let aligner = Aligner::new(fixtures::role_mappings());
        let alignment = aligner.align(&index, prop, tree).unwrap();
        let lemma = tree.lemma(prop.predicate).unwrap();
        build_predicates(&index, &alignment, prop, &lemma)
    }

    #[test]
    fn test_give_binds_cause() {
        let predicates = bind(&fixtures::give_prop(), &fixtures::give_tree());
        let give = ClassId::new("give-13.1");

        let causes: Vec<&BoundPredicate> =
            predicates.iter().filter(|predicate| predicate.kind == PredicateType::Cause).collect();
        assert_eq!(causes.len(), 1);
        let cause = causes[0];
        assert_eq!(cause.args[0].value, Some(BoundValue::Sense(give)));
        assert_eq!(cause.role_value(ThematicRole::Agent), Some(&BoundValue::Span(arg(ArgLabel::numbered(0), 0, 0))));
        assert_eq!(cause.role_value(ThematicRole::Theme), Some(&BoundValue::Span(arg(ArgLabel::numbered(1), 2, 3))));
        assert_eq!(
            cause.role_value(ThematicRole::Recipient),
            Some(&BoundValue::Span(arg(ArgLabel::numbered(2), 4, 5)))
        );
        assert_eq!(
            cause.to_string(),
            "cause(Event(E = give-13.1), ThemRole(Agent = A0[0]), ThemRole(Theme = A1[2..3]), ThemRole(Recipient = A2[4..5]))"
        );
    }

    #[test]
    fn test_path_relation_refined_and_stripped() {
        let predicates = bind(&fixtures::give_prop(), &fixtures::give_tree());
        assert_eq!(predicates[0].kind, PredicateType::ChangeOfPossession);
        assert_eq!(predicates[0].args.len(), 3);
        assert!(predicates[0].args.iter().all(|arg| !arg.slot.is_constant()));
    }

    #[test]
    fn test_unknown_path_constant_kept() {
        let mut template = vnsem_notation::parse_template("path_rel(start(E), Theme, ?Source, prep)").unwrap();
        let before = template.clone();
        assert!(!refine_path_relation(&mut template));
        assert_eq!(template, before);
        assert_eq!(template.kind, PredicateType::PathRel);
    }

    #[test]
    fn test_leading_unknown_constant_decides() {
        let mut template = vnsem_notation::parse_template("path_rel(start(E), Theme, prep, ch_of_state)").unwrap();
        let before = template.clone();
        assert!(!refine_path_relation(&mut template));
        assert_eq!(template, before);
        assert_eq!(template.args.len(), 4);
    }

    #[test]
    fn test_long_constant_spelling() {
        let mut template = vnsem_notation::parse_template("path_rel(start(E), Theme, change-of-state, Result)").unwrap();
        assert!(refine_path_relation(&mut template));
        assert_eq!(template.kind, PredicateType::ChangeOfState);
        assert_eq!(template.args.len(), 3);
    }

    #[test]
    fn test_equals_resolves_and_is_dropped() {
        let predicates = bind(&fixtures::become_prop(), &fixtures::become_tree());
        let water = BoundValue::Span(arg(ArgLabel::numbered(1), 0, 1));
        let ice = BoundValue::Span(arg(ArgLabel::numbered(2), 3, 3));

        assert!(predicates.iter().all(|predicate| predicate.kind != PredicateType::Equals));
        assert_eq!(predicates.len(), 2);

        let change = &predicates[0];
        assert_eq!(change.kind, PredicateType::ChangeOfState);
        assert_eq!(change.role_value(ThematicRole::Theme), Some(&water));
        assert_eq!(change.role_value(ThematicRole::InitialState), None);
        assert_eq!(change.role_value(ThematicRole::Result), Some(&ice));

        let state = &predicates[1];
        assert_eq!(state.kind, PredicateType::HasState);
        assert_eq!(state.role_value(ThematicRole::Theme), Some(&water));
    }

    #[test]
    fn test_equivalences_are_symmetric() {
        let templates = vec![vnsem_notation::parse_template("equals(Patient, Theme)").unwrap()];
        let equivalences = role_equivalences(&templates);
        assert_eq!(equivalences.get(&ThematicRole::Patient), Some(&ThematicRole::Theme));
        assert_eq!(equivalences.get(&ThematicRole::Theme), Some(&ThematicRole::Patient));

        let three = vec![vnsem_notation::parse_template("equals(Patient, Theme, Agent)").unwrap()];
        assert!(role_equivalences(&three).is_empty());
    }

    #[test]
    fn test_verb_specific_features() {
        let predicates = bind(&fixtures::slash_prop(), &fixtures::slash_tree());
        let manner = &predicates[0];
        assert_eq!(manner.kind, PredicateType::Manner);
        assert_eq!(manner.args[1].value, Some(BoundValue::Feature("forceful, swift".to_string())));

        // "cut" is listed without features, "hack" not at all
        let index = fixtures::index();
        let prop = fixtures::slash_prop();
        let aligner = Aligner::new(fixtures::role_mappings());
        let alignment = aligner.align(&index, &prop, &fixtures::slash_tree()).unwrap();
        assert_eq!(build_predicates(&index, &alignment, &prop, "cut")[0].args[1].value, None);
        assert_eq!(build_predicates(&index, &alignment, &prop, "hack")[0].args[1].value, None);
    }

    #[test]
    fn test_resource_templates_untouched() {
        let index = fixtures::index();
        let prop = fixtures::become_prop();
        let tree = fixtures::become_tree();
        let aligner = Aligner::new(fixtures::role_mappings());
        let alignment = aligner.align(&index, &prop, &tree).unwrap();
        let before = alignment.frame.semantics.clone();

        let predicates = build_predicates(&index, &alignment, &prop, "become");
        assert_eq!(predicates.len(), 2);
        assert_eq!(alignment.frame.semantics, before);
        assert_eq!(before[0].kind, PredicateType::Equals);
        assert_eq!(before[1].kind, PredicateType::PathRel);
    }

    proptest! {
        #[test]
        fn test_build_is_idempotent(case in 0usize..3, drop in 0usize..4) {
            let (mut prop, tree) = match case {
                0 => (fixtures::give_prop(), fixtures::give_tree()),
                1 => (fixtures::become_prop(), fixtures::become_tree()),
                _ => (fixtures::slash_prop(), fixtures::slash_tree()),
            };
            if drop < prop.arguments.len() && !prop.arguments[drop].label.is_verb() {
                prop.arguments.remove(drop);
            }

            let index = fixtures::index();
            let aligner = Aligner::new(fixtures::role_mappings());
            let alignment = aligner.align(&index, &prop, &tree).unwrap();
            let lemma = tree.lemma(prop.predicate).unwrap();

            let first = build_predicates(&index, &alignment, &prop, &lemma);
            let second = build_predicates(&index, &alignment, &prop, &lemma);
            prop_assert_eq!(first, second);
        }
    }
}
