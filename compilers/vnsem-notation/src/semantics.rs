use nom::{
    bytes::complete::{take_while, take_while1},
    character::complete::{char, multispace0},
    combinator::{all_consuming, opt, recognize},
    multi::separated_list0,
    sequence::{delimited, pair, tuple},
    IResult,
};
use vnsem_protocol::{PredicateTemplate, PredicateType, TemplateArg, ThematicRole};

use crate::NotationError;

fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

fn is_arg_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '?' | '.' | '\'' | '+')
}

/// One argument: a bare word, or an event function like `during(E)`.
fn argument(input: &str) -> IResult<&str, &str> {
    ws(recognize(pair(
        take_while1(is_arg_char),
        opt(delimited(char('('), take_while(|c: char| c != ')'), char(')'))),
    )))(input)
}

fn template(input: &str) -> IResult<&str, (Option<char>, &str, Vec<&str>)> {
    tuple((
        ws(opt(char('!'))),
        take_while1(is_name_char),
        delimited(ws(char('(')), separated_list0(char(','), argument), ws(char(')'))),
    ))(input)
}

fn is_event(raw: &str) -> bool {
    if raw.contains('(') {
        return true;
    }
    let mut chars = raw.chars();
    match chars.next() {
        Some('e' | 'E' | 'ë') => chars.all(|c| c.is_ascii_digit()),
        _ => false,
    }
}

/// Decide an argument's kind from its spelling:
/// `V_*` is verb-specific, `E`/`e1`/`start(E)` are events, `?Role`/`Role`
/// are thematic roles, anything else is a constant.
pub fn classify_argument(raw: &str) -> TemplateArg {
    if raw.len() > 2 && (raw.starts_with("V_") || raw.starts_with("v_")) {
        return TemplateArg::VerbSpecific(raw.to_string());
    }
    if is_event(raw) {
        return TemplateArg::Event(raw.to_string());
    }
    let (implicit, name) = match raw.strip_prefix('?') {
        Some(name) => (true, name),
        None => (false, raw),
    };
    match name.parse::<ThematicRole>() {
        Ok(role) if role != ThematicRole::Verb => TemplateArg::ThematicRole { role, implicit },
        _ => TemplateArg::Constant(raw.to_string()),
    }
}

/// Parse a semantic-predicate template, e.g.
/// `path_rel(start(E), Agent, Theme, ch_of_poss, prep)` or `!cause(Agent, E)`.
pub fn parse_template(input: &str) -> Result<PredicateTemplate, NotationError> {
    let (_, (negation, name, raw_args)) =
        all_consuming(ws(template))(input).map_err(|_| NotationError::Template(input.to_string()))?;

    let kind = name
        .parse::<PredicateType>()
        .map_err(|_| NotationError::UnknownPredicate(name.to_string()))?;

    Ok(PredicateTemplate {
        kind,
        negated: negation.is_some(),
        args: raw_args.into_iter().map(classify_argument).collect(),
    })
}
