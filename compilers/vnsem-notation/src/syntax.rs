use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{all_consuming, map, opt},
    multi::separated_list1,
    sequence::{delimited, pair, preceded, terminated},
    IResult,
};
use vnsem_protocol::{PhraseCategories, SyntaxSlot, ThematicRole};

use crate::NotationError;

#[derive(Debug, Clone)]
enum RawSlot<'a> {
    /// `{to}` or `{to|into}`
    Lexical(&'a str),
    /// `NP.Agent`, `V`, `PP.Destination[+dest_conf]`
    Phrase(&'a str, Option<&'a str>),
}

fn lexical(input: &str) -> IResult<&str, RawSlot> {
    map(
        delimited(char('{'), take_while1(|c: char| c != '}'), char('}')),
        RawSlot::Lexical,
    )(input)
}

fn phrase(input: &str) -> IResult<&str, RawSlot> {
    map(
        terminated(
            pair(
                take_while1(|c: char| c.is_ascii_alphabetic() || c == '_'),
                opt(preceded(
                    char('.'),
                    take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '-'),
                )),
            ),
            // Selectional restrictions are not used for alignment
            opt(delimited(char('['), take_while(|c: char| c != ']'), char(']'))),
        ),
        |(category, role)| RawSlot::Phrase(category, role),
    )(input)
}

fn pattern(input: &str) -> IResult<&str, Vec<RawSlot>> {
    delimited(
        multispace0,
        separated_list1(multispace1, alt((lexical, phrase))),
        multispace0,
    )(input)
}

/// Parse a frame's syntactic pattern, e.g. `NP.Agent V NP.Theme {to} NP.Recipient`.
pub fn parse_frame_syntax(input: &str) -> Result<Vec<SyntaxSlot>, NotationError> {
    let error = |reason: String| NotationError::Syntax { input: input.to_string(), reason };

    let (_, raw) = all_consuming(pattern)(input).map_err(|_| error("unparseable pattern".to_string()))?;

    let mut slots = Vec::with_capacity(raw.len());
    for slot in raw {
        match slot {
            RawSlot::Lexical(word) => slots.push(SyntaxSlot::lexical(word.trim())),
            RawSlot::Phrase(name, role) => {
                let category = PhraseCategories::parse_name(name)
                    .ok_or_else(|| error(format!("unknown category `{}`", name)))?;
                let role = match role {
                    Some(role) => Some(role.parse::<ThematicRole>().map_err(|e| error(e.to_string()))?),
                    None => None,
                };
                slots.push(SyntaxSlot { category, role, value: None });
            }
        }
    }

    if !slots.iter().any(SyntaxSlot::is_verb) {
        return Err(error("pattern has no verb slot".to_string()));
    }
    Ok(slots)
}
