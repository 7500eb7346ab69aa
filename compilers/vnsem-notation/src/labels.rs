use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::satisfy,
    combinator::{all_consuming, map, success, value},
    sequence::{pair, preceded},
    IResult,
};
use vnsem_protocol::{ArgKind, ArgLabel, ArgPrefix};

use crate::NotationError;

fn prefix(input: &str) -> IResult<&str, ArgPrefix> {
    alt((
        value(ArgPrefix::Continuation, tag("C-")),
        value(ArgPrefix::Reference, tag("R-")),
        success(ArgPrefix::Plain),
    ))(input)
}

fn kind(input: &str) -> IResult<&str, ArgKind> {
    alt((
        // Modifiers first: `ARGM-` would otherwise be read as `ARG` + garbage
        map(
            preceded(
                alt((tag("ARGM-"), tag("AM-"))),
                take_while1(|c: char| c.is_ascii_alphanumeric() || c == '-'),
            ),
            |function: &str| ArgKind::Modifier(function.to_string()),
        ),
        map(
            preceded(alt((tag("ARG"), tag("A"))), satisfy(|c| c.is_ascii_digit())),
            |digit| ArgKind::Numbered(digit as u8 - b'0'),
        ),
        value(ArgKind::Verb, alt((tag("REL"), tag("V")))),
    ))(input)
}

/// Parse a role-labeler argument label (`A0`, `ARG1`, `ARGM-LOC`, `AM-TMP`,
/// `C-A1`, `R-A0`, `V`). Case-insensitive.
pub fn parse_arg_label(input: &str) -> Result<ArgLabel, NotationError> {
    let upper = input.trim().to_ascii_uppercase();
    let result = all_consuming(pair(prefix, kind))(upper.as_str());
    match result {
        Ok((_, (prefix, kind))) => Ok(ArgLabel::new(kind, prefix)),
        Err(_) => Err(NotationError::Label(input.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_labels() {
        assert_eq!(parse_arg_label("A0").unwrap(), ArgLabel::numbered(0));
        assert_eq!(parse_arg_label("ARG2").unwrap(), ArgLabel::numbered(2));
        assert_eq!(parse_arg_label("arg1").unwrap(), ArgLabel::numbered(1));
    }

    #[test]
    fn test_modifier_and_prefix_labels() {
        assert_eq!(parse_arg_label("ARGM-LOC").unwrap(), ArgLabel::modifier("LOC"));
        assert_eq!(parse_arg_label("AM-TMP").unwrap(), ArgLabel::modifier("TMP"));
        assert_eq!(
            parse_arg_label("R-A0").unwrap(),
            ArgLabel::new(ArgKind::Numbered(0), ArgPrefix::Reference)
        );
        assert_eq!(
            parse_arg_label("C-ARG1").unwrap(),
            ArgLabel::new(ArgKind::Numbered(1), ArgPrefix::Continuation)
        );
        assert_eq!(parse_arg_label("V").unwrap(), ArgLabel::verb());
        assert_eq!(parse_arg_label("rel").unwrap(), ArgLabel::verb());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_arg_label("ARGX").is_err());
        assert!(parse_arg_label("A12").is_err());
        assert!(parse_arg_label("VB").is_err());
        assert!(parse_arg_label("").is_err());
    }
}
