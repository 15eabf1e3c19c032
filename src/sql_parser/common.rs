use std::collections::HashSet;

use lazy_static::lazy_static;
use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case},
    character::complete::{alpha1, alphanumeric1, multispace0, satisfy},
    combinator::{not, peek, recognize},
    error::{ErrorKind, ParseError},
    multi::many0,
    sequence::{delimited, pair, terminated},
    IResult, Parser,
};

use super::errors::SqlParsingError;

pub type PResult<'a, T> = IResult<&'a str, T, SqlParsingError<'a>>;

lazy_static! {
    static ref RESERVED_KEYWORDS: HashSet<&'static str> = [
        "SELECT", "FROM", "WHERE", "AND", "OR", "NOT", "AS", "GROUP", "ORDER", "BY", "HAVING",
        "LIMIT", "OFFSET", "JOIN", "INNER", "LEFT", "RIGHT", "FULL", "OUTER", "CROSS", "ON",
        "UNION", "DISTINCT", "IN", "IS", "LIKE", "BETWEEN", "EXISTS", "CASE", "WHEN", "THEN",
        "ELSE", "END", "TRUE", "FALSE", "NULL",
    ]
    .into_iter()
    .collect();
}

pub fn ws<'a, O, E: ParseError<&'a str>, F>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
{
    delimited(multispace0, inner, multispace0)
}

pub fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

pub fn is_reserved_keyword(word: &str) -> bool {
    RESERVED_KEYWORDS.contains(word.to_ascii_uppercase().as_str())
}

/// Case-insensitive keyword that is not the prefix of a longer word,
/// so `OR` never matches the start of `ORDER`.
pub fn keyword<'a>(
    kw: &'static str,
) -> impl Parser<&'a str, Output = &'a str, Error = SqlParsingError<'a>> {
    terminated(tag_no_case(kw), not(peek(satisfy(is_identifier_char))))
}

// A letter or underscore followed by letters, digits and underscores,
// e.g. "users", "user_id", "_tmp1".
fn identifier_core(input: &str) -> PResult<'_, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))
    .parse(input)
}

/// An identifier that is not a reserved keyword.
pub fn parse_identifier(input: &str) -> PResult<'_, &str> {
    let (remaining, ident) = identifier_core(input)?;

    if is_reserved_keyword(ident) {
        return Err(nom::Err::Error(SqlParsingError::from_error_kind(
            input,
            ErrorKind::Tag,
        )));
    }
    Ok((remaining, ident))
}
