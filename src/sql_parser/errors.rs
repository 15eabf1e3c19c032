use nom::error::{ContextError, ParseError};
use std::fmt;

#[derive(Debug, PartialEq, Clone)]
pub struct SqlParsingError<'a> {
    pub errors: Vec<(&'a str, &'static str)>,
}

impl<'a> SqlParsingError<'a> {
    pub fn new(input: &'a str, message: &'static str) -> Self {
        SqlParsingError {
            errors: vec![(input, message)],
        }
    }
}

impl<'a> ParseError<&'a str> for SqlParsingError<'a> {
    fn from_error_kind(input: &'a str, _kind: nom::error::ErrorKind) -> Self {
        SqlParsingError {
            errors: vec![(input, "Unable to parse")],
        }
    }

    fn append(input: &'a str, _kind: nom::error::ErrorKind, mut other: Self) -> Self {
        other.errors.push((input, "Unable to parse (appended)"));
        other
    }
}

impl<'a> ContextError<&'a str> for SqlParsingError<'a> {
    fn add_context(input: &'a str, ctx: &'static str, mut other: Self) -> Self {
        other.errors.push((input, ctx));
        other
    }
}

impl fmt::Display for SqlParsingError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Outermost context first; it names the clause that failed.
        for (input, ctx) in self.errors.iter().rev() {
            let snippet: String = input.trim().chars().take(40).collect();
            if snippet.is_empty() {
                writeln!(f, "{} at end of input", ctx)?;
            } else {
                writeln!(f, "{}: `{}`", ctx, snippet)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for SqlParsingError<'_> {}

impl<'a> From<nom::error::Error<&'a str>> for SqlParsingError<'a> {
    fn from(err: nom::error::Error<&'a str>) -> Self {
        SqlParsingError {
            errors: vec![(err.input, "Unable to parse")],
        }
    }
}
