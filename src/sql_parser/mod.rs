//! SQL front-end.
//!
//! Parses the `SELECT` subset the translator works on into a typed tree.
//! Boolean structure comes from the grammar (OR below AND below NOT below
//! comparison), never from splitting text on keywords.

use ast::SelectStatement;
use errors::SqlParsingError;

pub mod ast;
mod common;
pub mod errors;
mod expression;
mod select_statement;

pub use select_statement::parse_select_statement;

/// Parse a complete statement. Input left over after the statement
/// (`GROUP BY`, `ORDER BY`, `JOIN`, a second statement, ...) is an error.
pub fn parse_query(input: &str) -> Result<SelectStatement<'_>, SqlParsingError<'_>> {
    match parse_select_statement(input) {
        Ok((remaining, statement)) => {
            if remaining.trim().is_empty() {
                Ok(statement)
            } else {
                Err(SqlParsingError::new(
                    remaining,
                    "Unsupported or unexpected input",
                ))
            }
        }
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(e),
        Err(nom::Err::Incomplete(_)) => Err(SqlParsingError::new(input, "Incomplete input")),
    }
}
