use nom::{
    branch::alt,
    character::complete::char,
    combinator::{cut, opt, value},
    error::context,
    multi::separated_list1,
    sequence::preceded,
    Parser,
};

use super::{
    ast::{Expression, SelectItem, SelectStatement, WhereClause},
    common::{keyword, parse_identifier, ws, PResult},
    expression::parse_expression,
};

fn parse_select_item(input: &'_ str) -> PResult<'_, SelectItem<'_>> {
    let (input, expression) =
        alt((value(Expression::Star, ws(char('*'))), parse_expression)).parse(input)?;
    let (input, alias) = opt(preceded(ws(keyword("AS")), ws(parse_identifier))).parse(input)?;
    Ok((input, SelectItem { expression, alias }))
}

fn parse_select_clause(input: &'_ str) -> PResult<'_, Vec<SelectItem<'_>>> {
    let (input, _) = ws(keyword("SELECT")).parse(input)?;
    context(
        "Error in select clause",
        cut(separated_list1(ws(char(',')), parse_select_item)),
    )
    .parse(input)
}

fn parse_from_clause(input: &'_ str) -> PResult<'_, Vec<&'_ str>> {
    let (input, _) = ws(keyword("FROM")).parse(input)?;
    context(
        "Error in from clause",
        cut(separated_list1(ws(char(',')), ws(parse_identifier))),
    )
    .parse(input)
}

pub fn parse_where_clause(input: &'_ str) -> PResult<'_, WhereClause<'_>> {
    let (input, _) = ws(keyword("WHERE")).parse(input)?;
    let (input, conditions) =
        context("Error in where clause", cut(parse_expression)).parse(input)?;
    Ok((input, WhereClause { conditions }))
}

/// `SELECT items [FROM tables] [WHERE expression] [;]`
///
/// Whatever follows the statement is left unconsumed for the caller to
/// report; see [`super::parse_query`].
pub fn parse_select_statement(input: &'_ str) -> PResult<'_, SelectStatement<'_>> {
    let raw = input.trim();
    let (input, select_items) = parse_select_clause(input)?;
    let (input, from_tables) = opt(parse_from_clause).parse(input)?;
    let (input, where_clause) = opt(parse_where_clause).parse(input)?;
    let (input, _) = opt(ws(char(';'))).parse(input)?;

    Ok((
        input,
        SelectStatement {
            raw,
            select_items,
            from_tables: from_tables.unwrap_or_default(),
            where_clause,
        },
    ))
}
