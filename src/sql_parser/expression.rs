use nom::{
    branch::alt,
    bytes::complete::{is_not, tag},
    character::complete::{char, digit1},
    combinator::{map, opt, recognize, value},
    multi::{many0, separated_list0},
    sequence::{delimited, pair, preceded},
    Parser,
};

use super::{
    ast::{ColumnReference, Expression, FunctionCall, Literal, Operator},
    common::{keyword, parse_identifier, ws, PResult},
};

pub fn parse_expression(input: &'_ str) -> PResult<'_, Expression<'_>> {
    parse_logical_or(input)
}

// OR binds loosest. Operands fold to the left: a OR b OR c => (a OR b) OR c
fn parse_logical_or(input: &'_ str) -> PResult<'_, Expression<'_>> {
    let (input, lhs) = parse_logical_and(input)?;

    let mut remaining_input = input;
    let mut final_expression = lhs;

    loop {
        let res = preceded(ws(keyword("OR")), parse_logical_and).parse(remaining_input);
        match res {
            Ok((new_input, rhs)) => {
                final_expression = Expression::binary(Operator::Or, final_expression, rhs);
                remaining_input = new_input;
            }
            Err(nom::Err::Error(_)) => break,
            Err(e) => return Err(e),
        }
    }

    Ok((remaining_input, final_expression))
}

fn parse_logical_and(input: &'_ str) -> PResult<'_, Expression<'_>> {
    let (input, lhs) = parse_not_expression(input)?;

    let mut remaining_input = input;
    let mut final_expression = lhs;

    loop {
        let res = preceded(ws(keyword("AND")), parse_not_expression).parse(remaining_input);
        match res {
            Ok((new_input, rhs)) => {
                final_expression = Expression::binary(Operator::And, final_expression, rhs);
                remaining_input = new_input;
            }
            Err(nom::Err::Error(_)) => break,
            Err(e) => return Err(e),
        }
    }

    Ok((remaining_input, final_expression))
}

// NOT sits below comparison so "NOT a = b" parses as NOT (a = b)
fn parse_not_expression(input: &'_ str) -> PResult<'_, Expression<'_>> {
    alt((
        map(preceded(ws(keyword("NOT")), parse_not_expression), |expr| {
            Expression::unary(Operator::Not, expr)
        }),
        parse_comparison_expression,
    ))
    .parse(input)
}

fn parse_comparison_operator(input: &str) -> PResult<'_, Operator> {
    alt((
        value(Operator::GreaterThanEqual, tag(">=")),
        value(Operator::LessThanEqual, tag("<=")),
        value(Operator::NotEqual, tag("<>")),
        value(Operator::NotEqual, tag("!=")),
        value(Operator::GreaterThan, tag(">")),
        value(Operator::LessThan, tag("<")),
        value(Operator::Equal, tag("=")),
    ))
    .parse(input)
}

// Chained comparisons (a = 1 = b) fold left; the analyzer rejects them.
fn parse_comparison_expression(input: &'_ str) -> PResult<'_, Expression<'_>> {
    let (input, lhs) = parse_additive_expression(input)?;

    let mut remaining_input = input;
    let mut final_expression = lhs;

    loop {
        let op_result = ws(parse_comparison_operator).parse(remaining_input);
        match op_result {
            Ok((new_input, op)) => {
                let (new_input, rhs) = parse_additive_expression(new_input)?;
                final_expression = Expression::binary(op, final_expression, rhs);
                remaining_input = new_input;
            }
            Err(nom::Err::Error(_)) => break,
            Err(e) => return Err(e),
        }
    }
    Ok((remaining_input, final_expression))
}

fn parse_additive_expression(input: &'_ str) -> PResult<'_, Expression<'_>> {
    let (input, lhs) = parse_multiplicative_expression(input)?;

    let mut remaining_input = input;
    let mut final_expression = lhs;

    loop {
        let op_result = ws(alt((
            value(Operator::Addition, char('+')),
            value(Operator::Subtraction, char('-')),
        )))
        .parse(remaining_input);

        match op_result {
            Ok((new_input, op)) => {
                let (new_input, rhs) = parse_multiplicative_expression(new_input)?;
                final_expression = Expression::binary(op, final_expression, rhs);
                remaining_input = new_input;
            }
            Err(nom::Err::Error(_)) => break,
            Err(e) => return Err(e),
        }
    }
    Ok((remaining_input, final_expression))
}

fn parse_multiplicative_expression(input: &'_ str) -> PResult<'_, Expression<'_>> {
    let (input, lhs) = parse_primary(input)?;

    let mut remaining_input = input;
    let mut final_expression = lhs;

    loop {
        let op_result = ws(alt((
            value(Operator::Multiplication, char('*')),
            value(Operator::Division, char('/')),
        )))
        .parse(remaining_input);

        match op_result {
            Ok((new_input, op)) => {
                let (new_input, rhs) = parse_primary(new_input)?;
                final_expression = Expression::binary(op, final_expression, rhs);
                remaining_input = new_input;
            }
            Err(nom::Err::Error(_)) => break,
            Err(e) => return Err(e),
        }
    }
    Ok((remaining_input, final_expression))
}

fn parse_primary(input: &'_ str) -> PResult<'_, Expression<'_>> {
    ws(alt((
        // Parentheses only shape the tree; no node is kept for them.
        delimited(ws(char('(')), parse_expression, ws(char(')'))),
        map(parse_literal, Expression::Literal),
        parse_function_call,
        map(parse_column_reference, Expression::Column),
    )))
    .parse(input)
}

/// Matches: 123, -123, 3.14, -3.14, .5
fn parse_numeric_literal(input: &str) -> PResult<'_, &str> {
    recognize(pair(
        opt(char('-')),
        alt((
            recognize((digit1, char('.'), digit1)),
            recognize(pair(char('.'), digit1)),
            digit1,
        )),
    ))
    .parse(input)
}

/// Matches 'o''brien': a doubled quote stands for one literal quote
fn parse_single_quoted(input: &str) -> PResult<'_, &str> {
    recognize((
        char('\''),
        many0(alt((is_not("'"), tag("''")))),
        char('\''),
    ))
    .parse(input)
}

fn parse_double_quoted(input: &str) -> PResult<'_, &str> {
    recognize((
        char('"'),
        many0(alt((is_not("\""), tag("\"\"")))),
        char('"'),
    ))
    .parse(input)
}

fn parse_literal(input: &'_ str) -> PResult<'_, Literal<'_>> {
    alt((
        // Quoted strings keep their quotes; the rewriter normalizes them.
        map(parse_single_quoted, Literal::String),
        map(parse_double_quoted, Literal::String),
        map(parse_numeric_literal, Literal::Number),
        value(Literal::Boolean(true), keyword("TRUE")),
        value(Literal::Boolean(false), keyword("FALSE")),
        value(Literal::Null, keyword("NULL")),
    ))
    .parse(input)
}

fn parse_function_argument(input: &'_ str) -> PResult<'_, Expression<'_>> {
    alt((value(Expression::Star, ws(char('*'))), parse_expression)).parse(input)
}

fn parse_function_call(input: &'_ str) -> PResult<'_, Expression<'_>> {
    let (input, name) = parse_identifier(input)?;
    let (input, args) = delimited(
        ws(char('(')),
        separated_list0(ws(char(',')), parse_function_argument),
        ws(char(')')),
    )
    .parse(input)?;

    Ok((input, Expression::FunctionCall(FunctionCall { name, args })))
}

/// `column` or `table.column`
pub fn parse_column_reference(input: &'_ str) -> PResult<'_, ColumnReference<'_>> {
    let (input, first) = parse_identifier(input)?;
    let (input, second) = opt(preceded(char('.'), parse_identifier)).parse(input)?;

    let reference = match second {
        Some(column) => ColumnReference {
            table: Some(first),
            column,
        },
        None => ColumnReference {
            table: None,
            column: first,
        },
    };
    Ok((input, reference))
}
