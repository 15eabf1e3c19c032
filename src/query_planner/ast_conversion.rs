//! Parser AST to predicate tree conversion.
//!
//! The parser accepts a superset of what the translator can render. These
//! `TryFrom` impls are where everything outside comparisons, AND and OR gets
//! rejected with [`TranslationError::MalformedExpression`].

use crate::sql_parser::ast;

use super::{
    errors::TranslationError,
    logical_expr::{ColumnRef, ComparisonOperator, Expr, Operand},
};

impl TryFrom<ast::Operator> for ComparisonOperator {
    type Error = TranslationError;

    fn try_from(value: ast::Operator) -> Result<Self, Self::Error> {
        match value {
            ast::Operator::Equal => Ok(ComparisonOperator::Equal),
            ast::Operator::NotEqual => Ok(ComparisonOperator::NotEqual),
            ast::Operator::LessThan => Ok(ComparisonOperator::LessThan),
            ast::Operator::GreaterThan => Ok(ComparisonOperator::GreaterThan),
            ast::Operator::LessThanEqual => Ok(ComparisonOperator::LessThanEqual),
            ast::Operator::GreaterThanEqual => Ok(ComparisonOperator::GreaterThanEqual),
            other => Err(TranslationError::malformed(format!(
                "operator `{}` is not a comparison",
                other
            ))),
        }
    }
}

impl<'a> From<&ast::ColumnReference<'a>> for ColumnRef {
    fn from(value: &ast::ColumnReference<'a>) -> Self {
        ColumnRef::new(value.table, value.column)
    }
}

impl<'a> TryFrom<&ast::Expression<'a>> for Operand {
    type Error = TranslationError;

    fn try_from(value: &ast::Expression<'a>) -> Result<Self, Self::Error> {
        match value {
            ast::Expression::Column(col) => Ok(Operand::Column(col.into())),
            ast::Expression::Literal(ast::Literal::Number(text))
            | ast::Expression::Literal(ast::Literal::String(text)) => {
                Ok(Operand::Literal(text.to_string()))
            }
            ast::Expression::Literal(lit) => Err(TranslationError::malformed(format!(
                "literal `{}` cannot be compared",
                lit
            ))),
            other => Err(TranslationError::malformed(format!(
                "operand `{}` must be a column or a literal",
                other
            ))),
        }
    }
}

impl<'a> TryFrom<&ast::Expression<'a>> for Expr {
    type Error = TranslationError;

    fn try_from(value: &ast::Expression<'a>) -> Result<Self, Self::Error> {
        let ast::Expression::OperatorApplication(app) = value else {
            return Err(TranslationError::malformed(format!(
                "`{}` is not a boolean condition",
                value
            )));
        };

        let [left, right] = app.operands.as_slice() else {
            return Err(TranslationError::malformed(format!(
                "`{}` is not a boolean condition",
                value
            )));
        };

        match app.operator {
            ast::Operator::And => Ok(Expr::and(left.try_into()?, right.try_into()?)),
            ast::Operator::Or => Ok(Expr::or(left.try_into()?, right.try_into()?)),
            operator => {
                let operator = ComparisonOperator::try_from(operator)?;
                Ok(Expr::comparison(
                    left.try_into()?,
                    operator,
                    right.try_into()?,
                ))
            }
        }
    }
}
