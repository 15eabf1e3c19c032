use std::fmt;

/// A parsed `SELECT ... [FROM ...] [WHERE ...]` statement.
///
/// The parser accepts more than the translator supports (functions,
/// arithmetic, `NOT`, `*`, aliases); the analyzer decides what to reject.
#[derive(Debug, PartialEq, Clone)]
pub struct SelectStatement<'a> {
    /// The statement text as given, trimmed.
    pub raw: &'a str,
    pub select_items: Vec<SelectItem<'a>>,
    pub from_tables: Vec<&'a str>,
    pub where_clause: Option<WhereClause<'a>>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct SelectItem<'a> {
    pub expression: Expression<'a>,
    pub alias: Option<&'a str>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct WhereClause<'a> {
    pub conditions: Expression<'a>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression<'a> {
    Literal(Literal<'a>),
    Column(ColumnReference<'a>),
    /// `*`, as a select item or a function argument
    Star,
    FunctionCall(FunctionCall<'a>),
    OperatorApplication(OperatorApplication<'a>),
}

impl<'a> Expression<'a> {
    pub fn binary(operator: Operator, left: Expression<'a>, right: Expression<'a>) -> Self {
        Expression::OperatorApplication(OperatorApplication {
            operator,
            operands: vec![left, right],
        })
    }

    pub fn unary(operator: Operator, operand: Expression<'a>) -> Self {
        Expression::OperatorApplication(OperatorApplication {
            operator,
            operands: vec![operand],
        })
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct ColumnReference<'a> {
    pub table: Option<&'a str>,
    pub column: &'a str,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Literal<'a> {
    /// Numeric text as written, e.g. `42`, `-0.5`
    Number(&'a str),
    /// Quoted text including its quotes, e.g. `'active'` or `"active"`
    String(&'a str),
    Boolean(bool),
    Null,
}

#[derive(Debug, PartialEq, Clone)]
pub struct FunctionCall<'a> {
    pub name: &'a str,
    pub args: Vec<Expression<'a>>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct OperatorApplication<'a> {
    pub operator: Operator,
    pub operands: Vec<Expression<'a>>,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Operator {
    And,
    Or,
    Not,
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    LessThanEqual,
    GreaterThanEqual,
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Not => "NOT",
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
            Operator::LessThan => "<",
            Operator::GreaterThan => ">",
            Operator::LessThanEqual => "<=",
            Operator::GreaterThanEqual => ">=",
            Operator::Addition => "+",
            Operator::Subtraction => "-",
            Operator::Multiplication => "*",
            Operator::Division => "/",
        };
        f.write_str(symbol)
    }
}

impl fmt::Display for Literal<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(text) | Literal::String(text) => f.write_str(text),
            Literal::Boolean(true) => f.write_str("TRUE"),
            Literal::Boolean(false) => f.write_str("FALSE"),
            Literal::Null => f.write_str("NULL"),
        }
    }
}

impl fmt::Display for Expression<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(lit) => write!(f, "{}", lit),
            Expression::Column(col) => match col.table {
                Some(table) => write!(f, "{}.{}", table, col.column),
                None => f.write_str(col.column),
            },
            Expression::Star => f.write_str("*"),
            Expression::FunctionCall(call) => {
                write!(f, "{}(", call.name)?;
                for (i, arg) in call.args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
            Expression::OperatorApplication(op) => match op.operands.as_slice() {
                [operand] => write!(f, "{} {}", op.operator, operand),
                [left, right] => write!(f, "({} {} {})", left, op.operator, right),
                operands => {
                    write!(f, "{}(", op.operator)?;
                    for (i, operand) in operands.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{}", operand)?;
                    }
                    f.write_str(")")
                }
            },
        }
    }
}
