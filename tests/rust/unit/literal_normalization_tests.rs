//! Literal quoting as emitted in physical predicates

#[cfg(test)]
mod literal_normalization_tests {
    use schemaql::query_planner::expression_rewriter::normalize_literal;
    use test_case::test_case;

    #[test_case("7", "7" ; "integer")]
    #[test_case("-2.5", "-2.5" ; "negative decimal")]
    #[test_case("0.", "0." ; "trailing dot")]
    #[test_case("'x'", "'x'" ; "single quoted unchanged")]
    #[test_case("''", "''" ; "empty single quoted")]
    #[test_case("\"active\"", "'active'" ; "double quoted")]
    #[test_case("active", "'active'" ; "bare word")]
    #[test_case("\"it's\"", "'it''s'" ; "embedded quote doubled")]
    #[test_case("'o''brien'", "'o''brien'" ; "escaped single quote unchanged")]
    #[test_case("\"say \"\"hi\"\"\"", "'say \"hi\"'" ; "doubled double quote collapsed")]
    #[test_case("1e5", "'1e5'" ; "exponent is text")]
    #[test_case("--1", "'--1'" ; "double sign is text")]
    fn test_normalize_literal(input: &str, expected: &str) {
        assert_eq!(normalize_literal(input), expected);
    }
}
