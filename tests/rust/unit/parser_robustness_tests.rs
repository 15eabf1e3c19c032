//! Unit tests for statement parsing edge cases and error handling

#[cfg(test)]
mod parser_robustness_tests {
    use schemaql::sql_parser::{
        ast::{Expression, Operator},
        parse_query,
    };
    use test_case::test_case;

    /// Malformed input must come back as an error, never a panic
    #[test]
    fn test_malformed_queries_no_panic() {
        let malformed_queries = vec![
            "",
            "SELECT",
            "SELECT id FROM",
            "SELECT id FROM users WHERE",
            "SELECT id FROM users WHERE (id = 1",
            "SELECT id FROM users WHERE id = ",
            "SELECT id, FROM users",
            "FROM users SELECT id",
            "SELECT id FROM users; SELECT id FROM users",
            "SELECT 'unterminated FROM users",
            "SELECT id FROM users WHERE name = 'o''",
            "SELECT id FROM users ORDER BY id",
            "SELECT id FROM users u JOIN orders o ON u.id = o.user_id",
        ];

        for query in malformed_queries {
            assert!(parse_query(query).is_err(), "Expected error for: {:?}", query);
        }
    }

    #[test_case("SELECT id FROM users" ; "minimal")]
    #[test_case("select id from users where id > 1" ; "lowercase keywords")]
    #[test_case("  SELECT id FROM users ;  " ; "surrounding whitespace and semicolon")]
    #[test_case("SELECT users.id, users.name FROM users" ; "qualified select list")]
    #[test_case("SELECT id FROM users WHERE status = 'a AND b'" ; "keyword inside literal")]
    #[test_case("SELECT id FROM users WHERE ((id = 1))" ; "nested parentheses")]
    #[test_case("SELECT id FROM users WHERE name = 'o''brien'" ; "escaped single quote")]
    #[test_case("SELECT id FROM users WHERE name = ''''" ; "string of one quote")]
    #[test_case("SELECT id FROM users WHERE name = \"say \"\"hi\"\"\"" ; "escaped double quote")]
    #[test_case("SELECT id\nFROM users\nWHERE id >= -3.5" ; "multiline with negative decimal")]
    fn test_accepted_statements(query: &str) {
        assert!(parse_query(query).is_ok(), "Expected success for: {:?}", query);
    }

    #[test]
    fn test_keyword_inside_literal_is_not_split() {
        let stmt = parse_query("SELECT id FROM users WHERE status = 'x OR y'").unwrap();
        let conditions = stmt.where_clause.unwrap().conditions;
        match conditions {
            Expression::OperatorApplication(app) => assert_eq!(app.operator, Operator::Equal),
            other => panic!("Expected a single comparison, got {:?}", other),
        }
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let stmt = parse_query("SELECT id FROM users WHERE a = 1 AND b = 2 OR c = 3").unwrap();
        match stmt.where_clause.unwrap().conditions {
            Expression::OperatorApplication(app) => {
                assert_eq!(app.operator, Operator::Or);
                assert!(matches!(
                    &app.operands[0],
                    Expression::OperatorApplication(inner) if inner.operator == Operator::And
                ));
            }
            other => panic!("Expected OR at the root, got {:?}", other),
        }
    }

    #[test]
    fn test_error_message_names_clause() {
        let err = parse_query("SELECT id FROM users WHERE").unwrap_err();
        assert!(err.to_string().contains("Error in where clause"));
    }

    #[test]
    fn test_trailing_input_reported() {
        let err = parse_query("SELECT id FROM users LIMIT 5").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Unsupported or unexpected input"));
        assert!(message.contains("LIMIT 5"));
    }
}
