//! End-to-end translation of logical SQL text against the demo catalog

#[cfg(test)]
mod translation_scenario_tests {
    use schemaql::query_planner::{QueryShape, TranslationError};
    use schemaql::schema_catalog::{HierarchyIndex, ResolveMode, SchemaCatalog, SchemaConfig};
    use schemaql::translator::{translate, TranslateError, Translation};

    fn demo() -> (SchemaCatalog, HierarchyIndex) {
        SchemaConfig::from_yaml_str(include_str!("../../../schemas/commerce.yaml"))
            .unwrap()
            .build()
            .unwrap()
    }

    fn run(query: &str) -> Result<Translation, TranslateError> {
        let (catalog, hierarchy) = demo();
        translate(query, &catalog, &hierarchy, ResolveMode::Strict)
    }

    fn translation_error(query: &str) -> TranslationError {
        match run(query) {
            Err(TranslateError::Translation(e)) => e,
            other => panic!("Expected translation error for {:?}, got {:?}", query, other),
        }
    }

    #[test]
    fn test_single_table_without_predicate() {
        let translation = run("SELECT id FROM users").unwrap();
        assert_eq!(translation.sql, "SELECT user_master.user_id FROM user_master");
        assert_eq!(
            translation.shape,
            QueryShape::SingleTable {
                table: "users".to_string()
            }
        );
    }

    #[test]
    fn test_single_table_with_predicate_uses_dedup_subquery() {
        let translation = run("SELECT id FROM users WHERE id > 5 AND status = 'active'").unwrap();
        assert_eq!(
            translation.sql,
            "SELECT user_master.user_id FROM user_master WHERE user_master.user_id IN \
             (SELECT DISTINCT user_master.user_id FROM user_master \
             WHERE user_master.user_id > 5 AND user_master.user_status = 'active')"
        );
    }

    #[test]
    fn test_adjacent_tables_join_inside_subquery() {
        let translation = run(
            "SELECT users.id FROM users WHERE users.status = 'active' AND orders.amount > 100",
        )
        .unwrap();
        assert!(translation
            .sql
            .contains("JOIN order_details ON order_details.user_id = user_master.user_id"));
        assert_eq!(
            translation.sql,
            "SELECT user_master.user_id FROM user_master WHERE user_master.user_id IN \
             (SELECT DISTINCT user_master.user_id FROM user_master \
             JOIN order_details ON order_details.user_id = user_master.user_id \
             WHERE user_master.user_status = 'active' AND order_details.order_amount > 100)"
        );
        assert_eq!(translation.tables, vec!["users", "orders"]);
    }

    #[test]
    fn test_child_named_first_still_roots_at_parent() {
        let translation = run("SELECT orders.id FROM items WHERE items.quantity > 2").unwrap();
        assert_eq!(
            translation.sql,
            "SELECT order_details.order_id FROM order_details WHERE order_details.order_id IN \
             (SELECT DISTINCT order_details.order_id FROM order_details \
             JOIN order_item_details ON order_item_details.order_id = order_details.order_id \
             WHERE order_item_details.item_quantity > 2)"
        );
    }

    #[test]
    fn test_non_adjacent_tables_rejected() {
        let err = translation_error("SELECT users.id FROM users WHERE categories.name = 'toys'");
        assert!(matches!(err, TranslationError::UnsupportedJoin { .. }));
    }

    #[test]
    fn test_unqualified_column_in_two_table_scope_is_ambiguous() {
        let err = translation_error(
            "SELECT users.id FROM users WHERE status = 'x' AND orders.amount > 1",
        );
        assert_eq!(
            err,
            TranslationError::AmbiguousColumn {
                column: "status".to_string(),
                candidates: vec!["users".to_string(), "orders".to_string()],
            }
        );
    }

    #[test]
    fn test_three_tables_rejected() {
        let err = translation_error(
            "SELECT users.id FROM users WHERE orders.id = 1 AND items.quantity = 2",
        );
        assert!(matches!(err, TranslationError::UnsupportedQueryShape { ref tables } if tables.len() == 3));
    }

    #[test]
    fn test_no_table_rejected() {
        let err = translation_error("SELECT id WHERE status = 'x'");
        assert_eq!(err, TranslationError::UnsupportedQueryShape { tables: vec![] });
    }

    #[test]
    fn test_text_fallback_picks_table_from_identifier() {
        // No FROM and no qualifiers; the table comes from a token containing its name
        let err = translation_error("SELECT id WHERE users_status = 1");
        assert!(matches!(err, TranslationError::SchemaLookup(_)));
    }

    #[test]
    fn test_precedence_survives_translation() {
        let grouped_left = run("SELECT id FROM users WHERE id = 1 AND status = 'a' OR budget < 3")
            .unwrap()
            .sql;
        let grouped_right =
            run("SELECT id FROM users WHERE id = 1 AND (status = 'a' OR budget < 3)")
                .unwrap()
                .sql;
        assert!(grouped_left.contains(
            "(user_master.user_id = 1 AND user_master.user_status = 'a') OR user_master.spend_limit < 3"
        ));
        assert!(grouped_right.contains(
            "user_master.user_id = 1 AND (user_master.user_status = 'a' OR user_master.spend_limit < 3)"
        ));
        assert_ne!(grouped_left, grouped_right);
    }

    #[test]
    fn test_literal_quoting_normalized() {
        let translation =
            run("SELECT name FROM categories WHERE name = \"toys\" OR id <> 7").unwrap();
        assert!(translation
            .sql
            .ends_with("WHERE category_master.category_name = 'toys' OR category_master.category_id != 7)"));
    }

    #[test]
    fn test_escaped_quote_literal_translates_like_double_quoted() {
        let escaped = run("SELECT id FROM users WHERE name = 'o''brien'").unwrap();
        assert!(escaped
            .sql
            .ends_with("WHERE user_master.user_name = 'o''brien')"));

        let double_quoted = run("SELECT id FROM users WHERE name = \"o'brien\"").unwrap();
        assert_eq!(escaped.sql, double_quoted.sql);
    }

    #[test]
    fn test_passthrough_physical_only_query_names_unknown_table() {
        let (catalog, hierarchy) = demo();
        let err = translate(
            "SELECT user_master.user_id FROM user_master",
            &catalog,
            &hierarchy,
            ResolveMode::PassthroughOnMiss,
        )
        .unwrap_err();
        assert_eq!(err.kind(), "SchemaLookupError");
        assert_eq!(err.to_string(), "Schema lookup failed: Unknown table `user_master`");
    }

    #[test]
    fn test_relation_column_rejected() {
        let err = translation_error("SELECT id FROM orders WHERE user_id = 3");
        assert_eq!(err.kind(), "SchemaLookupError");
    }

    #[test]
    fn test_unknown_column_reports_table_and_column() {
        match translation_error("SELECT id FROM users WHERE shoe_size = 9") {
            TranslationError::SchemaLookup(lookup) => {
                assert_eq!(lookup.table(), "users");
                assert_eq!(lookup.column(), Some("shoe_size"));
            }
            other => panic!("Expected SchemaLookup, got {:?}", other),
        }
    }

    #[test]
    fn test_not_rejected_as_malformed() {
        let err = translation_error("SELECT id FROM users WHERE NOT status = 'x'");
        assert_eq!(err.kind(), "MalformedExpression");
    }

    #[test]
    fn test_parse_error_surfaces() {
        let err = run("SELECT id FROM users GROUP BY status").unwrap_err();
        assert_eq!(err.kind(), "ParseError");
    }

    #[test]
    fn test_passthrough_renders_unknown_names() {
        let (catalog, hierarchy) = demo();
        let translation = translate(
            "SELECT users.id FROM users WHERE audit_log.actor = 'system'",
            &catalog,
            &hierarchy,
            ResolveMode::PassthroughOnMiss,
        )
        .unwrap();
        assert_eq!(translation.tables, vec!["users"]);
        assert!(translation.sql.ends_with("WHERE audit_log.actor = 'system')"));

        let strict = translate(
            "SELECT users.id FROM users WHERE audit_log.actor = 'system'",
            &catalog,
            &hierarchy,
            ResolveMode::Strict,
        );
        assert!(strict.is_err());
    }

    #[test]
    fn test_repeated_translation_is_identical() {
        let query = "SELECT orders.amount FROM orders WHERE items.quantity >= 1 OR orders.status != 'void'";
        assert_eq!(run(query).unwrap().sql, run(query).unwrap().sql);
    }
}
