//! Predicate trees rendered against the demo catalog

#[cfg(test)]
mod predicate_rendering_tests {
    use schemaql::query_planner::{
        expression_rewriter::rewrite_expression,
        logical_expr::{ColumnRef, ComparisonOperator, Expr, Operand},
        RewriteContext, TranslationError,
    };
    use schemaql::schema_catalog::{SchemaCatalog, SchemaConfig};

    fn catalog() -> SchemaCatalog {
        let config =
            SchemaConfig::from_yaml_str(include_str!("../../../schemas/commerce.yaml")).unwrap();
        config.build().unwrap().0
    }

    fn eq(column: &str, literal: &str) -> Expr {
        Expr::comparison(
            Operand::Column(ColumnRef::unqualified(column)),
            ComparisonOperator::Equal,
            Operand::Literal(literal.to_string()),
        )
    }

    #[test]
    fn test_differently_shaped_trees_render_differently() {
        let catalog = catalog();
        let scope = vec!["orders".to_string()];
        let ctx = RewriteContext::new(&catalog, &scope);

        let left_grouped = Expr::or(
            Expr::and(eq("id", "1"), eq("status", "'new'")),
            eq("amount", "5"),
        );
        let right_grouped = Expr::and(
            eq("id", "1"),
            Expr::or(eq("status", "'new'"), eq("amount", "5")),
        );

        assert_eq!(
            rewrite_expression(&left_grouped, &ctx).unwrap(),
            "(order_details.order_id = 1 AND order_details.order_status = 'new') OR order_details.order_amount = 5"
        );
        assert_eq!(
            rewrite_expression(&right_grouped, &ctx).unwrap(),
            "order_details.order_id = 1 AND (order_details.order_status = 'new' OR order_details.order_amount = 5)"
        );
    }

    #[test]
    fn test_or_chain_is_flat() {
        let catalog = catalog();
        let scope = vec!["orders".to_string()];
        let ctx = RewriteContext::new(&catalog, &scope);
        let expr = Expr::or(Expr::or(eq("id", "1"), eq("id", "2")), eq("id", "3"));
        assert_eq!(
            rewrite_expression(&expr, &ctx).unwrap(),
            "order_details.order_id = 1 OR order_details.order_id = 2 OR order_details.order_id = 3"
        );
    }

    #[test]
    fn test_deeply_nested_alternation() {
        let catalog = catalog();
        let scope = vec!["orders".to_string()];
        let ctx = RewriteContext::new(&catalog, &scope);
        // ((a OR b) AND c) OR d
        let expr = Expr::or(
            Expr::and(Expr::or(eq("id", "1"), eq("id", "2")), eq("status", "'x'")),
            eq("amount", "0"),
        );
        assert_eq!(
            rewrite_expression(&expr, &ctx).unwrap(),
            "((order_details.order_id = 1 OR order_details.order_id = 2) AND order_details.order_status = 'x') OR order_details.order_amount = 0"
        );
    }

    #[test]
    fn test_every_identity_resolves() {
        let catalog = catalog();
        for table in catalog.table_names() {
            let identity = catalog.identity_column(table).unwrap();
            let first = catalog.resolve_identity(table).unwrap();
            let second = catalog.resolve_identity(table).unwrap();
            assert_eq!(first, second);
            assert!(!identity.is_empty());
        }
    }

    #[test]
    fn test_unresolvable_operand_fails_whole_tree() {
        let catalog = catalog();
        let scope = vec!["orders".to_string()];
        let ctx = RewriteContext::new(&catalog, &scope);
        let expr = Expr::and(eq("id", "1"), eq("coupon", "'SAVE'"));
        assert_eq!(
            rewrite_expression(&expr, &ctx).unwrap_err().kind(),
            "SchemaLookupError"
        );
        assert!(matches!(
            rewrite_expression(&expr, &ctx),
            Err(TranslationError::SchemaLookup(_))
        ));
    }
}
