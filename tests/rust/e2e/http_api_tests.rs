#[cfg(test)]
mod http_api_tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use schemaql::config::ServerConfig;
    use schemaql::schema_catalog::SchemaConfig;
    use schemaql::server::{router, AppState};

    fn app_with(config: ServerConfig) -> Router {
        let (catalog, hierarchy) =
            SchemaConfig::from_yaml_str(include_str!("../../../schemas/commerce.yaml"))
                .unwrap()
                .build()
                .unwrap();
        router(AppState::new(catalog, hierarchy, config))
    }

    fn app() -> Router {
        app_with(ServerConfig::default())
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json(app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "schemaql");
    }

    #[tokio::test]
    async fn test_translate_single_table() {
        let (status, body) = post_json(
            app(),
            "/query/sql",
            json!({ "query": "SELECT id FROM users WHERE id > 5" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["sql"],
            "SELECT user_master.user_id FROM user_master WHERE user_master.user_id IN \
             (SELECT DISTINCT user_master.user_id FROM user_master WHERE user_master.user_id > 5)"
        );
        assert_eq!(body["tables"], json!(["users"]));
        assert_eq!(body["shape"]["kind"], "single_table");
        assert!(body["metadata"]["total_time_ms"].is_number());
    }

    #[tokio::test]
    async fn test_translate_join_shape() {
        let (status, body) = post_json(
            app(),
            "/query/sql",
            json!({ "query": "SELECT users.name FROM users WHERE orders.amount > 10" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["shape"]["kind"], "adjacent_join");
        assert_eq!(body["shape"]["parent"], "users");
        assert_eq!(body["shape"]["child"], "orders");
        assert_eq!(body["shape"]["join_column"], "user_id");
    }

    #[tokio::test]
    async fn test_translation_error_is_bad_request() {
        let (status, body) = post_json(
            app(),
            "/query/sql",
            json!({ "query": "SELECT users.id FROM users WHERE categories.name = 'x'" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_type"], "UnsupportedJoin");
        assert_eq!(
            body["query"],
            "SELECT users.id FROM users WHERE categories.name = 'x'"
        );
    }

    #[tokio::test]
    async fn test_lookup_error_details() {
        let (status, body) = post_json(
            app(),
            "/query/sql",
            json!({ "query": "SELECT id FROM users WHERE shoe_size = 9" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_type"], "SchemaLookupError");
        assert_eq!(body["error_details"]["table"], "users");
        assert_eq!(body["error_details"]["column"], "shoe_size");
    }

    #[tokio::test]
    async fn test_parse_error() {
        let (status, body) = post_json(
            app(),
            "/query/sql",
            json!({ "query": "SELECT id FROM users ORDER BY id" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_type"], "ParseError");
    }

    #[tokio::test]
    async fn test_passthrough_per_request() {
        let query = "SELECT users.id FROM users WHERE legacy.flag = 1";

        let (status, _) = post_json(app(), "/query/sql", json!({ "query": query })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = post_json(
            app(),
            "/query/sql",
            json!({ "query": query, "passthrough_unknown": true }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["sql"].as_str().unwrap().contains("legacy.flag = 1"));
    }

    #[tokio::test]
    async fn test_passthrough_from_config() {
        let config = ServerConfig {
            passthrough_unknown: true,
            ..Default::default()
        };
        let (status, _) = post_json(
            app_with(config),
            "/query/sql",
            json!({ "query": "SELECT users.id FROM users WHERE legacy.flag = 1" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_schema_listing() {
        let (status, body) = get_json(app(), "/schema").await;
        assert_eq!(status, StatusCode::OK);
        let tables = body["tables"].as_array().unwrap();
        let names: Vec<&str> = tables.iter().map(|t| t["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["users", "orders", "items", "categories"]);
        assert_eq!(tables[0]["physical_name"], "user_master");
        assert_eq!(tables[3]["level"], 4);
    }

    #[tokio::test]
    async fn test_body_limit() {
        let config = ServerConfig {
            max_body_bytes: 1024,
            ..Default::default()
        };
        let padding = "x".repeat(4096);
        let (status, _) = post_json(
            app_with(config),
            "/query/sql",
            json!({ "query": format!("SELECT id FROM users WHERE name = '{}'", padding) }),
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }
}
