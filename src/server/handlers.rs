use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};

use super::{
    models::{SchemaResponse, TableSummary},
    AppState,
};

pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "service": "schemaql",
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /schema - loaded tables in declaration order
pub async fn schema_handler(State(app_state): State<Arc<AppState>>) -> Json<SchemaResponse> {
    let tables = app_state
        .catalog
        .tables()
        .map(|table| TableSummary {
            name: table.name.clone(),
            physical_name: table.physical_name.clone(),
            is_public: table.is_public,
            level: app_state.hierarchy.get(&table.name),
            identity: table.identity.clone(),
        })
        .collect();
    Json(SchemaResponse { tables })
}
