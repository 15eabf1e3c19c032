use std::{sync::Arc, time::Instant};

use axum::{extract::State, http::StatusCode, response::Json};

use crate::{
    schema_catalog::ResolveMode,
    sql_parser,
    translator::{self, TranslateError},
};

use super::{
    models::{
        SqlTranslationError, SqlTranslationMetadata, SqlTranslationRequest,
        SqlTranslationResponse,
    },
    AppState,
};

/// Handler for POST /query/sql - translate logical SQL to physical SQL
pub async fn sql_translation_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<SqlTranslationRequest>,
) -> Result<Json<SqlTranslationResponse>, (StatusCode, Json<SqlTranslationError>)> {
    let start_time = Instant::now();

    let mode = match payload.passthrough_unknown {
        Some(true) => ResolveMode::PassthroughOnMiss,
        Some(false) => ResolveMode::Strict,
        None => app_state.config.resolve_mode(),
    };

    let bad_request = |error: TranslateError| {
        log::warn!("translation failed ({}): {}", error.kind(), error);
        (
            StatusCode::BAD_REQUEST,
            Json(SqlTranslationError::new(&payload.query, &error)),
        )
    };

    let parse_start = Instant::now();
    let stmt = sql_parser::parse_query(&payload.query)
        .map_err(|e| bad_request(TranslateError::from(e)))?;
    let parse_time = parse_start.elapsed();

    let translation_start = Instant::now();
    let translation = translator::translate_statement(
        &stmt,
        &app_state.catalog,
        &app_state.hierarchy,
        mode,
    )
    .map_err(|e| bad_request(TranslateError::Translation(e)))?;
    let translation_time = translation_start.elapsed();

    log::debug!("POST /query/sql -> {}", translation.sql);

    Ok(Json(SqlTranslationResponse {
        query: payload.query.clone(),
        sql: translation.sql,
        tables: translation.tables,
        shape: translation.shape,
        metadata: SqlTranslationMetadata {
            parse_time_ms: parse_time.as_secs_f64() * 1000.0,
            translation_time_ms: translation_time.as_secs_f64() * 1000.0,
            total_time_ms: start_time.elapsed().as_secs_f64() * 1000.0,
        },
    }))
}
