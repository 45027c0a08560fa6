use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::SecondsFormat;
use civic_core::{CouncilMember, Project, TaxRecord};
use serde_json::{Value, json};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// Probe the store and report its clock.
pub async fn test_db_handler(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let time = state.repo.database_time().await?;

    Ok(Json(json!({
        "message": "Database connection successful!",
        "time": time.to_rfc3339_opts(SecondsFormat::Millis, true),
    })))
}

pub async fn tax_records_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TaxRecord>>, ApiError> {
    let records = state.repo.list_tax_records().await?;
    debug!(count = records.len(), "fetched tax records");
    non_empty(records, "No tax records found.").map(Json)
}

pub async fn council_members_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CouncilMember>>, ApiError> {
    let members = state.repo.list_council_members().await?;
    debug!(count = members.len(), "fetched council members");
    non_empty(members, "No council members found.").map(Json)
}

pub async fn projects_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Project>>, ApiError> {
    let projects = state.repo.list_projects().await?;
    debug!(count = projects.len(), "fetched projects");
    non_empty(projects, "No projects found.").map(Json)
}

fn non_empty<T>(rows: Vec<T>, message: &'static str) -> Result<Vec<T>, ApiError> {
    if rows.is_empty() {
        Err(ApiError::NotFound(message))
    } else {
        Ok(rows)
    }
}
