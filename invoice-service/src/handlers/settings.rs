use crate::dtos::{SettingsPayload, SettingsResponse};
use crate::startup::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;
use validator::Validate;

/// Returns the singleton, or blank defaults when nothing has been saved
/// yet. GET never 404s.
pub async fn get_settings(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let settings = state.store.fetch_settings().await?.unwrap_or_default();
    Ok(Json(SettingsResponse::from(settings)))
}

pub async fn save_settings(
    State(state): State<AppState>,
    Json(payload): Json<SettingsPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let settings = payload.into_settings();
    state.store.upsert_settings(&settings).await?;

    tracing::info!(company_name = %settings.company_name, "Company settings saved");

    Ok(Json(json!({ "message": "Settings saved successfully" })))
}
