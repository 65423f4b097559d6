use crate::dtos::{CustomerPayload, CustomerResponse};
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use service_core::error::AppError;
use validator::Validate;

pub async fn create_customer(
    State(state): State<AppState>,
    Json(payload): Json<CustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let customer = payload.into_customer();
    state.store.insert_customer(&customer).await?;

    tracing::info!(customer_id = %customer.customer_id, "Customer created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Customer created successfully",
            "customer_id": customer.customer_id,
        })),
    ))
}

pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let customers = state.store.list_customers().await?;
    let responses: Vec<CustomerResponse> =
        customers.into_iter().map(CustomerResponse::from).collect();
    Ok(Json(responses))
}

pub async fn get_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let customer = state
        .store
        .fetch_customer(&customer_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Customer not found")))?;

    Ok(Json(CustomerResponse::from(customer)))
}

pub async fn update_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    Json(payload): Json<CustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let existing = state
        .store
        .fetch_customer(&customer_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Customer not found")))?;

    let customer = payload.apply_to(&existing);
    state.store.replace_customer(&customer_id, &customer).await?;

    Ok(Json(json!({ "message": "Customer updated successfully" })))
}

/// Deletion is allowed even when invoices still reference the customer;
/// those invoices keep the dangling id and list views show
/// "Unknown Customer".
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state.store.delete_customer(&customer_id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!("Customer not found")));
    }

    tracing::info!(customer_id = %customer_id, "Customer deleted");

    Ok(Json(json!({ "message": "Customer deleted successfully" })))
}
