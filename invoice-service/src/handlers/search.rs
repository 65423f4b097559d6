use crate::dtos::{CustomerResponse, InvoiceResponse, SearchParams};
use crate::startup::AppState;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

const SEARCH_LIMIT: i64 = 10;

pub async fn search_customers(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let query = params.q.trim();
    if query.is_empty() {
        return Ok(Json(Vec::<CustomerResponse>::new()));
    }

    let customers = state.store.search_customers(query, SEARCH_LIMIT).await?;
    Ok(Json(
        customers.into_iter().map(CustomerResponse::from).collect(),
    ))
}

pub async fn search_invoices(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let query = params.q.trim();
    if query.is_empty() {
        return Ok(Json(Vec::<InvoiceResponse>::new()));
    }

    let invoices = state.store.search_invoices(query, SEARCH_LIMIT).await?;
    Ok(Json(
        invoices
            .into_iter()
            .map(InvoiceResponse::from)
            .collect::<Vec<_>>(),
    ))
}
