use axum::{extract::{rejection::JsonRejection, Query, State}, http::StatusCode, response::IntoResponse, Json};
use crate::dto::quote_dto::{QuoteRequest, QuoteResponse};
use crate::handler::require_id;
use crate::service::quote_service::{QuoteService, QuoteServiceImpl};
use crate::util::error::{HandlerError, HandlerErrorKind};
use crate::util::object_id;
use bson::oid::ObjectId;
use std::collections::HashMap;
use std::sync::Arc;

fn quote_id(params: &HashMap<String, String>) -> Result<ObjectId, HandlerError> {
    let raw = require_id(params)?;
    object_id::decode(raw).map_err(|_| HandlerError::new(HandlerErrorKind::Validation, "ID inválido."))
}

// Handler: List quotes, newest first
pub async fn list_quotes_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let quotes = service
        .list_quotes()
        .await
        .map_err(|e| HandlerError::from_service(e, "Erro ao buscar orçamentos"))?;
    let body: Vec<QuoteResponse> = quotes.into_iter().map(QuoteResponse::from).collect();
    Ok(Json(body))
}

// Handler: Create quote
pub async fn create_quote_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Json(request) = payload?;
    let created = service
        .create_quote(request)
        .await
        .map_err(|e| HandlerError::from_service(e, "Erro ao salvar orçamento"))?;
    Ok((StatusCode::CREATED, Json(QuoteResponse::from(created))))
}

// Handler: Replace quote contents
pub async fn update_quote_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Query(params): Query<HashMap<String, String>>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = quote_id(&params)?;
    let Json(request) = payload?;
    let updated = service
        .update_quote(id, request)
        .await
        .map_err(|e| HandlerError::from_service(e, "Erro ao atualizar orçamento"))?;
    Ok(Json(QuoteResponse::from(updated)))
}

// Handler: Delete quote
pub async fn delete_quote_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = quote_id(&params)?;
    service
        .delete_quote(id)
        .await
        .map_err(|e| HandlerError::from_service(e, "Erro ao deletar orçamento"))?;
    Ok(StatusCode::NO_CONTENT)
}
