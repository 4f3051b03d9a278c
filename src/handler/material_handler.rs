use axum::{extract::{rejection::JsonRejection, Query, State}, http::StatusCode, response::IntoResponse, Json};
use crate::dto::material_dto::{MaterialRequest, MaterialResponse};
use crate::handler::require_id;
use crate::service::material_service::{MaterialService, MaterialServiceImpl};
use crate::util::error::{HandlerError, ServiceError};
use crate::util::object_id;
use std::collections::HashMap;
use std::sync::Arc;

// Handler: List materials
pub async fn list_materials_handler(
    State(service): State<Arc<MaterialServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let materials = service
        .list_materials()
        .await
        .map_err(|e| HandlerError::from_service(e, "Erro ao buscar produtos"))?;
    let body: Vec<MaterialResponse> = materials.into_iter().map(MaterialResponse::from).collect();
    Ok(Json(body))
}

// Handler: Create material
pub async fn create_material_handler(
    State(service): State<Arc<MaterialServiceImpl>>,
    payload: Result<Json<MaterialRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Json(request) = payload?;
    let created = service
        .create_material(request)
        .await
        .map_err(|e| HandlerError::from_service(e, "Erro ao adicionar produto"))?;
    Ok((StatusCode::CREATED, Json(MaterialResponse::from(created))))
}

// Handler: Partial update of a material
pub async fn update_material_handler(
    State(service): State<Arc<MaterialServiceImpl>>,
    Query(params): Query<HashMap<String, String>>,
    payload: Result<Json<MaterialRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = object_id::decode(require_id(&params)?).map_err(ServiceError::from)?;
    let Json(request) = payload?;
    let updated = service
        .update_material(id, request)
        .await
        .map_err(|e| HandlerError::from_service(e, "Erro ao atualizar produto"))?;
    Ok(Json(MaterialResponse::from(updated)))
}

// Handler: Delete a material that no quote references
pub async fn delete_material_handler(
    State(service): State<Arc<MaterialServiceImpl>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = object_id::decode(require_id(&params)?).map_err(ServiceError::from)?;
    service
        .delete_material(id)
        .await
        .map_err(|e| HandlerError::from_service(e, "Erro ao deletar produto"))?;
    Ok(StatusCode::NO_CONTENT)
}
