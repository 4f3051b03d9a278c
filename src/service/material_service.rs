use crate::dto::material_dto::MaterialRequest;
use crate::model::material::Material;
use crate::repository::material_repo::MaterialRepository;
use crate::service::integrity_guard::MaterialUsageGuard;
use crate::util::error::ServiceError;
use async_trait::async_trait;
use bson::oid::ObjectId;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use validator::Validate;

pub const MISSING_FIELDS_MESSAGE: &str = "Todos os campos obrigatórios devem ser preenchidos.";
pub const NO_FIELDS_MESSAGE: &str = "Nenhum campo para atualizar.";

#[async_trait]
pub trait MaterialService: Send + Sync {
    async fn list_materials(&self) -> Result<Vec<Material>, ServiceError>;
    async fn create_material(&self, request: MaterialRequest) -> Result<Material, ServiceError>;
    async fn update_material(&self, id: ObjectId, request: MaterialRequest) -> Result<Material, ServiceError>;
    async fn delete_material(&self, id: ObjectId) -> Result<(), ServiceError>;
}

pub struct MaterialServiceImpl {
    pub material_repo: Arc<dyn MaterialRepository>,
    pub usage_guard: MaterialUsageGuard,
}

impl MaterialServiceImpl {
    pub fn new(material_repo: Arc<dyn MaterialRepository>, usage_guard: MaterialUsageGuard) -> Self {
        MaterialServiceImpl { material_repo, usage_guard }
    }
}

#[async_trait]
impl MaterialService for MaterialServiceImpl {
    #[instrument(skip(self))]
    async fn list_materials(&self) -> Result<Vec<Material>, ServiceError> {
        info!("Listing materials");
        let res = self.material_repo.list().await;
        match &res {
            Ok(materials) => info!("Fetched {} materials", materials.len()),
            Err(e) => error!("Failed to list materials: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self, request))]
    async fn create_material(&self, request: MaterialRequest) -> Result<Material, ServiceError> {
        if let Err(e) = request.validate() {
            warn!("Rejected material: {e}");
            return Err(ServiceError::InvalidInput(MISSING_FIELDS_MESSAGE.to_string()));
        }
        let res = self.material_repo.create(request.into_material()).await;
        match &res {
            Ok(m) => info!(id = ?m.id, "Material created"),
            Err(e) => error!("Failed to create material: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self, request), fields(id = %id))]
    async fn update_material(&self, id: ObjectId, request: MaterialRequest) -> Result<Material, ServiceError> {
        let patch = request.into_patch();
        if patch.is_empty() {
            warn!("Rejected empty material update");
            return Err(ServiceError::InvalidInput(NO_FIELDS_MESSAGE.to_string()));
        }
        let res = self.material_repo.update(id, patch).await;
        match &res {
            Ok(_) => info!("Material updated"),
            Err(e) => error!("Failed to update material: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete_material(&self, id: ObjectId) -> Result<(), ServiceError> {
        self.usage_guard.ensure_not_in_use(id).await?;
        let res = self.material_repo.delete(id).await;
        match &res {
            Ok(_) => info!("Material deleted"),
            Err(e) => error!("Failed to delete material: {e}"),
        }
        res.map_err(ServiceError::from)
    }
}
