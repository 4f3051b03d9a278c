use crate::model::material::{Material, MaterialPatch};
use crate::repository::current_timestamp;
use crate::repository::mongo_store::MongoStore;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::StreamExt;
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};
use tracing::{error, info};

#[async_trait]
pub trait MaterialRepository: Send + Sync {
    /// All materials, ascending by `descricao`.
    async fn list(&self) -> RepositoryResult<Vec<Material>>;
    async fn create(&self, material: Material) -> RepositoryResult<Material>;
    /// Applies `patch` and returns the post-update document.
    async fn update(&self, id: ObjectId, patch: MaterialPatch) -> RepositoryResult<Material>;
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()>;
}

pub struct MongoMaterialRepository {
    collection: mongodb::Collection<Material>,
}

impl MongoMaterialRepository {
    pub fn new(store: &MongoStore) -> Self {
        MongoMaterialRepository { collection: store.materials() }
    }
}

#[async_trait]
impl MaterialRepository for MongoMaterialRepository {
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> RepositoryResult<Vec<Material>> {
        info!("Listing materials");
        let options = FindOptions::builder().sort(doc! { "descricao": 1 }).build();
        let mut cursor = self
            .collection
            .find(None, options)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list materials: {}", e)))?;
        let mut materials = Vec::new();
        while let Some(material) = cursor.next().await {
            match material {
                Ok(m) => materials.push(m),
                Err(e) => {
                    error!("Failed to deserialize material: {}", e);
                    return Err(RepositoryError::serialization(format!("Failed to deserialize material: {}", e)));
                }
            }
        }
        info!("Fetched {} materials", materials.len());
        Ok(materials)
    }

    #[tracing::instrument(skip(self), fields(descricao = %material.descricao))]
    async fn create(&self, material: Material) -> RepositoryResult<Material> {
        let mut new_material = material;
        new_material.id = Some(ObjectId::new());
        let now = current_timestamp();
        new_material.createdAt = Some(now.clone());
        new_material.updatedAt = Some(now);

        match self.collection.insert_one(&new_material, None).await {
            Ok(_) => {
                info!("Material created successfully");
                Ok(new_material)
            }
            Err(e) => {
                error!("Failed to create material: {}", e);
                Err(RepositoryError::database(format!("Failed to create material: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn update(&self, id: ObjectId, patch: MaterialPatch) -> RepositoryResult<Material> {
        info!("Updating material");
        let filter = doc! { "_id": id };
        let update = doc! { "$set": patch.to_set_document(&current_timestamp()) };
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        match self.collection.find_one_and_update(filter, update, options).await {
            Ok(Some(material)) => {
                info!("Material updated successfully");
                Ok(material)
            }
            Ok(None) => {
                error!("No material found to update for ID: {}", id);
                Err(RepositoryError::not_found(format!("No material found to update for ID: {}", id)))
            }
            Err(e) => {
                error!("Failed to update material: {}", e);
                Err(RepositoryError::database(format!("Failed to update material: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        info!("Deleting material");
        let filter = doc! { "_id": id };
        match self.collection.delete_one(filter, None).await {
            Ok(result) if result.deleted_count > 0 => {
                info!("Material deleted successfully");
                Ok(())
            }
            Ok(_) => {
                error!("No material found to delete for ID: {}", id);
                Err(RepositoryError::not_found(format!("No material found to delete for ID: {}", id)))
            }
            Err(e) => {
                error!("Failed to delete material: {}", e);
                Err(RepositoryError::database(format!("Failed to delete material: {}", e)))
            }
        }
    }
}
