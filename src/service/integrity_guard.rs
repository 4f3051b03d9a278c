use crate::repository::quote_repo::QuoteRepository;
use crate::util::error::ServiceError;
use bson::oid::ObjectId;
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub const MATERIAL_IN_USE_MESSAGE: &str =
    "Não é possível deletar este material, pois ele está sendo usado em um ou mais orçamentos.";

/// Refuses material deletion while any quote still references the material.
///
/// The lookup and the delete that follows are two separate store operations,
/// so a quote written in between can still end up pointing at a deleted
/// material.
#[derive(Clone)]
pub struct MaterialUsageGuard {
    quote_repo: Arc<dyn QuoteRepository>,
}

impl MaterialUsageGuard {
    pub fn new(quote_repo: Arc<dyn QuoteRepository>) -> Self {
        MaterialUsageGuard { quote_repo }
    }

    #[instrument(skip(self), fields(material_id = %material_id))]
    pub async fn is_in_use(&self, material_id: ObjectId) -> Result<bool, ServiceError> {
        let in_use = self.quote_repo.exists_with_material(material_id).await?;
        info!(in_use, "Checked material usage");
        Ok(in_use)
    }

    pub async fn ensure_not_in_use(&self, material_id: ObjectId) -> Result<(), ServiceError> {
        if self.is_in_use(material_id).await? {
            warn!(material_id = %material_id, "Refusing to delete material referenced by quotes");
            return Err(ServiceError::Conflict(MATERIAL_IN_USE_MESSAGE.to_string()));
        }
        Ok(())
    }
}
