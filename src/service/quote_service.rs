use crate::dto::quote_dto::QuoteRequest;
use crate::model::quote::Quote;
use crate::repository::quote_repo::QuoteRepository;
use crate::util::error::ServiceError;
use async_trait::async_trait;
use bson::oid::ObjectId;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use validator::Validate;

pub const MISSING_QUOTE_FIELDS_MESSAGE: &str = "Cliente, data e itens são obrigatórios.";

#[async_trait]
pub trait QuoteService: Send + Sync {
	async fn list_quotes(&self) -> Result<Vec<Quote>, ServiceError>;
	async fn create_quote(&self, request: QuoteRequest) -> Result<Quote, ServiceError>;
	async fn update_quote(&self, id: ObjectId, request: QuoteRequest) -> Result<Quote, ServiceError>;
	async fn delete_quote(&self, id: ObjectId) -> Result<(), ServiceError>;
}

pub struct QuoteServiceImpl {
	pub quote_repo: Arc<dyn QuoteRepository>,
}

impl QuoteServiceImpl {
	pub fn new(quote_repo: Arc<dyn QuoteRepository>) -> Self {
		QuoteServiceImpl { quote_repo }
	}

	fn check_required(request: &QuoteRequest) -> Result<(), ServiceError> {
		request.validate().map_err(|e| {
			warn!("Rejected quote: {e}");
			ServiceError::InvalidInput(MISSING_QUOTE_FIELDS_MESSAGE.to_string())
		})
	}
}

#[async_trait]
impl QuoteService for QuoteServiceImpl {
	#[instrument(skip(self))]
	async fn list_quotes(&self) -> Result<Vec<Quote>, ServiceError> {
		info!("Listing quotes");
		let res = self.quote_repo.list().await;
		match &res {
			Ok(quotes) => info!("Fetched {} quotes", quotes.len()),
			Err(e) => error!("Failed to list quotes: {e}"),
		}
		res.map_err(ServiceError::from)
	}

	#[instrument(skip(self, request))]
	async fn create_quote(&self, request: QuoteRequest) -> Result<Quote, ServiceError> {
		Self::check_required(&request)?;
		let res = self.quote_repo.create(request.into_quote()).await;
		match &res {
			Ok(q) => info!(id = ?q.id, "Quote created"),
			Err(e) => error!("Failed to create quote: {e}"),
		}
		res.map_err(ServiceError::from)
	}

	#[instrument(skip(self, request), fields(id = %id))]
	async fn update_quote(&self, id: ObjectId, request: QuoteRequest) -> Result<Quote, ServiceError> {
		Self::check_required(&request)?;
		let res = self.quote_repo.update(id, request.into_replacement()).await;
		match &res {
			Ok(_) => info!("Quote replaced"),
			Err(e) => error!("Failed to update quote: {e}"),
		}
		res.map_err(ServiceError::from)
	}

	#[instrument(skip(self), fields(id = %id))]
	async fn delete_quote(&self, id: ObjectId) -> Result<(), ServiceError> {
		info!("Deleting quote");
		let res = self.quote_repo.delete(id).await;
		match &res {
			Ok(_) => info!("Quote deleted successfully"),
			Err(e) => error!("Failed to delete quote: {e}"),
		}
		res.map_err(ServiceError::from)
	}
}
