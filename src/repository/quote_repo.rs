use crate::model::quote::{Quote, QuoteReplacement};
use crate::repository::current_timestamp;
use crate::repository::mongo_store::MongoStore;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::StreamExt;
use mongodb::options::{FindOneAndUpdateOptions, FindOneOptions, FindOptions, ReturnDocument};
use tracing::{error, info};

#[async_trait]
pub trait QuoteRepository: Send + Sync {
    /// All quotes, newest `createdAt` first.
    async fn list(&self) -> RepositoryResult<Vec<Quote>>;
    async fn create(&self, quote: Quote) -> RepositoryResult<Quote>;
    /// Overwrites the editable fields and returns the post-update document.
    async fn update(&self, id: ObjectId, replacement: QuoteReplacement) -> RepositoryResult<Quote>;
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()>;
    /// Whether any material usage in any quote references `material_id`.
    async fn exists_with_material(&self, material_id: ObjectId) -> RepositoryResult<bool>;
}

pub struct MongoQuoteRepository {
    collection: mongodb::Collection<Quote>,
}

impl MongoQuoteRepository {
    pub fn new(store: &MongoStore) -> Self {
        MongoQuoteRepository { collection: store.quotes() }
    }
}

#[async_trait]
impl QuoteRepository for MongoQuoteRepository {
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> RepositoryResult<Vec<Quote>> {
        info!("Listing quotes");
        let options = FindOptions::builder().sort(doc! { "createdAt": -1 }).build();
        let cursor = self.collection.find(None, options).await;
        match cursor {
            Ok(mut cursor) => {
                let mut quotes = Vec::new();
                while let Some(quote) = cursor.next().await {
                    match quote {
                        Ok(q) => quotes.push(q),
                        Err(e) => {
                            error!("Failed to deserialize quote: {}", e);
                            return Err(RepositoryError::serialization(format!("Failed to deserialize quote: {}", e)));
                        }
                    }
                }
                info!("Fetched {} quotes", quotes.len());
                Ok(quotes)
            }
            Err(e) => {
                error!("Failed to list quotes: {}", e);
                Err(RepositoryError::database(format!("Failed to list quotes: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self, quote), fields(cliente = %quote.cliente, itens = quote.itens.len()))]
    async fn create(&self, quote: Quote) -> RepositoryResult<Quote> {
        info!("Creating new quote");
        let mut new_quote = quote;
        new_quote.id = Some(ObjectId::new());
        let now = current_timestamp();
        new_quote.createdAt = Some(now.clone());
        new_quote.updatedAt = Some(now);

        match self.collection.insert_one(&new_quote, None).await {
            Ok(_) => {
                info!("Quote created successfully");
                Ok(new_quote)
            }
            Err(e) => {
                error!("Failed to create quote: {}", e);
                Err(RepositoryError::database(format!("Failed to create quote: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self, replacement), fields(id = %id, itens = replacement.itens.len()))]
    async fn update(&self, id: ObjectId, replacement: QuoteReplacement) -> RepositoryResult<Quote> {
        info!("Replacing quote");
        let filter = doc! { "_id": id };
        let update = doc! { "$set": replacement.to_set_document(&current_timestamp())? };
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        match self.collection.find_one_and_update(filter, update, options).await {
            Ok(Some(quote)) => {
                info!("Quote replaced successfully");
                Ok(quote)
            }
            Ok(None) => {
                error!("No quote found to update for ID: {}", id);
                Err(RepositoryError::not_found(format!("No quote found to update for ID: {}", id)))
            }
            Err(e) => {
                error!("Failed to update quote: {}", e);
                Err(RepositoryError::database(format!("Failed to update quote: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        info!("Deleting quote");
        let filter = doc! { "_id": id };
        match self.collection.delete_one(filter, None).await {
            Ok(result) if result.deleted_count > 0 => {
                info!("Quote deleted successfully");
                Ok(())
            }
            Ok(_) => {
                error!("No quote found to delete for ID: {}", id);
                Err(RepositoryError::not_found(format!("No quote found to delete for ID: {}", id)))
            }
            Err(e) => {
                error!("Failed to delete quote: {}", e);
                Err(RepositoryError::database(format!("Failed to delete quote: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(material_id = %material_id))]
    async fn exists_with_material(&self, material_id: ObjectId) -> RepositoryResult<bool> {
        let filter = doc! { "itens.materiais.materialId": material_id };
        // Existence only: fetch the id of the first match, nothing else.
        let options = FindOneOptions::builder().projection(doc! { "_id": 1 }).build();
        match self.collection.clone_with_type::<bson::Document>().find_one(filter, options).await {
            Ok(found) => Ok(found.is_some()),
            Err(e) => {
                error!("Failed to look up quotes using material: {}", e);
                Err(RepositoryError::database(format!("Failed to look up quotes using material: {}", e)))
            }
        }
    }
}
