#![allow(dead_code)]

use async_trait::async_trait;
use axum::{body::Body, http::{Request, Response}, Router};
use bson::oid::ObjectId;
use http_body_util::BodyExt;
use orcamento_papelaria_backend::app::app::build_router;
use orcamento_papelaria_backend::model::material::{Material, MaterialPatch};
use orcamento_papelaria_backend::model::quote::{Quote, QuoteReplacement};
use orcamento_papelaria_backend::repository::current_timestamp;
use orcamento_papelaria_backend::repository::material_repo::MaterialRepository;
use orcamento_papelaria_backend::repository::quote_repo::QuoteRepository;
use orcamento_papelaria_backend::repository::repository_error::{RepositoryError, RepositoryResult};
use orcamento_papelaria_backend::service::integrity_guard::MaterialUsageGuard;
use orcamento_papelaria_backend::service::material_service::MaterialServiceImpl;
use orcamento_papelaria_backend::service::quote_service::QuoteServiceImpl;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// What `$set` with a `MaterialPatch` does to the stored document.
pub fn apply_patch(patch: &MaterialPatch, material: &mut Material, updated_at: &str) {
    if let Some(v) = patch.quantidade {
        material.quantidade = v;
    }
    if let Some(ref v) = patch.descricao {
        material.descricao = v.clone();
    }
    if let Some(v) = patch.preco_pacote {
        material.precoPacote = v;
    }
    if let Some(v) = patch.preco_anterior {
        material.precoAnterior = v;
    }
    if let Some(ref v) = patch.loja {
        material.loja = v.clone();
    }
    if let Some(v) = patch.valor_final_unitario {
        material.valorFinalUnitario = v;
    }
    material.updatedAt = Some(updated_at.to_string());
}

pub fn apply_replacement(replacement: QuoteReplacement, quote: &mut Quote, updated_at: &str) {
    quote.cliente = replacement.cliente;
    quote.descricao = replacement.descricao;
    quote.data = replacement.data;
    quote.itens = replacement.itens;
    quote.updatedAt = Some(updated_at.to_string());
}

/// Same match as the `itens.materiais.materialId` query.
pub fn references_material(quote: &Quote, material_id: &ObjectId) -> bool {
    quote
        .itens
        .iter()
        .flat_map(|item| item.materiais.iter())
        .any(|usage| usage.materialId.as_ref() == Some(material_id))
}

/// Materials collection kept in memory. Counts write calls so tests can
/// assert that rejected requests never reached the store.
#[derive(Default)]
pub struct InMemoryMaterialRepository {
    pub materials: Mutex<Vec<Material>>,
    pub writes: AtomicUsize,
}

impl InMemoryMaterialRepository {
    pub fn snapshot(&self) -> Vec<Material> {
        self.materials.lock().unwrap().clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MaterialRepository for InMemoryMaterialRepository {
    async fn list(&self) -> RepositoryResult<Vec<Material>> {
        let mut materials = self.snapshot();
        materials.sort_by(|a, b| a.descricao.cmp(&b.descricao));
        Ok(materials)
    }

    async fn create(&self, mut material: Material) -> RepositoryResult<Material> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        material.id = Some(ObjectId::new());
        let now = current_timestamp();
        material.createdAt = Some(now.clone());
        material.updatedAt = Some(now);
        self.materials.lock().unwrap().push(material.clone());
        Ok(material)
    }

    async fn update(&self, id: ObjectId, patch: MaterialPatch) -> RepositoryResult<Material> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut materials = self.materials.lock().unwrap();
        match materials.iter_mut().find(|m| m.id == Some(id)) {
            Some(material) => {
                apply_patch(&patch, material, &current_timestamp());
                Ok(material.clone())
            }
            None => Err(RepositoryError::not_found(format!("No material found to update for ID: {}", id))),
        }
    }

    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut materials = self.materials.lock().unwrap();
        let before = materials.len();
        materials.retain(|m| m.id != Some(id));
        if materials.len() == before {
            return Err(RepositoryError::not_found(format!("No material found to delete for ID: {}", id)));
        }
        Ok(())
    }
}

/// Quotes collection kept in memory. `createdAt` comes from a counter so
/// ordering is deterministic even within one millisecond.
#[derive(Default)]
pub struct InMemoryQuoteRepository {
    pub quotes: Mutex<Vec<Quote>>,
    pub writes: AtomicUsize,
    clock: AtomicUsize,
}

impl InMemoryQuoteRepository {
    pub fn snapshot(&self) -> Vec<Quote> {
        self.quotes.lock().unwrap().clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn tick(&self) -> String {
        let n = self.clock.fetch_add(1, Ordering::SeqCst);
        format!("2026-01-01T00:00:{:02}.{:03}Z", n / 1000, n % 1000)
    }
}

#[async_trait]
impl QuoteRepository for InMemoryQuoteRepository {
    async fn list(&self) -> RepositoryResult<Vec<Quote>> {
        let mut quotes = self.snapshot();
        quotes.sort_by(|a, b| b.createdAt.cmp(&a.createdAt));
        Ok(quotes)
    }

    async fn create(&self, mut quote: Quote) -> RepositoryResult<Quote> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        quote.id = Some(ObjectId::new());
        let now = self.tick();
        quote.createdAt = Some(now.clone());
        quote.updatedAt = Some(now);
        self.quotes.lock().unwrap().push(quote.clone());
        Ok(quote)
    }

    async fn update(&self, id: ObjectId, replacement: QuoteReplacement) -> RepositoryResult<Quote> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let now = self.tick();
        let mut quotes = self.quotes.lock().unwrap();
        match quotes.iter_mut().find(|q| q.id == Some(id)) {
            Some(quote) => {
                apply_replacement(replacement, quote, &now);
                Ok(quote.clone())
            }
            None => Err(RepositoryError::not_found(format!("No quote found to update for ID: {}", id))),
        }
    }

    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut quotes = self.quotes.lock().unwrap();
        let before = quotes.len();
        quotes.retain(|q| q.id != Some(id));
        if quotes.len() == before {
            return Err(RepositoryError::not_found(format!("No quote found to delete for ID: {}", id)));
        }
        Ok(())
    }

    async fn exists_with_material(&self, material_id: ObjectId) -> RepositoryResult<bool> {
        Ok(self.snapshot().iter().any(|q| references_material(q, &material_id)))
    }
}

/// Store that is unreachable for every call.
pub struct UnreachableStore;

#[async_trait]
impl MaterialRepository for UnreachableStore {
    async fn list(&self) -> RepositoryResult<Vec<Material>> {
        Err(RepositoryError::connection("connection refused"))
    }
    async fn create(&self, _material: Material) -> RepositoryResult<Material> {
        Err(RepositoryError::connection("connection refused"))
    }
    async fn update(&self, _id: ObjectId, _patch: MaterialPatch) -> RepositoryResult<Material> {
        Err(RepositoryError::connection("connection refused"))
    }
    async fn delete(&self, _id: ObjectId) -> RepositoryResult<()> {
        Err(RepositoryError::connection("connection refused"))
    }
}

#[async_trait]
impl QuoteRepository for UnreachableStore {
    async fn list(&self) -> RepositoryResult<Vec<Quote>> {
        Err(RepositoryError::connection("connection refused"))
    }
    async fn create(&self, _quote: Quote) -> RepositoryResult<Quote> {
        Err(RepositoryError::connection("connection refused"))
    }
    async fn update(&self, _id: ObjectId, _replacement: QuoteReplacement) -> RepositoryResult<Quote> {
        Err(RepositoryError::connection("connection refused"))
    }
    async fn delete(&self, _id: ObjectId) -> RepositoryResult<()> {
        Err(RepositoryError::connection("connection refused"))
    }
    async fn exists_with_material(&self, _material_id: ObjectId) -> RepositoryResult<bool> {
        Err(RepositoryError::connection("connection refused"))
    }
}

pub struct TestApp {
    pub router: Router,
    pub materials: Arc<InMemoryMaterialRepository>,
    pub quotes: Arc<InMemoryQuoteRepository>,
    pub material_service: Arc<MaterialServiceImpl>,
    pub quote_service: Arc<QuoteServiceImpl>,
}

pub fn setup_app() -> TestApp {
    let materials = Arc::new(InMemoryMaterialRepository::default());
    let quotes = Arc::new(InMemoryQuoteRepository::default());
    let guard = MaterialUsageGuard::new(quotes.clone());
    let material_service = Arc::new(MaterialServiceImpl::new(materials.clone(), guard));
    let quote_service = Arc::new(QuoteServiceImpl::new(quotes.clone()));
    let router = build_router(material_service.clone(), quote_service.clone());
    TestApp { router, materials, quotes, material_service, quote_service }
}

pub fn setup_unreachable_app() -> Router {
    let store = Arc::new(UnreachableStore);
    let guard = MaterialUsageGuard::new(store.clone());
    let material_service = Arc::new(MaterialServiceImpl::new(store.clone(), guard));
    let quote_service = Arc::new(QuoteServiceImpl::new(store));
    build_router(material_service, quote_service)
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(req).await.unwrap()
}

pub async fn body_bytes(resp: Response<Body>) -> Vec<u8> {
    resp.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(resp: Response<Body>) -> Value {
    let bytes = body_bytes(resp).await;
    serde_json::from_slice(&bytes).unwrap()
}

pub fn paper_a4() -> Value {
    serde_json::json!({
        "quantidade": 10,
        "descricao": "Papel A4",
        "precoPacote": 25.0,
        "loja": "Loja X",
        "valorFinalUnitario": 0.5
    })
}
