use axum::{Router, middleware, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use crate::config::app_conf::AppConfig;
use crate::config::mongo_conf::MongoConfig;
use crate::handler::fallback_handler::not_found_handler;
use crate::middlewares::cors_middleware::{allow_headers_on_every_response, cors_layer};
use crate::repository::material_repo::MongoMaterialRepository;
use crate::repository::mongo_store::MongoStore;
use crate::repository::quote_repo::MongoQuoteRepository;
use crate::router::material_router::material_router;
use crate::router::quote_router::quote_router;
use crate::service::integrity_guard::MaterialUsageGuard;
use crate::service::material_service::MaterialServiceImpl;
use crate::service::quote_service::QuoteServiceImpl;


pub struct App {
    config: AppConfig,
    router: Router,
    pub material_service: Arc<MaterialServiceImpl>,
    pub quote_service: Arc<QuoteServiceImpl>,
}

/// Full HTTP surface: both resources, health probe, JSON 404 fallback, CORS.
/// `CorsLayer` is outermost so it answers OPTIONS before routing.
pub fn build_router(material_service: Arc<MaterialServiceImpl>, quote_service: Arc<QuoteServiceImpl>) -> Router {
    Router::new()
        .merge(material_router(material_service))
        .merge(quote_router(quote_service))
        .route("/health", get(|| async { "OK" }))
        .fallback(not_found_handler)
        .layer(middleware::from_fn(allow_headers_on_every_response))
        .layer(cors_layer())
}

impl App {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let config = AppConfig::from_env()?;
        let mongo_config = MongoConfig::from_env()?;

        let store = MongoStore::new(&mongo_config).await?;
        store.ping().await?;

        let quote_repo = Arc::new(MongoQuoteRepository::new(&store));
        let material_repo = Arc::new(MongoMaterialRepository::new(&store));
        let usage_guard = MaterialUsageGuard::new(quote_repo.clone());

        let material_service = Arc::new(MaterialServiceImpl::new(material_repo, usage_guard));
        let quote_service = Arc::new(QuoteServiceImpl::new(quote_repo));

        let router = build_router(material_service.clone(), quote_service.clone());
        Ok(App { config, router, material_service, quote_service })
    }

    pub async fn start(self) -> Result<(), Box<dyn std::error::Error>> {
        let addr = SocketAddr::new(self.config.host.parse()?, self.config.port);
        info!("🚀 Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;
        Ok(())
    }
}
