use axum::{Router, routing::get};
use crate::handler::fallback_handler::method_not_allowed_handler;
use crate::handler::quote_handler::{
    list_quotes_handler,
    create_quote_handler,
    update_quote_handler,
    delete_quote_handler,
};
use crate::service::quote_service::QuoteServiceImpl;
use std::sync::Arc;

pub fn quote_router(service: Arc<QuoteServiceImpl>) -> Router {
    Router::new()
        .route(
            "/orcamentos",
            get(list_quotes_handler)
                .post(create_quote_handler)
                .put(update_quote_handler)
                .delete(delete_quote_handler)
                .fallback(method_not_allowed_handler),
        )
        .with_state(service)
}
