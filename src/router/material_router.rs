use axum::{Router, routing::get};
use crate::handler::fallback_handler::method_not_allowed_handler;
use crate::handler::material_handler::{
    list_materials_handler,
    create_material_handler,
    update_material_handler,
    delete_material_handler,
};
use crate::service::material_service::MaterialServiceImpl;
use std::sync::Arc;

pub fn material_router(service: Arc<MaterialServiceImpl>) -> Router {
    Router::new()
        .route(
            "/produtos",
            get(list_materials_handler)
                .post(create_material_handler)
                .put(update_material_handler)
                .delete(delete_material_handler)
                .fallback(method_not_allowed_handler),
        )
        .with_state(service)
}
