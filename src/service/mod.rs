pub mod integrity_guard;
pub mod material_service;
pub mod quote_service;
