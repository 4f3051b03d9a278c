pub mod material_router;
pub mod quote_router;
