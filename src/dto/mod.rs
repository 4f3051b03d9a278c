pub mod material_dto;
pub mod quote_dto;
