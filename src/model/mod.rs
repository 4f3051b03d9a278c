pub mod material;
pub mod quote;
