pub mod layer;
pub mod types;
