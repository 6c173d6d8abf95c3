pub mod behaviours;
pub mod lighting;
