pub mod locations;
pub mod predict;
