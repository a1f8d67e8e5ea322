pub mod predict;
pub mod quote;
pub mod serve;
pub mod stations;
