pub mod predict_client;
pub mod predict_script;
