pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod entities;
pub mod error;
pub mod external;
pub mod pricing;
pub mod server;
