use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::{Location, Quote, QuoteRequest};
use crate::error::Error;

#[async_trait]
pub trait QuoteAPI {
    async fn predict_price(&self, request: QuoteRequest) -> Result<Quote, Error>;
}

#[async_trait]
pub trait LocationAPI {
    async fn list_locations(&self) -> Result<Vec<Location>, Error>;
    async fn find_location(&self, id: &str) -> Result<Location, Error>;
    fn is_valid_location_pair(&self, source_id: &str, destination_id: &str) -> bool;
}

pub trait API: QuoteAPI + LocationAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
