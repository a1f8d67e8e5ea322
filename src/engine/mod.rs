mod location_api;
mod quote_api;

use crate::{
    api::API,
    config::Backend,
    entities::{stations, Location},
};

pub struct Engine {
    backend: Backend,
    locations: Vec<Location>,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub fn new(backend: Backend) -> Self {
        match &backend {
            Backend::Formula => tracing::info!("quoting with the built-in formula"),
            Backend::Script(script) => {
                tracing::info!(program = %script.program, args = ?script.args, "quoting with an external process")
            }
        }

        Self {
            backend,
            locations: stations(),
        }
    }
}

impl API for Engine {}
