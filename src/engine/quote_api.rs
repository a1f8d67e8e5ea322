use super::Engine;

use async_trait::async_trait;

use crate::{
    api::QuoteAPI,
    config::Backend,
    entities::{Quote, QuoteRequest},
    error::Error,
    pricing,
};

#[async_trait]
impl QuoteAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn predict_price(&self, request: QuoteRequest) -> Result<Quote, Error> {
        let price = match &self.backend {
            Backend::Formula => pricing::predict_price(&request)?,
            Backend::Script(script) => script.predict(&request).await?,
        };

        tracing::debug!(price, "quoted");

        Ok(Quote::new(price))
    }
}

#[test]
fn formula_backend_test() {
    use tokio_test::block_on;

    let engine = Engine::new(Backend::Formula);

    let quote = block_on(engine.predict_price(QuoteRequest::new("KYN", "NGSM", 382.0, 1374.0)))
        .unwrap();
    assert_eq!(quote.price, 0.0853);

    let request = QuoteRequest::new("DHI", "JL", 1500.0, 60.0).with_factors(1.4, 1.15);
    let quote = block_on(engine.predict_price(request.clone())).unwrap();
    assert_eq!(quote.price, pricing::predict_price(&request).unwrap());
}

#[cfg(unix)]
#[test]
fn script_backend_test() {
    use crate::external::predict_script::PredictScript;
    use tokio_test::block_on;

    let script = PredictScript::new(
        "sh",
        vec!["-c".to_string(), "echo 0.42".to_string(), "sh".to_string()],
    );
    let engine = Engine::new(Backend::Script(script));

    let quote = block_on(engine.predict_price(QuoteRequest::new("DHI", "JL", 10.0, 10.0))).unwrap();
    assert_eq!(quote.price, 0.42);
}
