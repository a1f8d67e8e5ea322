use crate::{
    entities::{Location, Quote, QuoteRequest},
    error::{upstream_error, Error},
    pricing::{fallback_rupees, to_rupees, Jitter},
};

/// Client-side quoting against a remote `/api/predict-price`.
#[derive(Clone, Debug)]
pub struct PredictClient {
    base_url: String,
    http: reqwest::Client,
    fallback_jitter: Jitter,
}

impl PredictClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').into(),
            http: reqwest::Client::new(),
            fallback_jitter: Jitter::Random,
        }
    }

    /// Jitter used when the remote quote is unavailable.
    pub fn with_fallback_jitter(mut self, jitter: Jitter) -> Self {
        self.fallback_jitter = jitter;
        self
    }

    #[tracing::instrument(skip(self))]
    pub async fn predict(&self, request: &QuoteRequest) -> Result<Quote, Error> {
        let url = format!("{}/api/predict-price", self.base_url);

        let res = self
            .http
            .post(url)
            .json(request)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(upstream_error().with_detail(format!("status {}", status)));
        }

        let quote: Quote = res.json().await?;
        if !quote.price.is_finite() {
            return Err(upstream_error().with_detail("non-finite price"));
        }

        Ok(quote)
    }

    /// Quotes a price in whole rupees between two stations, falling back to
    /// the local linear formula when the remote quote fails.
    #[tracing::instrument(skip(self, source, destination), fields(source = %source.id, destination = %destination.id))]
    pub async fn quote_rupees(
        &self,
        source: &Location,
        destination: &Location,
        distance: f64,
        weight: f64,
    ) -> Result<i64, Error> {
        let request = QuoteRequest::new(&source.id, &destination.id, distance, weight)
            .with_factors(source.cost_factor, destination.cost_factor);

        match self.predict(&request).await {
            Ok(quote) => Ok(to_rupees(quote.price)),
            Err(err) => {
                tracing::warn!(error = %err, "remote prediction failed, using local estimate");
                fallback_rupees(&request, self.fallback_jitter)
            }
        }
    }
}

#[test]
fn unreachable_remote_falls_back_test() {
    use tokio_test::block_on;

    // nothing listens on the discard port
    let client = PredictClient::new("http://127.0.0.1:9/").with_fallback_jitter(Jitter::Hashed);

    let source = Location::new("A", "Alpha", "Test", 1.0);
    let destination = Location::new("B", "Beta", "Test", 1.0);

    let rupees = block_on(client.quote_rupees(&source, &destination, 100.0, 5.0)).unwrap();
    assert_eq!(rupees, 10300);
}

#[test]
fn remote_quote_test() {
    use std::net::{SocketAddr, TcpListener};
    use std::sync::Arc;
    use tokio_test::block_on;

    use crate::api::DynAPI;
    use crate::config::Backend;
    use crate::engine::Engine;
    use crate::server::router;

    block_on(async {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();

        let api = Arc::new(Engine::new(Backend::Formula)) as DynAPI;
        let server = axum::Server::from_tcp(listener)
            .unwrap()
            .serve(router(api).into_make_service());
        tokio::spawn(server);

        let client = PredictClient::new(&format!("http://{}", addr));
        let kalyan = Location::new("KYN", "Kalyan", "Maharashtra", 1.2);
        let nagasamudram = Location::new("NGSM", "Nagasamudram", "Andhra Pradesh", 1.1);

        let rupees = client
            .quote_rupees(&kalyan, &nagasamudram, 382.0, 1374.0)
            .await
            .unwrap();
        assert_eq!(rupees, 853000);
    });
}

#[test]
fn any_success_status_test() {
    use axum::http::StatusCode;
    use axum::{routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::net::{SocketAddr, TcpListener};
    use tokio_test::block_on;

    // answers 201 and echoes the distance as the price once the body matches
    async fn created(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        let expected = json!({
            "source": "DHI",
            "destination": "JL",
            "distance": 0.25,
            "weight": 4.0,
            "sourceFactor": 1.4,
            "destFactor": 1.15,
        });
        if body != expected {
            return (StatusCode::BAD_REQUEST, Json(json!({ "error": "unexpected body" })));
        }

        (StatusCode::CREATED, Json(json!({ "price": body["distance"] })))
    }

    block_on(async {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();

        let app = Router::new().route("/api/predict-price", post(created));
        let server = axum::Server::from_tcp(listener)
            .unwrap()
            .serve(app.into_make_service());
        tokio::spawn(server);

        let client = PredictClient::new(&format!("http://{}", addr));
        let request = QuoteRequest::new("DHI", "JL", 0.25, 4.0).with_factors(1.4, 1.15);

        let quote = client.predict(&request).await.unwrap();
        assert_eq!(quote.price, 0.25);
    });
}
