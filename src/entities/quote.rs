use serde::{Deserialize, Serialize};

pub const DEFAULT_LOCATION_FACTOR: f64 = 1.2;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub source: String,
    pub destination: String,
    pub distance: f64,
    pub weight: f64,
    pub source_factor: f64,
    pub dest_factor: f64,
}

impl QuoteRequest {
    pub fn new(source: &str, destination: &str, distance: f64, weight: f64) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            distance,
            weight,
            source_factor: DEFAULT_LOCATION_FACTOR,
            dest_factor: DEFAULT_LOCATION_FACTOR,
        }
    }

    pub fn with_factors(mut self, source_factor: f64, dest_factor: f64) -> Self {
        self.source_factor = source_factor;
        self.dest_factor = dest_factor;
        self
    }

    /// Mean of the two station cost factors.
    pub fn location_factor(&self) -> f64 {
        (self.source_factor + self.dest_factor) / 2.0
    }
}

/// A price in crore.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub price: f64,
}

impl Quote {
    pub fn new(price: f64) -> Self {
        Self { price }
    }
}

#[test]
fn quote_request_wire_format_test() {
    let request: QuoteRequest = serde_json::from_value(serde_json::json!({
        "source": "KYN",
        "destination": "NGSM",
        "distance": 382,
        "weight": 1374,
        "sourceFactor": 1.2,
        "destFactor": 1.1,
    }))
    .unwrap();

    assert_eq!(
        request,
        QuoteRequest::new("KYN", "NGSM", 382.0, 1374.0).with_factors(1.2, 1.1)
    );
}

#[test]
fn location_factor_test() {
    let request = QuoteRequest::new("DHI", "JL", 10.0, 10.0).with_factors(1.4, 1.0);
    assert_eq!(request.location_factor(), 1.2);
}
