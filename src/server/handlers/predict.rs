use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Json};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use crate::api::QuoteAPI;
use crate::entities::{Quote, QuoteRequest, DEFAULT_LOCATION_FACTOR};
use crate::error::{
    method_not_allowed_error, missing_parameters_error, non_positive_factor_error,
    non_positive_quantity_error, Error,
};
use crate::pricing::js_number_string;
use crate::server::DynAPI;

/// Body of `POST /api/predict-price`. Numbers may arrive as JSON numbers or
/// as numeric strings.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictParams {
    source: Option<Value>,
    destination: Option<Value>,
    distance: Option<Value>,
    weight: Option<Value>,
    source_factor: Option<Value>,
    dest_factor: Option<Value>,
}

impl PredictParams {
    pub fn validate(self) -> Result<QuoteRequest, Error> {
        let source = required(self.source)?;
        let destination = required(self.destination)?;
        let distance = required(self.distance)?;
        let weight = required(self.weight)?;

        let distance = positive(&distance).ok_or_else(non_positive_quantity_error)?;
        let weight = positive(&weight).ok_or_else(non_positive_quantity_error)?;

        let source_factor = factor(self.source_factor)?;
        let dest_factor = factor(self.dest_factor)?;

        Ok(
            QuoteRequest::new(&text(&source), &text(&destination), distance, weight)
                .with_factors(source_factor, dest_factor),
        )
    }
}

#[axum_macros::debug_handler]
pub async fn create(
    Extension(api): Extension<DynAPI>,
    params: Result<Json<PredictParams>, JsonRejection>,
) -> Result<Json<Quote>, Error> {
    let request_id = Uuid::new_v4();

    let Json(params) = params.map_err(|rejection| {
        tracing::debug!(%request_id, %rejection, "unreadable request body");
        missing_parameters_error()
    })?;
    let request = params.validate()?;

    let span = tracing::info_span!(
        "predict_price",
        %request_id,
        source = %request.source,
        destination = %request.destination,
    );

    let quote = api
        .predict_price(request)
        .instrument(span)
        .await
        .map_err(|err| {
            if err.is_client_error() {
                tracing::debug!(%request_id, error = %err, "rejected price request");
            } else {
                tracing::error!(%request_id, error = %err, "error predicting price");
            }
            err
        })?;

    Ok(quote.into())
}

pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> Error {
    method_not_allowed_error()
}

fn required(value: Option<Value>) -> Result<Value, Error> {
    match value {
        Some(value) if !is_falsy(&value) => Ok(value),
        _ => Err(missing_parameters_error()),
    }
}

fn factor(value: Option<Value>) -> Result<f64, Error> {
    match value {
        Some(value) => positive(&value).ok_or_else(non_positive_factor_error),
        None => Ok(DEFAULT_LOCATION_FACTOR),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n
            .as_f64()
            .map(js_number_string)
            .unwrap_or_else(|| n.to_string()),
        other => other.to_string(),
    }
}

fn positive(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float(s),
        _ => None,
    }?;

    (number.is_finite() && number > 0.0).then_some(number)
}

/// Parses the longest leading decimal literal, ignoring trailing garbage
/// ("12.5 km" is 12.5).
fn parse_float(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let digits_at = |mut at: usize| {
        while at < bytes.len() && bytes[at].is_ascii_digit() {
            at += 1;
        }
        at
    };

    let mut end = match bytes.first() {
        Some(b'+') | Some(b'-') => 1,
        _ => 0,
    };
    let integer_end = digits_at(end);
    let mut mantissa_digits = integer_end - end;
    end = integer_end;

    if bytes.get(end) == Some(&b'.') {
        let fraction_end = digits_at(end + 1);
        mantissa_digits += fraction_end - end - 1;
        if mantissa_digits > 0 {
            end = fraction_end;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+') | Some(b'-')) {
            exponent += 1;
        }
        let exponent_end = digits_at(exponent);
        if exponent_end > exponent {
            end = exponent_end;
        }
    }

    s[..end].parse().ok()
}

#[test]
fn parse_float_test() {
    assert_eq!(parse_float("382"), Some(382.0));
    assert_eq!(parse_float("  12.5 km"), Some(12.5));
    assert_eq!(parse_float("-5"), Some(-5.0));
    assert_eq!(parse_float(".5"), Some(0.5));
    assert_eq!(parse_float("5."), Some(5.0));
    assert_eq!(parse_float("1e3"), Some(1000.0));
    assert_eq!(parse_float("2e"), Some(2.0));
    assert_eq!(parse_float("abc"), None);
    assert_eq!(parse_float("."), None);
    assert_eq!(parse_float(""), None);
}

#[test]
fn validate_test() {
    use serde_json::json;

    let params: PredictParams = serde_json::from_value(json!({
        "source": "KYN",
        "destination": "NGSM",
        "distance": "382",
        "weight": 1374,
    }))
    .unwrap();
    assert_eq!(
        params.validate().unwrap(),
        QuoteRequest::new("KYN", "NGSM", 382.0, 1374.0)
    );

    let params: PredictParams = serde_json::from_value(json!({
        "source": "DHI",
        "destination": "JL",
        "distance": 10,
        "weight": 2,
        "sourceFactor": "1.4",
        "destFactor": null,
    }))
    .unwrap();
    assert_eq!(
        params.validate().unwrap(),
        QuoteRequest::new("DHI", "JL", 10.0, 2.0).with_factors(1.4, 1.2)
    );
}

#[test]
fn validate_rejects_test() {
    use serde_json::json;

    let cases = [
        (json!({"source": "A", "destination": "B", "distance": 10}), 101),
        (json!({"source": "", "destination": "B", "distance": 10, "weight": 1}), 101),
        (json!({"source": "A", "destination": "B", "distance": 0, "weight": 1}), 101),
        (json!({"source": "A", "destination": "B", "distance": -5, "weight": 1}), 102),
        (json!({"source": "A", "destination": "B", "distance": "x", "weight": 1}), 102),
        (json!({"source": "A", "destination": "B", "distance": 5, "weight": true}), 102),
        (json!({"source": "A", "destination": "B", "distance": 5, "weight": 1, "destFactor": 0}), 103),
        (json!({"source": "A", "destination": "B", "distance": 5, "weight": 1, "sourceFactor": "-1"}), 103),
    ];

    for (body, code) in cases {
        let params: PredictParams = serde_json::from_value(body).unwrap();
        assert_eq!(params.validate().unwrap_err().code, code);
    }
}
