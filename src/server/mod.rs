mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header::HeaderName, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

pub use crate::api::DynAPI;
use crate::api::API;
use crate::error::{unexpected_error, Error};
use crate::server::handlers::{locations, predict};

const ALLOWED_HEADERS: [&str; 9] = [
    "x-csrf-token",
    "x-requested-with",
    "accept",
    "accept-version",
    "content-length",
    "content-md5",
    "content-type",
    "date",
    "x-api-version",
];

pub fn router(api: DynAPI) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::OPTIONS,
            Method::PATCH,
            Method::DELETE,
            Method::POST,
            Method::PUT,
        ])
        .allow_headers(ALLOWED_HEADERS.map(HeaderName::from_static));

    Router::new()
        .route(
            "/api/predict-price",
            post(predict::create)
                .get(predict::method_not_allowed)
                .put(predict::method_not_allowed)
                .patch(predict::method_not_allowed)
                .delete(predict::method_not_allowed)
                .options(predict::preflight),
        )
        .route("/api/locations", get(locations::list))
        .route("/api/locations/:id", get(locations::find))
        .layer(Extension(api))
        .layer(cors)
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) -> Result<(), Error> {
    let api = Arc::new(api) as DynAPI;
    let app = router(api);

    let server = axum::Server::try_bind(&addr)
        .map_err(|err| unexpected_error().with_detail(format!("cannot bind {}: {}", addr, err)))?;

    tracing::info!("listening on {}", addr);

    server
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| unexpected_error().with_detail(err.to_string()))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }

    tracing::info!("shutting down");
}

#[cfg(test)]
fn test_request(
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (axum::http::StatusCode, serde_json::Value) {
    use crate::config::Backend;
    use crate::engine::Engine;
    use axum::body::Body;
    use axum::http::Request;
    use tokio_test::block_on;
    use tower::ServiceExt;

    let app = router(Arc::new(Engine::new(Backend::Formula)) as DynAPI);

    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => request.body(Body::from(body.to_string())).unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    block_on(async {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    })
}

#[test]
fn predict_price_route_test() {
    use axum::http::StatusCode;
    use serde_json::json;

    let (status, body) = test_request(
        Method::POST,
        "/api/predict-price",
        Some(json!({
            "source": "KYN",
            "destination": "NGSM",
            "distance": 382,
            "weight": 1374,
            "sourceFactor": 1.2,
            "destFactor": 1.1,
        })),
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "price": 0.0853 }));

    let (status, body) = test_request(
        Method::POST,
        "/api/predict-price",
        Some(json!({
            "source": "DHI",
            "destination": "JL",
            "distance": "382",
            "weight": "1374",
            "sourceFactor": 1.0,
            "destFactor": 1.0,
        })),
    );
    assert_eq!(status, StatusCode::OK);
    let price = body["price"].as_f64().unwrap();
    assert!((price - 0.0853).abs() < 1e-15);
}

#[test]
fn predict_price_validation_test() {
    use axum::http::StatusCode;
    use serde_json::json;

    let (status, body) = test_request(
        Method::POST,
        "/api/predict-price",
        Some(json!({ "source": "KYN", "destination": "NGSM", "distance": 382 })),
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "error": "Missing required parameters",
            "required": ["source", "destination", "distance", "weight"],
        })
    );

    let (status, body) = test_request(
        Method::POST,
        "/api/predict-price",
        Some(json!({ "source": "KYN", "destination": "NGSM", "distance": -5, "weight": 10 })),
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "error": "Distance and weight must be positive numbers" })
    );

    let (status, body) = test_request(
        Method::POST,
        "/api/predict-price",
        Some(json!({
            "source": "KYN",
            "destination": "NGSM",
            "distance": 5,
            "weight": 10,
            "sourceFactor": -1,
        })),
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Location factors must be positive numbers" }));

    let (status, _) = test_request(Method::POST, "/api/predict-price", None);
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[test]
fn predict_price_failure_test() {
    use axum::http::StatusCode;
    use serde_json::json;

    let (status, body) = test_request(
        Method::POST,
        "/api/predict-price",
        Some(json!({
            "source": "DHI",
            "destination": "JL",
            "distance": 10,
            "weight": 10,
            "sourceFactor": 1e308,
            "destFactor": 1e308,
        })),
    );
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
    assert!(body["message"].is_string());
}

#[test]
fn predict_price_method_test() {
    use axum::http::StatusCode;
    use serde_json::json;

    for method in [Method::GET, Method::PUT, Method::PATCH, Method::DELETE] {
        let (status, body) = test_request(method, "/api/predict-price", None);
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, json!({ "error": "Method not allowed, use POST" }));
    }

    let (status, _) = test_request(Method::OPTIONS, "/api/predict-price", None);
    assert_eq!(status, StatusCode::OK);
}

#[test]
fn cors_preflight_test() {
    use crate::config::Backend;
    use crate::engine::Engine;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tokio_test::block_on;
    use tower::ServiceExt;

    let app = router(Arc::new(Engine::new(Backend::Formula)) as DynAPI);
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/predict-price")
        .header("origin", "https://example.com")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = block_on(app.oneshot(request)).unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}

#[test]
fn locations_route_test() {
    use axum::http::StatusCode;

    let (status, body) = test_request(Method::GET, "/api/locations", None);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 40);

    let (status, body) = test_request(Method::GET, "/api/locations/KYN", None);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Kalyan");
    assert_eq!(body["costFactor"], 1.2);

    let (status, body) = test_request(Method::GET, "/api/locations/NOPE", None);
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "location not found");
}
