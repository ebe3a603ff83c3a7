//! Integration tests for `GET /market-data`
//!
//! Each test stands up a mock CoinGecko with wiremock and drives the full
//! router, middleware included.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::{
    matchers::{header as header_matcher, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use wolvcapital_web::{create_router, AppState, Config};

fn app_for(upstream: &MockServer) -> Router {
    app_with(Config {
        coingecko_base_url: upstream.uri(),
        upstream_timeout_secs: 2,
        ..Config::default()
    })
}

fn app_with(config: Config) -> Router {
    create_router(AppState::new(config).expect("state"))
}

async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn sample_markets() -> Value {
    json!([
        {
            "id": "bitcoin",
            "symbol": "btc",
            "current_price": 67012.5,
            "price_change_percentage_24h_in_currency": 1.42,
            "sparkline_in_7d": { "price": [66000.1, 66500.2, 67012.5] }
        },
        {
            "id": "ethereum",
            "symbol": "eth",
            "current_price": 3120.77,
            "price_change_percentage_24h_in_currency": -0.35,
            "sparkline_in_7d": { "price": [3150.0, 3100.4, 3120.77] }
        }
    ])
}

#[tokio::test]
async fn test_success_relays_payload_with_cache_headers() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/markets"))
        .and(query_param("vs_currency", "usd"))
        .and(query_param("ids", "bitcoin,ethereum"))
        .and(query_param("sparkline", "true"))
        .and(query_param("price_change_percentage", "24h"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_markets()))
        .expect(1)
        .mount(&upstream)
        .await;

    let response = get(app_for(&upstream), "/market-data").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "public, max-age=30, s-maxage=60"
    );
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    assert_eq!(body_json(response).await, sample_markets());
}

#[tokio::test]
async fn test_only_allow_listed_ids_reach_upstream() {
    let upstream = MockServer::start().await;
    Mock::given(path("/coins/markets"))
        .and(query_param("ids", "bitcoin,ethereum,solana,binancecoin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&upstream)
        .await;

    let response = get(
        app_for(&upstream),
        "/market-data?ids=DOGE,bitcoin,ethereum,solana,binancecoin",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_repeated_ids_parameters_are_merged() {
    let upstream = MockServer::start().await;
    Mock::given(path("/coins/markets"))
        .and(query_param("ids", "bitcoin,solana"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&upstream)
        .await;

    let response = get(app_for(&upstream), "/market-data?ids=bitcoin&ids=solana").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_invalid_ids_fall_back_to_default_pair() {
    let upstream = MockServer::start().await;
    Mock::given(path("/coins/markets"))
        .and(query_param("ids", "bitcoin,ethereum"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&upstream)
        .await;

    let response = get(app_for(&upstream), "/market-data?ids=dogecoin,shiba").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_upstream_error_status_becomes_bad_gateway() {
    let upstream = MockServer::start().await;
    let body = format!("{{\"status\":{{\"error_message\":\"{}\"}}}}", "boom ".repeat(100));
    Mock::given(path("/coins/markets"))
        .respond_with(ResponseTemplate::new(500).set_body_string(body))
        .expect(1)
        .mount(&upstream)
        .await;

    let response = get(app_for(&upstream), "/market-data?ids=solana").await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(response.headers().get(header::CACHE_CONTROL).is_none());

    let json = body_json(response).await;
    assert_eq!(json["error"], "Failed to fetch market data");
    assert_eq!(json["provider"], "coingecko");
    assert_eq!(json["status"], 500);
    assert_eq!(json["ids"], "solana");

    let preview = json["bodyPreview"].as_str().unwrap();
    assert!(preview.chars().count() <= 200);
    assert!(preview.starts_with("{\"status\""));
}

#[tokio::test]
async fn test_rate_limited_upstream_reports_status() {
    let upstream = MockServer::start().await;
    Mock::given(path("/coins/markets"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Throttled"))
        .mount(&upstream)
        .await;

    let response = get(app_for(&upstream), "/market-data").await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["status"], 429);
    assert_eq!(json["bodyPreview"], "Throttled");
    assert_eq!(json["ids"], "bitcoin,ethereum");
}

#[tokio::test]
async fn test_non_json_success_body_is_transport_failure() {
    let upstream = MockServer::start().await;
    Mock::given(path("/coins/markets"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&upstream)
        .await;

    let response = get(app_for(&upstream), "/market-data?ids=ethereum").await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Market data request failed");
    assert_eq!(json["ids"], "ethereum");
    assert!(json["message"]
        .as_str()
        .unwrap()
        .starts_with("invalid upstream JSON"));
    assert!(json.get("status").is_none());
}

#[tokio::test]
async fn test_upstream_timeout_is_transport_failure() {
    let upstream = MockServer::start().await;
    Mock::given(path("/coins/markets"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(std::time::Duration::from_secs(5)),
        )
        .mount(&upstream)
        .await;

    let app = app_with(Config {
        coingecko_base_url: upstream.uri(),
        upstream_timeout_secs: 1,
        ..Config::default()
    });
    let response = get(app, "/market-data").await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["provider"], "coingecko");
    assert_eq!(json["ids"], "bitcoin,ethereum");
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn test_api_key_and_cache_directive_are_sent() {
    let upstream = MockServer::start().await;
    Mock::given(path("/coins/markets"))
        .and(header_matcher("x-cg-demo-api-key", "demo-key"))
        .and(header_matcher("cache-control", "max-age=60"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = app_with(Config {
        coingecko_base_url: upstream.uri(),
        coingecko_api_key: Some("demo-key".to_string()),
        upstream_timeout_secs: 2,
        ..Config::default()
    });
    let response = get(app, "/market-data").await;

    assert_eq!(response.status(), StatusCode::OK);
}
