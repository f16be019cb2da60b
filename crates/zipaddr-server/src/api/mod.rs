mod address;

use axum::{
    http::{header, HeaderName, Method},
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use zipaddr_core::AppConfig;
use zipaddr_lookup::LookupConfig;

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};

/// Shared handler state. Holds only immutable settings; each request
/// builds its own upstream client from them.
#[derive(Clone)]
pub struct AppState {
    pub lookup: LookupConfig,
}

impl AppState {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            lookup: LookupConfig::from_app_config(config),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/address", get(address::show_address))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> Json<ApiResponse<HealthData>> {
    Json(ApiResponse {
        data: HealthData { status: "ok" },
        meta: ResponseMeta::new(req_id.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use std::time::Duration;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_state(base_url: &str) -> AppState {
        AppState {
            lookup: LookupConfig {
                base_url: base_url.to_string(),
                connect_timeout: Duration::from_secs(1),
                read_timeout: Duration::from_millis(500),
                ..LookupConfig::default()
            },
        }
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json = serde_json::from_slice(&body).expect("json parse");
        (status, json)
    }

    #[test]
    fn app_state_takes_lookup_settings_from_config() {
        let config = AppConfig {
            env: zipaddr_core::Environment::Test,
            bind_addr: "127.0.0.1:3000".parse().expect("addr"),
            log_level: "info".to_string(),
            upstream_base_url: "http://127.0.0.1:4567".to_string(),
            connect_timeout_secs: 5,
            read_timeout_secs: 10,
            user_agent: "zipaddr-test".to_string(),
        };
        let state = AppState::from_config(&config);
        assert_eq!(state.lookup.base_url, "http://127.0.0.1:4567");
        assert_eq!(state.lookup.connect_timeout, Duration::from_secs(5));
        assert_eq!(state.lookup.read_timeout, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn health_returns_ok_with_request_id() {
        let app = build_app(test_state("http://127.0.0.1:9"));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .header(REQUEST_ID_HEADER, "req-health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok()),
            Some("req-health")
        );
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json["data"]["status"], "ok");
        assert_eq!(json["meta"]["request_id"], "req-health");
    }

    #[tokio::test]
    async fn address_renders_success_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/search"))
            .and(query_param("zipcode", "1000001"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": null,
                "results": [{
                    "zipcode": "1000001",
                    "address1": "Tokyo",
                    "address2": "Chiyoda",
                    "address3": "Chiyoda"
                }],
                "status": 200
            })))
            .expect(1)
            .mount(&server)
            .await;

        let app = build_app(test_state(&server.uri()));
        let (status, json) = get_json(app, "/address?zipcode=1000001").await;

        assert_eq!(status, StatusCode::OK);
        let data = &json["data"];
        assert_eq!(data["outcome"], "success");
        assert_eq!(data["query"], "zipcode=1000001");
        assert_eq!(data["address"]["postal_code"], "1000001");
        assert_eq!(data["address"]["prefecture"], "Tokyo");
        assert_eq!(data["address"]["city"], "Chiyoda");
        assert_eq!(data["address"]["suburb"], "Chiyoda");
        assert!(data["message"].is_null());
        assert!(json["meta"]["request_id"].is_string());
    }

    #[tokio::test]
    async fn address_forwards_decoded_space_as_plus() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let app = build_app(test_state(&server.uri()));
        let (_, json) = get_json(app, "/address?zipcode=100%200001").await;

        assert_eq!(json["data"]["postal_code"], "100 0001");
        assert_eq!(json["data"]["query"], "zipcode=100+0001");
    }

    #[tokio::test]
    async fn upstream_failure_still_renders_200_with_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/search"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let app = build_app(test_state(&server.uri()));
        let (status, json) = get_json(app, "/address?zipcode=1000001").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["outcome"], "upstream_error");
        assert_eq!(
            json["data"]["message"],
            "HTTP ERROR: code=503 message=Service Unavailable"
        );
        assert!(json["data"]["address"].is_null());
    }

    #[tokio::test]
    async fn missing_zipcode_is_sent_as_empty_value() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/search"))
            .and(query_param("zipcode", ""))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "必須パラメータが指定されていません。",
                "results": null,
                "status": 400
            })))
            .expect(1)
            .mount(&server)
            .await;

        let app = build_app(test_state(&server.uri()));
        let (status, json) = get_json(app, "/address").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["postal_code"], "");
        assert_eq!(json["data"]["outcome"], "transport_error");
        assert!(json["data"]["message"]
            .as_str()
            .is_some_and(|m| m.contains("必須パラメータ")));
    }
}
