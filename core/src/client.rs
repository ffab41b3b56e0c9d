//! Request builder and response parser for the trip planning API.
//!
//! # Design
//! `TripPlannerClient` holds only a `ClientConfig` and carries no mutable
//! state between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest`, a `parse_*` method that consumes an
//! `HttpResponse`, and a `fail_*` method that resolves a `TransportFailure`
//! when no response arrived. The async `ApiClient` runs the round-trip in
//! between.
//!
//! Failure messages are resolved per operation:
//! - trip plan: server `detail` → transport message → fixed fallback
//! - health check: transport message → fixed fallback

use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{FailureKind, HttpMethod, HttpRequest, HttpResponse, TransportFailure};
use crate::types::{ErrorBody, TripFormData, TripPlanResponse};

pub const TRIP_PLAN_PATH: &str = "/api/trip/plan";
pub const HEALTH_PATH: &str = "/health";

pub const TRIP_PLAN_FALLBACK: &str = "Failed to generate trip plan";
pub const HEALTH_CHECK_FALLBACK: &str = "Health check failed";

/// Stateless request builder and response parser for the trip planning API.
#[derive(Debug, Clone)]
pub struct TripPlannerClient {
    config: ClientConfig,
}

impl TripPlannerClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn build_generate_trip_plan(&self, form: &TripFormData) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(form).map_err(|e| ApiError::Request {
            message: e.to_string(),
        })?;
        Ok(self.request(HttpMethod::Post, TRIP_PLAN_PATH, Some(body)))
    }

    pub fn build_health_check(&self) -> HttpRequest {
        self.request(HttpMethod::Get, HEALTH_PATH, None)
    }

    pub fn parse_generate_trip_plan(&self, response: HttpResponse) -> Result<TripPlanResponse, ApiError> {
        if !response.is_success() {
            let message = detail_message(&response.body).unwrap_or_else(|| status_message(response.status));
            return Err(ApiError::Status {
                status: response.status,
                message,
            });
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode {
            message: e.to_string(),
        })
    }

    pub fn parse_health_check(&self, response: HttpResponse) -> Result<Value, ApiError> {
        if !response.is_success() {
            return Err(ApiError::Status {
                status: response.status,
                message: status_message(response.status),
            });
        }
        // An empty 2xx body is still a healthy answer.
        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode {
            message: e.to_string(),
        })
    }

    pub fn fail_generate_trip_plan(&self, failure: TransportFailure) -> ApiError {
        resolve_failure(failure, TRIP_PLAN_FALLBACK)
    }

    pub fn fail_health_check(&self, failure: TransportFailure) -> ApiError {
        resolve_failure(failure, HEALTH_CHECK_FALLBACK)
    }

    fn request(&self, method: HttpMethod, path: &str, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method,
            path: path.to_string(),
            url: format!("{}{path}", self.config.base_url()),
            headers: self.config.default_headers().to_vec(),
            body,
        }
    }
}

/// Message the transport reports for a non-2xx status.
pub fn status_message(status: u16) -> String {
    format!("Request failed with status code {status}")
}

fn resolve_failure(failure: TransportFailure, fallback: &str) -> ApiError {
    let message = non_empty(failure.message).unwrap_or_else(|| fallback.to_string());
    match failure.kind {
        FailureKind::Timeout => ApiError::Timeout { message },
        FailureKind::Network => ApiError::Network { message },
    }
}

/// Pull a usable `detail` out of an error body. Non-string details (e.g.
/// validation error lists) are rendered as compact JSON.
fn detail_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        Value::Null => None,
        Value::String(s) => non_empty(s),
        other => Some(other.to_string()),
    }
}

fn non_empty(message: String) -> Option<String> {
    if message.is_empty() {
        None
    } else {
        Some(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TripPlannerClient {
        TripPlannerClient::new(ClientConfig::new("http://localhost:8000"))
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    fn form() -> TripFormData {
        TripFormData {
            city: "Beijing".to_string(),
            start_date: "2025-06-01".to_string(),
            end_date: "2025-06-02".to_string(),
            travel_days: 2,
            transportation: "public".to_string(),
            accommodation: "hotel".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn build_generate_trip_plan_produces_correct_request() {
        let req = client().build_generate_trip_plan(&form()).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "/api/trip/plan");
        assert_eq!(req.url, "http://localhost:8000/api/trip/plan");
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["city"], "Beijing");
        assert_eq!(body["travel_days"], 2);
    }

    #[test]
    fn build_health_check_produces_correct_request() {
        let req = client().build_health_check();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:8000/health");
        assert!(req.body.is_none());
        assert_eq!(req.header("content-type"), Some("application/json"));
    }

    #[test]
    fn parse_trip_plan_success() {
        let body = concat!(
            r#"{"success":true,"message":"ok","data":{"city":"Beijing","#,
            r#""start_date":"2025-06-01","end_date":"2025-06-01","#,
            r#""days":[],"weather_info":[],"overall_suggestions":"go"}}"#,
        );
        let response = client().parse_generate_trip_plan(response(200, body)).unwrap();
        assert!(response.success());
        assert_eq!(response.plan().unwrap().unwrap().overall_suggestions, "go");
    }

    #[test]
    fn parse_trip_plan_uses_server_detail() {
        let err = client()
            .parse_generate_trip_plan(response(500, r#"{"detail":"X"}"#))
            .unwrap_err();
        assert_eq!(err.to_string(), "X");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn parse_trip_plan_without_detail_uses_status_message() {
        let err = client()
            .parse_generate_trip_plan(response(422, "Failed to deserialize the JSON body"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Request failed with status code 422");
    }

    #[test]
    fn parse_trip_plan_empty_detail_is_ignored() {
        let err = client()
            .parse_generate_trip_plan(response(400, r#"{"detail":""}"#))
            .unwrap_err();
        assert_eq!(err.to_string(), "Request failed with status code 400");
    }

    #[test]
    fn parse_trip_plan_structured_detail_is_rendered() {
        let err = client()
            .parse_generate_trip_plan(response(422, r#"{"detail":[{"loc":["body","city"]}]}"#))
            .unwrap_err();
        assert_eq!(err.to_string(), r#"[{"loc":["body","city"]}]"#);
    }

    #[test]
    fn parse_trip_plan_bad_json() {
        let err = client().parse_generate_trip_plan(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[test]
    fn health_check_ignores_detail() {
        let err = client()
            .parse_health_check(response(503, r#"{"detail":"Service unavailable"}"#))
            .unwrap_err();
        assert_eq!(err.to_string(), "Request failed with status code 503");
    }

    #[test]
    fn health_check_empty_body_is_null() {
        let value = client().parse_health_check(response(200, "")).unwrap();
        assert!(value.is_null());
    }

    #[test]
    fn network_failure_keeps_transport_message() {
        let err = client().fail_generate_trip_plan(TransportFailure::network("Network Error"));
        assert_eq!(err, ApiError::Network { message: "Network Error".to_string() });
    }

    #[test]
    fn silent_failure_uses_fallback() {
        let err = client().fail_generate_trip_plan(TransportFailure::network(""));
        assert_eq!(err.to_string(), TRIP_PLAN_FALLBACK);
        let err = client().fail_health_check(TransportFailure::timeout(""));
        assert_eq!(err.to_string(), HEALTH_CHECK_FALLBACK);
        assert!(err.is_timeout());
    }
}
