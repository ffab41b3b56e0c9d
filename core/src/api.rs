//! Async client for the trip planning backend.
//!
//! # Design
//! `ApiClient` owns one `reqwest::Client` (connection pool + timeout), the
//! stateless `TripPlannerClient` and an injected `Interceptor`. Each call
//! builds an `HttpRequest`, sends it exactly once and hands the response or
//! transport failure back to the matching `parse_*` / `fail_*` method. None
//! of the three parts is mutated by a call, so one `ApiClient` can serve any
//! number of concurrent calls.

use std::sync::Arc;

use serde_json::Value;

use crate::client::{status_message, TripPlannerClient};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, TransportFailure};
use crate::interceptor::{Interceptor, TracingInterceptor};
use crate::types::{TripFormData, TripPlanResponse};

/// Result of sending one request.
enum Exchange {
    Response(HttpResponse),
    Failed(TransportFailure),
}

/// Async facade over the trip planning API.
#[derive(Clone)]
pub struct ApiClient {
    planner: TripPlannerClient,
    http: reqwest::Client,
    interceptor: Arc<dyn Interceptor>,
}

impl ApiClient {
    /// Build a client that logs through `tracing`.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        Self::with_interceptor(config, Arc::new(TracingInterceptor))
    }

    pub fn with_interceptor(config: ClientConfig, interceptor: Arc<dyn Interceptor>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Request {
                message: e.to_string(),
            })?;
        Ok(Self {
            planner: TripPlannerClient::new(config),
            http,
            interceptor,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        self.planner.config()
    }

    /// `POST /api/trip/plan` with `form` as the JSON body.
    pub async fn generate_trip_plan(&self, form: &TripFormData) -> Result<TripPlanResponse, ApiError> {
        let request = self
            .planner
            .build_generate_trip_plan(form)
            .inspect_err(|e| self.interceptor.on_request_error(e))?;
        let result = match self.send(&request).await? {
            Exchange::Response(response) => self.planner.parse_generate_trip_plan(response),
            Exchange::Failed(failure) => Err(self.planner.fail_generate_trip_plan(failure)),
        };
        if let Err(e) = &result {
            tracing::debug!(city = %form.city, status = ?e.status(), error = %e, "trip plan request failed");
        }
        result
    }

    /// `GET /health`; the body is returned as untyped JSON.
    pub async fn health_check(&self) -> Result<Value, ApiError> {
        let request = self.planner.build_health_check();
        match self.send(&request).await? {
            Exchange::Response(response) => self.planner.parse_health_check(response),
            Exchange::Failed(failure) => Err(self.planner.fail_health_check(failure)),
        }
    }

    async fn send(&self, request: &HttpRequest) -> Result<Exchange, ApiError> {
        let outgoing = self
            .to_reqwest(request)
            .inspect_err(|e| self.interceptor.on_request_error(e))?;
        self.interceptor.on_request(request);

        let response = match self.http.execute(outgoing).await {
            Ok(response) => response,
            Err(e) => return Ok(self.failed(e, None)),
        };

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();
        let success = (200..300).contains(&status);
        let body = match response.text().await {
            Ok(body) => body,
            // A truncated error body only loses the `detail`.
            Err(e) if !success => {
                tracing::debug!(status, error = %e, "error response body unreadable");
                String::new()
            }
            Err(e) => return Ok(self.failed(e, Some(status))),
        };

        if success {
            self.interceptor.on_response(status, &request.path);
        } else {
            self.interceptor.on_response_error(Some(status), &status_message(status));
        }
        Ok(Exchange::Response(HttpResponse { status, headers, body }))
    }

    fn to_reqwest(&self, request: &HttpRequest) -> Result<reqwest::Request, ApiError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        };
        let mut builder = self.http.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }
        builder.build().map_err(|e| ApiError::Request {
            message: e.to_string(),
        })
    }

    /// `status` is set when the headers arrived but the body did not.
    fn failed(&self, error: reqwest::Error, status: Option<u16>) -> Exchange {
        let failure = if error.is_timeout() {
            let millis = self.config().timeout().as_millis();
            TransportFailure::timeout(format!("timeout of {millis}ms exceeded"))
        } else {
            TransportFailure::network(error.to_string())
        };
        self.interceptor.on_response_error(status, &failure.message);
        Exchange::Failed(failure)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config().base_url())
            .field("timeout", &self.config().timeout())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interceptor::{LogRecord, RecordingInterceptor};

    #[tokio::test]
    async fn invalid_base_url_is_a_request_error() {
        let recorder = Arc::new(RecordingInterceptor::new());
        let client = ApiClient::with_interceptor(ClientConfig::new("not a url"), recorder.clone()).unwrap();

        let err = client.health_check().await.unwrap_err();

        assert!(matches!(err, ApiError::Request { .. }));
        let records = recorder.records();
        assert_eq!(records.len(), 1);
        assert!(matches!(&records[0], LogRecord::RequestError { message } if *message == err.to_string()));
    }

    #[test]
    fn debug_shows_target() {
        let client = ApiClient::new(ClientConfig::new("http://trips.local")).unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("http://trips.local"));
    }
}
