//! Client for the trip planning backend.
//!
//! # Overview
//! Two operations, `generate_trip_plan` (`POST /api/trip/plan`) and
//! `health_check` (`GET /health`), exposed by the async [`ApiClient`]. Every
//! failure comes back as an [`ApiError`] whose `Display` is one
//! human-readable message.
//!
//! # Design
//! - [`ClientConfig`] resolves the base URL (`API_BASE_URL` or
//!   `http://localhost:8000`), the 120 s timeout and the JSON header once.
//! - [`TripPlannerClient`] builds requests and parses responses as plain
//!   data, with no I/O; the error-message rules live there.
//! - [`ApiClient`] performs the round-trip with reqwest and reports each step
//!   to an injected [`Interceptor`] ([`TracingInterceptor`] by default).
//! - Nothing is retried and no call mutates shared state.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod interceptor;
pub mod serde_util;
pub mod types;

pub use api::ApiClient;
pub use client::TripPlannerClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{FailureKind, HttpMethod, HttpRequest, HttpResponse, TransportFailure};
pub use interceptor::{Interceptor, LogRecord, RecordingInterceptor, TracingInterceptor};
pub use types::{
    Attraction, Budget, DayPlan, Hotel, Location, Meal, TripFormData, TripPlan, TripPlanResponse, WeatherInfo,
};
