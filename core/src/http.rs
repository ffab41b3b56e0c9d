//! HTTP exchange types for the trip planner client.
//!
//! # Design
//! Requests, responses and transport failures are plain data. The
//! `TripPlannerClient` builds `HttpRequest` values and turns `HttpResponse` /
//! `TransportFailure` values into results without touching the network; the
//! async `ApiClient` is the only place that performs I/O. Keeping the
//! boundary as data lets the parsing and error-message rules be tested
//! without a server.

use std::fmt;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// `path` is relative to the base URL (for logging); `url` is absolute.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Why a request produced no response at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The configured timeout elapsed first.
    Timeout,
    /// Connection refused, reset, DNS failure and similar.
    Network,
}

/// A request that was sent but never answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure {
    pub kind: FailureKind,
    /// Message reported by the transport; may be empty.
    pub message: String,
}

impl TransportFailure {
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Network,
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Timeout,
            message: message.into(),
        }
    }
}
