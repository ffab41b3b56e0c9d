//! Request/response hooks used for logging.
//!
//! Interceptors only observe: every hook takes shared references and returns
//! nothing, so an implementation cannot rewrite a request, retry it, or turn
//! a failure into a success.

use std::sync::Mutex;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};

/// Hooks invoked by `ApiClient` around every request.
pub trait Interceptor: Send + Sync {
    /// Before the request is sent.
    fn on_request(&self, request: &HttpRequest);

    /// The request could not be built; `error` is returned to the caller as is.
    fn on_request_error(&self, error: &ApiError);

    /// A 2xx response arrived.
    fn on_response(&self, status: u16, path: &str);

    /// The call failed after the request was sent: non-2xx status (with
    /// `status` set), network error or timeout.
    fn on_response_error(&self, status: Option<u16>, message: &str);
}

/// Emits every hook as a `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingInterceptor;

impl Interceptor for TracingInterceptor {
    fn on_request(&self, request: &HttpRequest) {
        tracing::info!(method = %request.method, path = %request.path, "sending request");
    }

    fn on_request_error(&self, error: &ApiError) {
        tracing::error!(error = %error, "request error");
    }

    fn on_response(&self, status: u16, path: &str) {
        tracing::info!(status, path, "received response");
    }

    fn on_response_error(&self, status: Option<u16>, message: &str) {
        tracing::error!(status = ?status, error = message, "response error");
    }
}

/// One observed hook invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogRecord {
    Request { method: HttpMethod, path: String },
    RequestError { message: String },
    Response { status: u16, path: String },
    ResponseError { status: Option<u16>, message: String },
}

/// Keeps every hook invocation in memory, in call order.
#[derive(Debug, Default)]
pub struct RecordingInterceptor {
    records: Mutex<Vec<LogRecord>>,
}

impl RecordingInterceptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().clone()
    }

    fn push(&self, record: LogRecord) {
        self.lock().push(record);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogRecord>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Interceptor for RecordingInterceptor {
    fn on_request(&self, request: &HttpRequest) {
        self.push(LogRecord::Request {
            method: request.method,
            path: request.path.clone(),
        });
    }

    fn on_request_error(&self, error: &ApiError) {
        self.push(LogRecord::RequestError {
            message: error.to_string(),
        });
    }

    fn on_response(&self, status: u16, path: &str) {
        self.push(LogRecord::Response {
            status,
            path: path.to_string(),
        });
    }

    fn on_response_error(&self, status: Option<u16>, message: &str) {
        self.push(LogRecord::ResponseError {
            status,
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_interceptor_keeps_call_order() {
        let recorder = RecordingInterceptor::new();
        let request = HttpRequest {
            method: HttpMethod::Get,
            path: "/health".to_string(),
            url: "http://localhost:8000/health".to_string(),
            headers: Vec::new(),
            body: None,
        };
        recorder.on_request(&request);
        recorder.on_response(200, "/health");
        recorder.on_response_error(Some(503), "Request failed with status code 503");

        assert_eq!(
            recorder.records(),
            vec![
                LogRecord::Request {
                    method: HttpMethod::Get,
                    path: "/health".to_string()
                },
                LogRecord::Response {
                    status: 200,
                    path: "/health".to_string()
                },
                LogRecord::ResponseError {
                    status: Some(503),
                    message: "Request failed with status code 503".to_string()
                },
            ]
        );
    }
}
