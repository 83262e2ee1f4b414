use crate::error::StatusError;
use crate::payload::{Codes, ResponsePayload};
use crate::registry::{StatusCodeDescriptor, StatusCodeRegistry};
use crate::status_class::StatusClass;
use chrono::{Duration, Local, NaiveDateTime};
use log::debug;
use serde_json::{json, Value};
use std::sync::Arc;

pub const PARTIAL_CONTENT_RANGE: &str = "bytes 0-1023/2048";

/// ISO-8601 local date-time with millisecond precision.
pub fn iso_timestamp(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.3f").to_string()
}

/// What the caller knows about the request that asked for a status code.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub method: Option<String>,
    pub range: Option<String>,
}

impl RequestContext {
    pub fn with_method(method: &str) -> Self {
        RequestContext {
            method: Some(method.to_string()),
            range: None,
        }
    }
}

/// A synthesized payload together with the status it must go out with.
#[derive(Debug, Clone)]
pub struct StatusResponse {
    pub code: u16,
    pub reason: &'static str,
    pub headers: Vec<(String, String)>,
    pub payload: ResponsePayload,
}

#[derive(Debug, Clone)]
pub struct ResponseSynthesizer {
    registry: Arc<StatusCodeRegistry>,
}

impl ResponseSynthesizer {
    pub fn new(registry: Arc<StatusCodeRegistry>) -> Self {
        ResponseSynthesizer { registry }
    }

    /// Looks `code` up and describes it.
    pub fn respond_with(
        &self,
        code: u16,
        context: Option<&RequestContext>,
    ) -> Result<StatusResponse, StatusError> {
        let descriptor = self.registry.lookup(code)?;
        Ok(self.single_code_response(descriptor, context))
    }

    pub fn single_code_response(
        &self,
        descriptor: &StatusCodeDescriptor,
        context: Option<&RequestContext>,
    ) -> StatusResponse {
        let now = Local::now().naive_local();
        let success = descriptor.class() == StatusClass::Success;

        let mut headers = Vec::new();
        if descriptor.code() == 206 {
            if let Some(range) = context.and_then(|c| c.range.as_deref()) {
                debug!("Requested range {}, serving {}", range, PARTIAL_CONTENT_RANGE);
            }
            headers.push((
                "Content-Range".to_string(),
                PARTIAL_CONTENT_RANGE.to_string(),
            ));
        }

        let payload = ResponsePayload {
            status: descriptor.full_status(),
            message: descriptor.message().to_string(),
            description: descriptor.description().to_string(),
            usage: Some(descriptor.usage().to_string()),
            data: example_data(descriptor, now),
            timestamp: success.then(|| iso_timestamp(now)),
            method: context.and_then(|c| c.method.clone()),
            ..Default::default()
        };
        debug!("Synthesized payload for {}", payload.status);

        StatusResponse {
            code: descriptor.code(),
            reason: descriptor.reason_phrase(),
            headers,
            payload,
        }
    }

    /// Summary of every registered code in `class`. Always sent as 200.
    pub fn overview_response(&self, class: StatusClass) -> StatusResponse {
        let codes: Codes = self
            .registry
            .all_of(class)
            .into_iter()
            .map(|d| (d.overview_key(), d.message().to_string()))
            .collect();
        let (status, message, description, usage) = overview_text(class);

        let payload = ResponsePayload {
            status: status.to_string(),
            message: message.to_string(),
            description: description.to_string(),
            usage: Some(usage.to_string()),
            codes: Some(codes),
            timestamp: (class == StatusClass::Success)
                .then(|| iso_timestamp(Local::now().naive_local())),
            ..Default::default()
        };

        StatusResponse {
            code: 200,
            reason: "OK",
            headers: Vec::new(),
            payload,
        }
    }

    /// Confirms an `Expect: 100-continue` exchange. By the time this runs the
    /// transport has read the whole request; the interim `100 Continue` went
    /// out first only when there was a body to wait for.
    pub fn negotiation_response(&self, expect: Option<&str>) -> StatusResponse {
        let continued = expect.is_some_and(|value| value.trim().eq_ignore_ascii_case("100-continue"));

        let payload = if continued {
            ResponsePayload {
                status: "100 Continue (Handled by server)".to_string(),
                message: "Server acknowledged Expect: 100-continue header. If the request declared a body, the interim 100 Continue was sent before that body was read.".to_string(),
                description: "Any request body has now been received. Proceeding with final processing.".to_string(),
                next_step: Some("Response returned successfully.".to_string()),
                ..Default::default()
            }
        } else {
            ResponsePayload {
                status: "200 OK".to_string(),
                message: "Request processed successfully".to_string(),
                description: "No Expect header detected. Normal request processed.".to_string(),
                note: Some("To see 100 Continue, send header: Expect: 100-continue".to_string()),
                ..Default::default()
            }
        };

        StatusResponse {
            code: 200,
            reason: "OK",
            headers: Vec::new(),
            payload,
        }
    }
}

fn overview_text(class: StatusClass) -> (&'static str, &'static str, &'static str, &'static str) {
    match class {
        StatusClass::Informational => (
            "Informational Status Codes (1xx)",
            "These status codes indicate a provisional response",
            "Informational responses are provisional and indicate that the client should continue with the request",
            "Useful for understanding how a server signals progress before the final response",
        ),
        StatusClass::Success => (
            "Successful Status Codes (2xx)",
            "Overview of all successful status codes (2xx)",
            "This endpoint provides information about all HTTP successful status codes",
            "Useful for understanding when each status code should be used",
        ),
        StatusClass::Redirection => (
            "Redirection Status Codes (3xx)",
            "These status codes indicate that further action is needed to complete the request",
            "Redirection responses point the client at another location or a cached copy of the resource",
            "Useful for understanding moved resources and conditional requests",
        ),
        StatusClass::ClientError => (
            "Client Error Status Codes (4xx)",
            "These status codes indicate that the request contains an error",
            "Client error responses mean the request cannot be fulfilled as sent and should not be repeated unchanged",
            "Useful for understanding how a server reports malformed or unauthorized requests",
        ),
        StatusClass::ServerError => (
            "Server Error Status Codes (5xx)",
            "These status codes indicate that the server failed to fulfil a valid request",
            "Server error responses mean the server is aware it has erred or cannot perform the request",
            "Useful for understanding outages, gateway failures and retry behaviour",
        ),
    }
}

fn example_data(descriptor: &StatusCodeDescriptor, now: NaiveDateTime) -> Option<Value> {
    if descriptor.forbids_body() || descriptor.class() == StatusClass::Informational {
        return None;
    }

    let data = match descriptor.code() {
        200 => json!({
            "id": 1,
            "name": "Example Resource",
            "description": "This is an example resource returned with 200 OK",
            "createdAt": iso_timestamp(now),
        }),
        201 => json!({
            "id": 123,
            "name": "New Resource",
            "status": "created",
            "location": "/api/resources/123",
            "createdAt": iso_timestamp(now),
        }),
        202 => json!({
            "taskId": "task-456",
            "status": "accepted",
            "estimatedCompletion": iso_timestamp(now + Duration::minutes(5)),
            "message": "Your request has been accepted for processing",
        }),
        206 => json!({
            "range": PARTIAL_CONTENT_RANGE,
            "contentLength": 1024,
            "totalSize": 2048,
            "chunkNumber": 1,
        }),
        _ => json!({
            "message": format!("Example response for {}", descriptor.full_status()),
            "timestamp": iso_timestamp(now),
        }),
    };
    Some(data)
}
