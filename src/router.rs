use crate::error::ApiError;
use crate::http_request::HttpRequest;
use crate::http_response::HttpResponse;
use crate::http_status::HttpStatus;
use crate::status_class::StatusClass;
use crate::synthesizer::{iso_timestamp, RequestContext, ResponseSynthesizer, StatusResponse};
use crate::wire_status::to_wire_status;
use chrono::{Local, Utc};
use log::{error, info, warn};
use serde::Serialize;
use serde_json::json;

const STATUS_LOOKUP_PREFIX: &str = "/api/status/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    Describe(u16),
    Overview(StatusClass),
    UploadExample,
    MethodDemo,
    Health,
}

struct Route {
    path: &'static str,
    methods: &'static [&'static str],
    endpoint: Endpoint,
}

const fn route(path: &'static str, methods: &'static [&'static str], endpoint: Endpoint) -> Route {
    Route {
        path,
        methods,
        endpoint,
    }
}

const GET: &[&str] = &["GET"];
const POST: &[&str] = &["POST"];
const DELETE: &[&str] = &["DELETE"];

const ROUTES: &[Route] = &[
    route("/api/informational/continue", GET, Endpoint::Describe(100)),
    route("/api/informational/switching-protocols", GET, Endpoint::Describe(101)),
    route("/api/informational/processing", GET, Endpoint::Describe(102)),
    route("/api/informational/early-hints", GET, Endpoint::Describe(103)),
    route("/api/informational/unassigned", GET, Endpoint::Describe(199)),
    route("/api/informational/all", GET, Endpoint::Overview(StatusClass::Informational)),
    route("/api/informational/upload-example", POST, Endpoint::UploadExample),
    route("/api/success/ok", GET, Endpoint::Describe(200)),
    route("/api/success/created", POST, Endpoint::Describe(201)),
    route("/api/success/accepted", POST, Endpoint::Describe(202)),
    route("/api/success/non-authoritative", GET, Endpoint::Describe(203)),
    route("/api/success/no-content", DELETE, Endpoint::Describe(204)),
    route("/api/success/reset-content", POST, Endpoint::Describe(205)),
    route("/api/success/partial-content", GET, Endpoint::Describe(206)),
    route("/api/success/multi-status", POST, Endpoint::Describe(207)),
    route("/api/success/already-reported", GET, Endpoint::Describe(208)),
    route("/api/success/im-used", GET, Endpoint::Describe(226)),
    route("/api/success/all", GET, Endpoint::Overview(StatusClass::Success)),
    route("/api/success/method-demo", &["GET", "POST", "DELETE"], Endpoint::MethodDemo),
    route("/api/health", GET, Endpoint::Health),
];

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    timestamp: String,
    status: u16,
    error: &'a str,
    message: String,
    path: &'a str,
}

/// Maps request paths onto the registry and the synthesizer.
#[derive(Debug, Clone)]
pub struct Router {
    synthesizer: ResponseSynthesizer,
}

impl Router {
    pub fn new(synthesizer: ResponseSynthesizer) -> Self {
        Router { synthesizer }
    }

    pub fn handle(&self, request: &HttpRequest) -> HttpResponse {
        match self.dispatch(request) {
            Ok(response) => response,
            Err(err) => error_response(&err, &request.path),
        }
    }

    fn dispatch(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let endpoint = resolve(&request.method, &request.path)?;
        let context = RequestContext {
            method: Some(request.method.clone()),
            range: request.header("range").map(str::to_string),
        };

        let synthesized = match endpoint {
            Endpoint::Describe(code) => {
                let response = self.synthesizer.respond_with(code, Some(&context))?;
                info!("Handling request for {} status", response.payload.status);
                response
            }
            Endpoint::Overview(class) => {
                info!("Handling request for {} overview", class);
                self.synthesizer.overview_response(class)
            }
            Endpoint::UploadExample => {
                let expect = request.header("expect");
                info!(
                    "Handling upload example with Expect {:?} and {} body bytes",
                    expect,
                    request.body.len()
                );
                self.synthesizer.negotiation_response(expect)
            }
            Endpoint::MethodDemo => {
                let code = match request.method.as_str() {
                    "POST" => 201,
                    "DELETE" => 204,
                    _ => 200,
                };
                info!("Handling {} request for method demonstration", request.method);
                self.synthesizer.respond_with(code, Some(&context))?
            }
            Endpoint::Health => {
                let body = json!({
                    "status": "UP",
                    "message": "HTTP status reference API is running",
                    "timestamp": Utc::now().timestamp_millis(),
                });
                return Ok(HttpResponse::json(HttpStatus::OK, &body)?);
            }
        };

        into_http(synthesized)
    }
}

fn resolve(method: &str, path: &str) -> Result<Endpoint, ApiError> {
    let path = match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    };

    if let Some(raw) = path.strip_prefix(STATUS_LOOKUP_PREFIX) {
        if method != "GET" {
            return Err(method_not_allowed(method, path));
        }
        let code = raw
            .parse::<u16>()
            .map_err(|_| ApiError::BadRequest(format!("'{}' is not a status code", raw)))?;
        return Ok(Endpoint::Describe(code));
    }

    let route = ROUTES
        .iter()
        .find(|route| route.path == path)
        .ok_or_else(|| ApiError::NotFound(path.to_string()))?;
    if !route.methods.contains(&method) {
        return Err(method_not_allowed(method, path));
    }
    Ok(route.endpoint)
}

fn method_not_allowed(method: &str, path: &str) -> ApiError {
    ApiError::MethodNotAllowed {
        method: method.to_string(),
        path: path.to_string(),
    }
}

fn into_http(synthesized: StatusResponse) -> Result<HttpResponse, ApiError> {
    let status = to_wire_status(synthesized.code, synthesized.reason)?;
    let mut response = HttpResponse::json(status, &synthesized.payload)?;
    for (name, value) in &synthesized.headers {
        response = response.with_header(name, value);
    }
    Ok(response)
}

pub(crate) fn error_response(err: &ApiError, path: &str) -> HttpResponse {
    let status = err.status();
    if status.code >= 500 {
        error!("{} failed: {:#}", path, err);
    } else {
        warn!("{} rejected: {}", path, err);
    }

    let envelope = ErrorEnvelope {
        timestamp: iso_timestamp(Local::now().naive_local()),
        status: status.code,
        error: status.text,
        message: err.to_string(),
        path,
    };
    match HttpResponse::json(status, &envelope) {
        Ok(response) => response,
        Err(e) => {
            error!("Failed to build error response: {:#}", e);
            HttpResponse {
                status,
                headers: Vec::new(),
                body: None,
            }
        }
    }
}
