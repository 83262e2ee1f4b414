use crate::error::StatusError;
use crate::http_status::HttpStatus;
use crate::status_class::StatusClass;
use std::collections::BTreeMap;

/// Metadata for one status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCodeDescriptor {
    code: u16,
    class: StatusClass,
    short_text: &'static str,
    message: &'static str,
    description: &'static str,
    usage: &'static str,
    band: Option<(u16, u16)>,
}

impl StatusCodeDescriptor {
    pub fn new(
        code: u16,
        short_text: &'static str,
        message: &'static str,
        description: &'static str,
        usage: &'static str,
    ) -> Result<Self, StatusError> {
        Ok(StatusCodeDescriptor {
            code,
            class: StatusClass::classify(code)?,
            short_text,
            message,
            description,
            usage,
            band: None,
        })
    }

    /// Marks this entry as standing in for a whole band of unassigned codes.
    /// The band must end at the entry's own code.
    pub fn representing_band(mut self, low: u16) -> Result<Self, StatusError> {
        StatusClass::classify(low)?;
        if low > self.code || !self.class.contains(low) {
            return Err(StatusError::InvalidCode(low));
        }
        self.band = Some((low, self.code));
        Ok(self)
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn class(&self) -> StatusClass {
        self.class
    }

    pub fn short_text(&self) -> &'static str {
        self.short_text
    }

    pub fn message(&self) -> &'static str {
        self.message
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn usage(&self) -> &'static str {
        self.usage
    }

    pub fn band(&self) -> Option<(u16, u16)> {
        self.band
    }

    /// `"{code} {short_text}"`, e.g. `"100 Continue"`.
    pub fn full_status(&self) -> String {
        format!("{} {}", self.code, self.short_text)
    }

    /// Key used in class overviews: the code, or `"low-high"` for a band.
    pub fn overview_key(&self) -> String {
        match self.band {
            Some((low, high)) => format!("{}-{}", low, high),
            None => self.code.to_string(),
        }
    }

    /// Reason phrase for the status line. Band entries drop their range prefix.
    pub fn reason_phrase(&self) -> &'static str {
        match self.band {
            Some(_) => self
                .short_text
                .split_once(' ')
                .map_or(self.short_text, |(_, reason)| reason),
            None => self.short_text,
        }
    }

    /// Codes whose semantics leave no room for a response body.
    pub fn forbids_body(&self) -> bool {
        HttpStatus::code_forbids_body(self.code)
    }
}

type Row = (u16, &'static str, &'static str, &'static str, &'static str);

const UNASSIGNED_BAND_START: u16 = 104;
const UNASSIGNED_BAND_CODE: u16 = 199;

const BUILTIN: &[Row] = &[
    (
        100,
        "Continue",
        "The server has received the request headers and expects the client to send the request body",
        "This status code indicates that the server has received the request and the client should proceed to send the request body",
        "Typically used in POST requests where the client needs to send a large amount of data",
    ),
    (
        101,
        "Switching Protocols",
        "The server is switching protocols as requested by the client",
        "This status code is sent in response to an Upgrade request header from the client",
        "Commonly used for WebSocket connections or HTTP/2 upgrades",
    ),
    (
        102,
        "Processing",
        "The server has received and is processing the request, but no response is available yet",
        "This status code indicates that the server has received the request and is processing it",
        "Used for long-running operations where the server needs more time to process",
    ),
    (
        103,
        "Early Hints",
        "Used to return some response headers before the final HTTP message",
        "This status code is used to return some response headers before the final HTTP message",
        "Helps with performance by allowing the client to start processing resources early",
    ),
    (
        UNASSIGNED_BAND_CODE,
        "104-199 Unassigned",
        "These status codes are reserved for future use",
        "Status codes 104-199 are unassigned and reserved for future use",
        "These codes should not be used in current implementations",
    ),
    (
        200,
        "OK",
        "The request has succeeded",
        "This is the standard response for successful HTTP requests. The actual response will depend on the request method used.",
        "Most common response for successful GET requests, also used for successful POST, PUT, PATCH requests",
    ),
    (
        201,
        "Created",
        "The request has succeeded and a new resource has been created as a result",
        "This status code is typically sent after a POST request that creates a new resource",
        "Used when creating new resources like users, posts, orders, etc.",
    ),
    (
        202,
        "Accepted",
        "The request has been received but not yet acted upon",
        "The request has been accepted for processing, but the processing has not been completed",
        "Commonly used for asynchronous operations, batch processing, or when the result is not immediately available",
    ),
    (
        203,
        "Non-Authoritative Information",
        "The returned metadata is different from what the origin server sent",
        "This status code is used when the response has been modified by a proxy or cache",
        "Rarely used in modern applications, mostly for proxy responses",
    ),
    (
        204,
        "No Content",
        "The server successfully processed the request and is not returning any content",
        "The server has fulfilled the request but there is no additional content to send in the response body",
        "Commonly used for DELETE operations, or when updating a resource without needing to return the updated data",
    ),
    (
        205,
        "Reset Content",
        "The server has fulfilled the request and desires that the client reset the document view",
        "The server has processed the request and the client should reset the view that sent the request",
        "Used when the client should clear the form or reset the UI state",
    ),
    (
        206,
        "Partial Content",
        "The server is delivering only part of the resource due to a range header sent by the client",
        "The server has fulfilled the partial GET request for the resource",
        "Commonly used for file downloads, video streaming, or large file transfers",
    ),
    (
        207,
        "Multi-Status",
        "The response body contains XML describing the status of multiple independent operations",
        "The response contains information about multiple resources in a single response",
        "Used in WebDAV and other protocols that need to report on multiple operations",
    ),
    (
        208,
        "Already Reported",
        "The members of a DAV binding have already been enumerated in a preceding part of the response",
        "Used in WebDAV to avoid enumerating the internal members of a binding multiple times",
        "Primarily used in WebDAV protocol implementations",
    ),
    (
        226,
        "IM Used",
        "The server has fulfilled a GET request for the resource, and the response is a representation of the result of one or more instance-manipulations",
        "The response is the result of applying one or more instance manipulations to the current instance",
        "Used in HTTP Delta Encoding and rarely in modern applications",
    ),
];

/// Immutable table of every status code this service can describe.
///
/// Built once before serving and shared read-only between connections.
#[derive(Debug, Clone)]
pub struct StatusCodeRegistry {
    descriptors: BTreeMap<u16, StatusCodeDescriptor>,
}

impl StatusCodeRegistry {
    /// The registry shipped with the service.
    pub fn builtin() -> Result<Self, StatusError> {
        let descriptors = BUILTIN
            .iter()
            .map(|&(code, short_text, message, description, usage)| {
                let descriptor =
                    StatusCodeDescriptor::new(code, short_text, message, description, usage)?;
                if code == UNASSIGNED_BAND_CODE {
                    descriptor.representing_band(UNASSIGNED_BAND_START)
                } else {
                    Ok(descriptor)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_descriptors(descriptors)
    }

    pub fn from_descriptors<I>(descriptors: I) -> Result<Self, StatusError>
    where
        I: IntoIterator<Item = StatusCodeDescriptor>,
    {
        let mut table = BTreeMap::new();
        for descriptor in descriptors {
            let code = descriptor.code();
            if table.insert(code, descriptor).is_some() {
                return Err(StatusError::DuplicateCode(code));
            }
        }
        Ok(StatusCodeRegistry { descriptors: table })
    }

    pub fn lookup(&self, code: u16) -> Result<&StatusCodeDescriptor, StatusError> {
        StatusClass::classify(code)?;
        self.descriptors
            .get(&code)
            .ok_or(StatusError::UnknownCode(code))
    }

    /// Every registered descriptor in the class, ascending by code.
    pub fn all_of(&self, class: StatusClass) -> Vec<&StatusCodeDescriptor> {
        let (low, high) = class.range();
        self.descriptors.range(low..=high).map(|(_, d)| d).collect()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusCodeDescriptor> {
        self.descriptors.values()
    }
}
