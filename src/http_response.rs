use crate::http_body::HttpBody;
use crate::http_status::HttpStatus;
use anyhow::{Context, Result};
use log::debug;
use serde::Serialize;
use std::io::Write;

pub type HttpHeaders = Vec<(String, String)>;

pub struct HttpResponse {
    pub(crate) status: HttpStatus,
    pub(crate) headers: HttpHeaders,
    pub(crate) body: Option<HttpBody>,
}

impl HttpResponse {
    pub fn json<T: Serialize>(status: HttpStatus, value: &T) -> Result<HttpResponse> {
        Ok(HttpResponse {
            status,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: Some(HttpBody::json(value)?),
        })
    }

    pub fn with_header(mut self, name: &str, value: &str) -> HttpResponse {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Gzip-encodes the body, if there is one worth sending.
    pub fn gzip(mut self) -> Result<HttpResponse> {
        if self.status.forbids_body() {
            return Ok(self);
        }
        if let Some(body) = self.body.take() {
            self.body = Some(body.gzip()?);
            self.headers
                .push(("Content-Encoding".to_string(), "gzip".to_string()));
        }
        Ok(self)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub fn send<W: Write>(stream: &mut W, mut response: HttpResponse) -> Result<()> {
    send_status_line(stream, &response.status)?;

    if response.status.forbids_body() {
        // The payload never reaches the wire for these statuses.
        response.body = None;
        response
            .headers
            .retain(|(k, _)| !k.eq_ignore_ascii_case("Content-Type"));
    } else {
        let content_length = response.body.as_ref().map_or(0, |b| b.as_bytes().len());
        response
            .headers
            .push(("Content-Length".to_string(), content_length.to_string()));
    }
    response
        .headers
        .push(("Connection".to_string(), "close".to_string()));
    response
        .headers
        .push(("Access-Control-Allow-Origin".to_string(), "*".to_string()));

    send_headers(stream, &response.headers)?;
    if let Some(body) = &response.body {
        stream
            .write_all(body.as_bytes())
            .context("Failed to send body")?;
    }
    stream.flush().context("Failed to flush response")?;

    Ok(())
}

fn send_status_line<W: Write>(stream: &mut W, status: &HttpStatus) -> Result<()> {
    let status_line = format!("HTTP/1.1 {} {}\r\n", status.code, status.text);
    stream
        .write_all(status_line.as_bytes())
        .context("Failed to send status line")?;
    debug!("Sent status line {} {}", status.code, status.text);
    Ok(())
}

fn send_headers<W: Write>(stream: &mut W, headers: &HttpHeaders) -> Result<()> {
    let headers_string = headers
        .iter()
        .map(|(k, v)| format!("{}: {}\r\n", k, v))
        .collect::<Vec<String>>()
        .join("");

    stream
        .write_all(headers_string.as_bytes())
        .context("Failed to send headers")?;

    // send empty line indicating the headers are complete
    stream
        .write_all("\r\n".as_bytes())
        .context("Failed to send empty line")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn written(response: HttpResponse) -> String {
        let mut out = Vec::new();
        send(&mut out, response).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn writes_status_line_headers_and_body() {
        let response = HttpResponse::json(HttpStatus::OK, &json!({"a": 1})).unwrap();
        let text = written(response);
        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("Content-Type: application/json\r\n"));
        assert!(text.contains("Content-Length: 7\r\n"));
        assert!(text.contains("Connection: close\r\n"));
        assert!(text.ends_with("\r\n\r\n{\"a\":1}"));
    }

    #[test]
    fn writes_unnamed_codes_verbatim() {
        let status = HttpStatus {
            code: 103,
            text: "Early Hints",
        };
        let text = written(HttpResponse::json(status, &json!({})).unwrap());
        assert!(text.starts_with("HTTP/1.1 103 Early Hints\r\n"));
    }

    #[test]
    fn drops_body_for_no_content() {
        let response = HttpResponse::json(HttpStatus::NO_CONTENT, &json!({"status": "204"}))
            .unwrap()
            .gzip()
            .unwrap();
        let text = written(response);
        assert!(text.starts_with("HTTP/1.1 204 No Content\r\n"));
        assert!(!text.contains("Content-Length"));
        assert!(!text.contains("Content-Type"));
        assert!(!text.contains("Content-Encoding"));
        assert!(text.ends_with("\r\n\r\n"));
    }

    #[test]
    fn gzip_sets_content_encoding() {
        let response = HttpResponse::json(HttpStatus::OK, &json!({"a": 1}))
            .unwrap()
            .with_header("Content-Range", "bytes 0-1023/2048")
            .gzip()
            .unwrap();
        assert_eq!(response.header("content-encoding"), Some("gzip"));
        assert_eq!(response.header("Content-Range"), Some("bytes 0-1023/2048"));
    }
}
