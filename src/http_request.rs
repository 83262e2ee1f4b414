use crate::http_status::HttpStatus;
use anyhow::{anyhow, Context, Result};
use bytes::Bytes;
use log::debug;
use std::collections::HashMap;
use std::io::{BufRead, Read, Write};

/// Upper bound on request bodies this service will buffer.
const MAX_BODY_LENGTH: usize = 1024 * 1024;
/// Longest request or header line accepted, line ending included.
const MAX_HEADER_LINE: usize = 8 * 1024;
const MAX_HEADERS: usize = 64;

pub struct HttpRequest {
    pub(crate) method: String,
    pub(crate) path: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) body: Bytes,
}

impl HttpRequest {
    /// Header lookup by lower-case name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn expects_continue(&self) -> bool {
        self.header("expect")
            .is_some_and(|value| value.trim().eq_ignore_ascii_case("100-continue"))
    }

    pub fn accepts_gzip(&self) -> bool {
        self.header("accept-encoding").is_some_and(|value| {
            value
                .split(',')
                .any(|encoding| encoding.split(';').next().unwrap_or("").trim() == "gzip")
        })
    }

    fn content_length(&self) -> Result<usize> {
        match self.header("content-length") {
            None => Ok(0),
            Some(value) => value
                .trim()
                .parse()
                .with_context(|| format!("Invalid Content-Length: {}", value)),
        }
    }
}

/// Reads one request. When the client asked for `Expect: 100-continue`, the
/// interim `100 Continue` line goes out on `interim` before the body is read.
pub fn parse<R: BufRead, W: Write>(reader: &mut R, interim: &mut W) -> Result<HttpRequest> {
    let request_line = read_line(reader)?.ok_or_else(|| anyhow!("Failed to read request line"))?;
    let (method, target) =
        parse_request_line(&request_line).context("Failed to parse request line")?;
    let path = target.split('?').next().unwrap_or_default().to_string();
    debug!("Received {} request for {}", method, path);

    let mut headers = HashMap::new();
    let mut header_lines = 0;
    while let Some(line) = read_line(reader)? {
        if line.is_empty() {
            break;
        }
        header_lines += 1;
        if header_lines > MAX_HEADERS {
            return Err(anyhow!("More than {} header lines is too large", MAX_HEADERS));
        }
        match line.split_once(':') {
            Some((name, value)) => {
                headers.insert(name.trim().to_lowercase(), value.trim().to_string());
                debug!("Received header: {}", line);
            }
            None => debug!("Received unknown line: {}", line),
        }
    }

    let mut request = HttpRequest {
        method,
        path,
        headers,
        body: Bytes::new(),
    };

    let length = request.content_length()?;
    if length > MAX_BODY_LENGTH {
        return Err(anyhow!("Request body of {} bytes is too large", length));
    }
    if length > 0 {
        if request.expects_continue() {
            send_continue(interim)?;
        }
        let mut body = vec![0; length];
        reader
            .read_exact(&mut body)
            .context("Failed to read request body")?;
        request.body = Bytes::from(body);
    }

    Ok(request)
}

fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let read = reader
        .by_ref()
        .take(MAX_HEADER_LINE as u64 + 1)
        .read_line(&mut line)
        .context("Failed to read from connection")?;
    if read == 0 {
        return Ok(None);
    }
    if read > MAX_HEADER_LINE {
        return Err(anyhow!(
            "Line of more than {} bytes is too large",
            MAX_HEADER_LINE
        ));
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn parse_request_line(request_line: &str) -> Result<(String, String)> {
    let mut parts = request_line.split(' ');
    match (parts.next(), parts.next()) {
        (Some(method), Some(target)) if !method.is_empty() && !target.is_empty() => {
            Ok((method.to_uppercase(), target.to_string()))
        }
        _ => Err(anyhow!("Invalid request line: {}", request_line)),
    }
}

fn send_continue<W: Write>(interim: &mut W) -> Result<()> {
    let status = HttpStatus::CONTINUE;
    let line = format!("HTTP/1.1 {} {}\r\n\r\n", status.code, status.text);
    interim
        .write_all(line.as_bytes())
        .context("Failed to send interim status line")?;
    interim.flush().context("Failed to send interim status line")?;
    debug!("Sent interim {} {}", status.code, status.text);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse_str(raw: &str) -> (Result<HttpRequest>, Vec<u8>) {
        let mut reader = Cursor::new(raw.as_bytes().to_vec());
        let mut interim = Vec::new();
        let request = parse(&mut reader, &mut interim);
        (request, interim)
    }

    #[test]
    fn parses_request_line_and_headers() {
        let (request, interim) = parse_str(
            "GET /api/success/partial-content?x=1 HTTP/1.1\r\nHost: localhost\r\nRange: bytes=0-1023\r\n\r\n",
        );
        let request = request.unwrap();
        assert_eq!(request.method, "GET");
        assert_eq!(request.path, "/api/success/partial-content");
        assert_eq!(request.header("range"), Some("bytes=0-1023"));
        assert_eq!(request.header("host"), Some("localhost"));
        assert!(request.body.is_empty());
        assert!(interim.is_empty());
    }

    #[test]
    fn reads_body_by_content_length() {
        let (request, interim) = parse_str(
            "POST /api/informational/upload-example HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello",
        );
        let request = request.unwrap();
        assert_eq!(&request.body[..], b"hello");
        assert!(interim.is_empty());
    }

    #[test]
    fn sends_interim_continue_before_body() {
        let (request, interim) = parse_str(
            "POST /api/informational/upload-example HTTP/1.1\r\nExpect: 100-continue\r\nContent-Length: 4\r\n\r\ndata",
        );
        let request = request.unwrap();
        assert!(request.expects_continue());
        assert_eq!(&request.body[..], b"data");
        assert_eq!(interim, b"HTTP/1.1 100 Continue\r\n\r\n");
    }

    #[test]
    fn no_interim_continue_without_body() {
        let (request, interim) = parse_str(
            "POST /api/informational/upload-example HTTP/1.1\r\nExpect: 100-continue\r\n\r\n",
        );
        assert!(request.unwrap().expects_continue());
        assert!(interim.is_empty());
    }

    #[test]
    fn detects_gzip_acceptance() {
        let (request, _) = parse_str("GET / HTTP/1.1\r\nAccept-Encoding: br, gzip;q=0.8\r\n\r\n");
        assert!(request.unwrap().accepts_gzip());
        let (request, _) = parse_str("GET / HTTP/1.1\r\nAccept-Encoding: br\r\n\r\n");
        assert!(!request.unwrap().accepts_gzip());
    }

    #[test]
    fn rejects_oversized_header_line() {
        let raw = format!(
            "GET / HTTP/1.1\r\nX-Big: {}\r\n\r\n",
            "a".repeat(MAX_HEADER_LINE)
        );
        let err = parse_str(&raw).0.err().unwrap();
        assert!(format!("{:#}", err).contains("too large"));

        let raw = format!(
            "GET /{} HTTP/1.1\r\n\r\n",
            "a".repeat(MAX_HEADER_LINE)
        );
        assert!(parse_str(&raw).0.is_err());
    }

    #[test]
    fn accepts_header_line_just_under_the_cap() {
        // "X-Big: " plus value plus CRLF fills the line exactly.
        let value = "a".repeat(MAX_HEADER_LINE - "X-Big: \r\n".len());
        let raw = format!("GET / HTTP/1.1\r\nX-Big: {}\r\n\r\n", value);
        let request = parse_str(&raw).0.unwrap();
        assert_eq!(request.header("x-big").map(str::len), Some(value.len()));
    }

    #[test]
    fn rejects_too_many_headers() {
        let mut raw = String::from("GET / HTTP/1.1\r\n");
        for i in 0..=MAX_HEADERS {
            raw.push_str(&format!("X-Header-{}: {}\r\n", i, i));
        }
        raw.push_str("\r\n");
        let err = parse_str(&raw).0.err().unwrap();
        assert!(format!("{:#}", err).contains("too large"));
    }

    #[test]
    fn accepts_the_maximum_header_count() {
        let mut raw = String::from("GET / HTTP/1.1\r\n");
        for i in 0..MAX_HEADERS {
            raw.push_str(&format!("X-Header-{}: {}\r\n", i, i));
        }
        raw.push_str("\r\n");
        assert_eq!(parse_str(&raw).0.unwrap().headers.len(), MAX_HEADERS);
    }

    #[test]
    fn rejects_malformed_requests() {
        assert!(parse_str("").0.is_err());
        assert!(parse_str("GARBAGE\r\n\r\n").0.is_err());
        assert!(parse_str("POST / HTTP/1.1\r\nContent-Length: abc\r\n\r\n").0.is_err());
        assert!(parse_str("POST / HTTP/1.1\r\nContent-Length: 10\r\n\r\nshort").0.is_err());
    }
}
