use anyhow::{Context, Result};
use bytes::Bytes;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::Serialize;
use std::io::Write;

pub enum HttpBody {
    Json(Bytes),
    Gzip(Bytes),
}

impl HttpBody {
    pub fn json<T: Serialize>(value: &T) -> Result<HttpBody> {
        let bytes = serde_json::to_vec(value).context("Failed to serialize body")?;
        Ok(HttpBody::Json(Bytes::from(bytes)))
    }

    pub fn gzip(self) -> Result<HttpBody> {
        match self {
            HttpBody::Json(bytes) => {
                let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
                encoder
                    .write_all(&bytes)
                    .context("Failed to compress body")?;
                let compressed = encoder.finish().context("Failed to compress body")?;
                Ok(HttpBody::Gzip(Bytes::from(compressed)))
            }
            HttpBody::Gzip(_) => Ok(self),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            HttpBody::Json(bytes) => bytes,
            HttpBody::Gzip(bytes) => bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    #[test]
    fn gzip_round_trips_json() {
        let body = HttpBody::json(&serde_json::json!({"status": "200 OK"})).unwrap();
        let plain = body.as_bytes().to_vec();

        let compressed = body.gzip().unwrap();
        assert!(matches!(compressed, HttpBody::Gzip(_)));

        let mut decoded = Vec::new();
        GzDecoder::new(compressed.as_bytes())
            .read_to_end(&mut decoded)
            .unwrap();
        assert_eq!(decoded, plain);
    }
}
