//! Response body decompression
//!
//! Requests advertise `Accept-Encoding: gzip, deflate, br`, so responses may
//! arrive in any of those encodings. Decoding is bounded by the configured
//! response limit so a small compressed body cannot expand without bound.

use std::io::Read;

use brotli::Decompressor as BrotliDecoder;
use bytes::Bytes;
use flate2::read::{DeflateDecoder, GzDecoder, ZlibDecoder};
use http::HeaderValue;

use crate::error::{self, Kind, Result};

const BROTLI_BUFFER_SIZE: usize = 4096;

/// Content codings understood by the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    Gzip,
    Brotli,
    Deflate,
    Identity,
}

impl ContentEncoding {
    #[inline]
    #[must_use]
    pub fn encoding_name(self) -> &'static str {
        match self {
            ContentEncoding::Gzip => "gzip",
            ContentEncoding::Brotli => "br",
            ContentEncoding::Deflate => "deflate",
            ContentEncoding::Identity => "identity",
        }
    }

    /// Parse a single coding token
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "gzip" | "x-gzip" => Some(ContentEncoding::Gzip),
            "br" => Some(ContentEncoding::Brotli),
            "deflate" => Some(ContentEncoding::Deflate),
            "identity" | "" => Some(ContentEncoding::Identity),
            _ => None,
        }
    }
}

/// Undo a `Content-Encoding` header's codings, last applied first.
///
/// # Errors
///
/// - `Decode` if the header names an unknown coding or the data is corrupt
/// - `PayloadTooLarge` if the decoded body exceeds `limit`
pub fn decode_body(content_encoding: Option<&HeaderValue>, body: Bytes, limit: usize) -> Result<Bytes> {
    let Some(value) = content_encoding else {
        return Ok(body);
    };
    let value = value.to_str().map_err(error::decode)?;

    let mut codings = Vec::new();
    for token in value.split(',') {
        let coding = ContentEncoding::from_token(token)
            .ok_or_else(|| error::decode(format!("unsupported content encoding: {}", token.trim())))?;
        codings.push(coding);
    }

    let mut body = body;
    for coding in codings.into_iter().rev() {
        body = decode_one(coding, &body, limit)?;
    }
    Ok(body)
}

fn decode_one(coding: ContentEncoding, data: &[u8], limit: usize) -> Result<Bytes> {
    if data.is_empty() {
        return Ok(Bytes::new());
    }

    let decoded = match coding {
        ContentEncoding::Identity => return Ok(Bytes::copy_from_slice(data)),
        ContentEncoding::Gzip => read_limited(GzDecoder::new(data), limit),
        ContentEncoding::Brotli => read_limited(BrotliDecoder::new(data, BROTLI_BUFFER_SIZE), limit),
        // RFC 9110 deflate is zlib-wrapped, but raw deflate is common in the wild
        ContentEncoding::Deflate => match read_limited(ZlibDecoder::new(data), limit) {
            Err(e) if e.kind() == Kind::Decode => read_limited(DeflateDecoder::new(data), limit),
            other => other,
        },
    }?;

    tracing::trace!(
        target: "cyberid::compression",
        encoding = coding.encoding_name(),
        compressed_size = data.len(),
        decompressed_size = decoded.len(),
        "Decompression completed"
    );
    Ok(Bytes::from(decoded))
}

fn read_limited<R: Read>(reader: R, limit: usize) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let cap = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);
    reader
        .take(cap)
        .read_to_end(&mut out)
        .map_err(error::decode)?;
    if out.len() > limit {
        return Err(error::payload_too_large(limit));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::Compression;
    use flate2::write::{DeflateEncoder, GzEncoder, ZlibEncoder};

    use super::*;

    const PAYLOAD: &[u8] = br#"{"data":{"cyberIdByName":{"owner":{"address":"0xabc"}}}}"#;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    fn brotli_compress(data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut writer = brotli::CompressorWriter::new(&mut out, 4096, 5, 22);
            writer.write_all(data).unwrap();
        }
        out
    }

    #[test]
    fn passthrough_without_header() {
        let body = decode_body(None, Bytes::from_static(PAYLOAD), 1024).unwrap();
        assert_eq!(&body[..], PAYLOAD);
    }

    #[test]
    fn decodes_each_coding() {
        let gz = decode_body(Some(&HeaderValue::from_static("gzip")), gzip(PAYLOAD).into(), 1024).unwrap();
        assert_eq!(&gz[..], PAYLOAD);

        let br = decode_body(Some(&HeaderValue::from_static("br")), brotli_compress(PAYLOAD).into(), 1024).unwrap();
        assert_eq!(&br[..], PAYLOAD);

        let mut zlib = ZlibEncoder::new(Vec::new(), Compression::default());
        zlib.write_all(PAYLOAD).unwrap();
        let deflate = decode_body(
            Some(&HeaderValue::from_static("deflate")),
            zlib.finish().unwrap().into(),
            1024,
        )
        .unwrap();
        assert_eq!(&deflate[..], PAYLOAD);
    }

    #[test]
    fn deflate_accepts_raw_streams_without_zlib_header() {
        let mut raw = DeflateEncoder::new(Vec::new(), Compression::default());
        raw.write_all(PAYLOAD).unwrap();
        let decoded = decode_body(
            Some(&HeaderValue::from_static("deflate")),
            raw.finish().unwrap().into(),
            1024,
        )
        .unwrap();
        assert_eq!(&decoded[..], PAYLOAD);
    }

    #[test]
    fn raw_deflate_still_enforces_limit() {
        let mut raw = DeflateEncoder::new(Vec::new(), Compression::default());
        raw.write_all(&vec![b'a'; 10_000]).unwrap();
        let err = decode_body(
            Some(&HeaderValue::from_static("deflate")),
            raw.finish().unwrap().into(),
            1_000,
        )
        .unwrap_err();
        assert_eq!(err.kind(), Kind::PayloadTooLarge);
    }

    #[test]
    fn decodes_stacked_codings_in_reverse() {
        let body = brotli_compress(&gzip(PAYLOAD));
        let decoded = decode_body(Some(&HeaderValue::from_static("gzip, br")), body.into(), 1024).unwrap();
        assert_eq!(&decoded[..], PAYLOAD);
    }

    #[test]
    fn rejects_unknown_coding() {
        let err = decode_body(Some(&HeaderValue::from_static("zstd")), Bytes::from_static(b"x"), 1024).unwrap_err();
        assert_eq!(err.kind(), Kind::Decode);
    }

    #[test]
    fn enforces_limit_after_decoding() {
        let big = vec![b'a'; 10_000];
        let err = decode_body(Some(&HeaderValue::from_static("gzip")), gzip(&big).into(), 1_000).unwrap_err();
        assert_eq!(err.kind(), Kind::PayloadTooLarge);
    }
}
