use std::sync::LazyLock;

use regex::bytes::Regex;

use crate::http::error::RequestError;
use crate::http::request::{Method, Request, Uri};

/// Marks the end of the header section.
pub const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

// Anchored at the start of the buffer; the request line must end in CRLF.
static REQUEST_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]{1,8}) (/[a-zA-Z0-9.-]{1,63}) (HTTP/[0-9]\.[0-9])\r\n")
        .expect("request line pattern is valid")
});

// Case- and spacing-sensitive on purpose: only the canonical form counts.
static CONTENT_LENGTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^Content-Length: ([0-9]+)\r$").expect("content length pattern is valid")
});

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    InvalidRequestLine,
    InvalidContentLength,
}

impl From<ParseError> for RequestError {
    fn from(e: ParseError) -> Self {
        match e {
            ParseError::InvalidRequestLine => RequestError::MalformedRequestLine,
            ParseError::InvalidContentLength => RequestError::MissingOrInvalidContentLength,
        }
    }
}

/// Parses the request line at the start of `buf`.
///
/// The whole line must match `METHOD SP URI SP VERSION CRLF`; nothing is
/// truncated to fit. The version is only checked for shape here, comparing it
/// against `HTTP/1.1` is up to the caller.
pub fn parse_request_line(buf: &[u8]) -> Result<Request, ParseError> {
    let caps = REQUEST_LINE
        .captures(buf)
        .ok_or(ParseError::InvalidRequestLine)?;

    // All three groups are ASCII by construction
    let group = |i: usize| {
        caps.get(i)
            .and_then(|m| std::str::from_utf8(m.as_bytes()).ok())
            .ok_or(ParseError::InvalidRequestLine)
    };

    let method = Method::from_str(group(1)?).ok_or(ParseError::InvalidRequestLine)?;
    let uri = Uri::parse(group(2)?).ok_or(ParseError::InvalidRequestLine)?;
    let version = group(3)?;

    Ok(Request::new(method, uri, version))
}

/// Extracts the Content-Length value from a header section.
///
/// Exactly one `Content-Length: <digits>\r\n` line must be present. A missing
/// header, a duplicate, any other spelling or a value that does not fit in
/// `u64` are all rejected alike.
pub fn parse_content_length(headers: &[u8]) -> Result<u64, ParseError> {
    let mut matches = CONTENT_LENGTH.captures_iter(headers);

    let first = matches.next().ok_or(ParseError::InvalidContentLength)?;
    if matches.next().is_some() {
        return Err(ParseError::InvalidContentLength);
    }

    first
        .get(1)
        .and_then(|m| std::str::from_utf8(m.as_bytes()).ok())
        .and_then(|digits| digits.parse::<u64>().ok())
        .ok_or(ParseError::InvalidContentLength)
}

/// Offset of the header terminator, if present.
pub fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(HEADER_TERMINATOR.len())
        .position(|w| w == HEADER_TERMINATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = parse_request_line(b"GET /index.html HTTP/1.1\r\n\r\n").unwrap();

        assert_eq!(req.method, Method::GET);
        assert_eq!(req.uri.as_str(), "/index.html");
        assert_eq!(req.version, "HTTP/1.1");
    }

    #[test]
    fn content_length_ignores_body_lookalike_in_other_header() {
        let headers = b"PUT /a HTTP/1.1\r\nX-Content-Length: 3\r\n\r\n";
        assert_eq!(
            parse_content_length(headers),
            Err(ParseError::InvalidContentLength)
        );
    }
}
