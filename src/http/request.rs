use std::fmt;

/// Longest accepted method token.
pub const MAX_METHOD_LEN: usize = 8;
/// Longest accepted URI, leading slash included.
pub const MAX_URI_LEN: usize = 64;
/// The only protocol version the server speaks.
pub const SUPPORTED_VERSION: &str = "HTTP/1.1";

/// HTTP request methods.
///
/// Only GET and PUT are served. Any other token that fits the method grammar
/// (1 to 8 uppercase ASCII letters) is kept as `Other` and answered with 501.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Read a file
    GET,
    /// PUT - Create or replace a file
    PUT,
    /// Any other grammatical method
    Other(String),
}

impl Method {
    /// Parses a method token.
    ///
    /// Returns `None` if the token is empty, longer than 8 bytes, or contains
    /// anything but uppercase ASCII letters.
    ///
    /// # Example
    ///
    /// ```
    /// # use filebox::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("DELETE"), Some(Method::Other("DELETE".into())));
    /// assert_eq!(Method::from_str("get"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        if s.is_empty() || s.len() > MAX_METHOD_LEN || !s.bytes().all(|b| b.is_ascii_uppercase()) {
            return None;
        }

        Some(match s {
            "GET" => Method::GET,
            "PUT" => Method::PUT,
            other => Method::Other(other.to_string()),
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::PUT => "PUT",
            Method::Other(s) => s,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated request target: `/` followed by 1 to 63 of `[a-zA-Z0-9.-]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uri(String);

impl Uri {
    /// Validates a request target, rejecting rather than truncating long input.
    ///
    /// ```
    /// # use filebox::http::request::Uri;
    /// assert!(Uri::parse("/a.txt").is_some());
    /// assert!(Uri::parse("/").is_none());
    /// assert!(Uri::parse("a.txt").is_none());
    /// assert!(Uri::parse("/a?b").is_none());
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let rest = s.strip_prefix('/')?;
        let valid = !rest.is_empty()
            && s.len() <= MAX_URI_LEN
            && rest
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'.' || b == b'-');

        valid.then(|| Uri(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The file name the URI maps to: everything after the leading slash.
    pub fn file_name(&self) -> &str {
        &self.0[1..]
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Represents a request whose request line has passed the grammar.
///
/// `content_length` and `body` are only filled in for PUT. The body is owned
/// here, so it is released when the request is dropped on any exit path.
#[derive(Debug, Clone)]
pub struct Request {
    /// The request method
    pub method: Method,
    /// The request target (e.g., "/index.html")
    pub uri: Uri,
    /// Version token as sent, `HTTP/<digit>.<digit>`
    pub version: String,
    /// Declared body length, meaningful for PUT only
    pub content_length: u64,
    /// Assembled PUT body
    pub body: Option<Vec<u8>>,
}

impl Request {
    pub fn new(method: Method, uri: Uri, version: impl Into<String>) -> Self {
        Self {
            method,
            uri,
            version: version.into(),
            content_length: 0,
            body: None,
        }
    }

    /// Whether the version is exactly `HTTP/1.1`.
    pub fn is_supported_version(&self) -> bool {
        self.version == SUPPORTED_VERSION
    }
}
