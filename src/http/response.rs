/// HTTP status codes the server can answer with.
///
/// The first eight variants form the fixed vocabulary every request ends in:
/// - `Ok` (200): File served, or existing file replaced
/// - `Created` (201): File created
/// - `BadRequest` (400): Malformed request or short body
/// - `Forbidden` (403): Directory or unreadable target
/// - `NotFound` (404): Target does not exist
/// - `InternalServerError` (500): Filesystem or read failure
/// - `NotImplemented` (501): Method other than GET/PUT
/// - `VersionNotSupported` (505): Version other than HTTP/1.1
///
/// `Other` covers anything outside that set; it is written as a bare status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 201 Created
    Created,
    /// 400 Bad Request
    BadRequest,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    InternalServerError,
    /// 501 Not Implemented
    NotImplemented,
    /// 505 Version Not Supported
    VersionNotSupported,
    /// Any other code with its phrase
    Other(u16, &'static str),
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use filebox::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::VersionNotSupported.as_u16(), 505);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Created => 201,
            StatusCode::BadRequest => 400,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
            StatusCode::NotImplemented => 501,
            StatusCode::VersionNotSupported => 505,
            StatusCode::Other(code, _) => *code,
        }
    }

    /// Returns the reason phrase sent after the numeric code.
    ///
    /// # Example
    ///
    /// ```
    /// # use filebox::http::response::StatusCode;
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    /// assert_eq!(StatusCode::VersionNotSupported.reason_phrase(), "Version Not Supported");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::NotImplemented => "Not Implemented",
            StatusCode::VersionNotSupported => "Version Not Supported",
            StatusCode::Other(_, phrase) => *phrase,
        }
    }

    /// Whether responses with this status carry a `"<phrase>\n"` body.
    pub fn has_body(&self) -> bool {
        !matches!(self, StatusCode::Other(..))
    }
}

/// A status-only response: status line, Content-Length and `"<phrase>\n"` body.
///
/// Every outcome except a successful GET is reported this way, acknowledgements
/// and errors alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// Response body as bytes, empty for `StatusCode::Other`
    pub body: Vec<u8>,
}

impl Response {
    /// Builds the canonical response for `status`.
    pub fn new(status: StatusCode) -> Self {
        let body = if status.has_body() {
            format!("{}\n", status.reason_phrase()).into_bytes()
        } else {
            Vec::new()
        };

        Self { status, body }
    }

    /// Value of the Content-Length header, `None` when the header is omitted.
    pub fn content_length(&self) -> Option<usize> {
        self.status.has_body().then_some(self.body.len())
    }
}

impl From<StatusCode> for Response {
    fn from(status: StatusCode) -> Self {
        Response::new(status)
    }
}
