//! HTTP status codes as carried in probe results.

/// HTTP status code returned by the remote API.
///
/// Stored as the raw number so it survives the trip out of `reqwest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpStatusCode(pub u16);

impl HttpStatusCode {
    /// 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.0)
    }

    /// 401 or 403, the codes the API uses for a missing or refused bearer token.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.0, 401 | 403)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl From<u16> for HttpStatusCode {
    fn from(code: u16) -> Self {
        HttpStatusCode(code)
    }
}

impl std::fmt::Display for HttpStatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
