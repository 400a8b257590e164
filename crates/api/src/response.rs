//! Handler outcomes and their mapping onto wire responses.

use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{self, HeaderValue};
use hyper::{Response, StatusCode};

/// The result of one operation handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Resource created (201, empty body).
    Created,
    /// Success (200, empty body).
    Ok,
    /// Success with a JSON body (200).
    OkJson(Bytes),
    /// Client error (400) with a plain-text reason; never retried.
    BadRequest(String),
    /// Server fault (500) with a plain-text reason.
    ServerError(String),
    /// Declared but deliberately unimplemented operation (501).
    NotImplemented,
}

impl Outcome {
    /// The HTTP status code for this outcome.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Created => StatusCode::CREATED,
            Self::Ok | Self::OkJson(_) => StatusCode::OK,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::ServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotImplemented => StatusCode::NOT_IMPLEMENTED,
        }
    }

    /// Builds the wire response for this outcome.
    #[must_use]
    pub fn into_response(self) -> Response<Full<Bytes>> {
        let status = self.status();
        match self {
            Self::Created | Self::Ok => plain(status, Bytes::new()),
            Self::OkJson(body) => {
                let mut response = Response::new(Full::new(body));
                *response.status_mut() = status;
                response.headers_mut().insert(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                );
                response
            }
            Self::BadRequest(reason) => plain(status, Bytes::from(reason)),
            Self::ServerError(reason) => {
                plain(status, Bytes::from(format!("An error occurred: '{reason}'")))
            }
            Self::NotImplemented => plain(status, Bytes::from_static(b"Not implemented")),
        }
    }
}

fn plain(status: StatusCode, body: Bytes) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(body));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Outcome::Created.status(), StatusCode::CREATED);
        assert_eq!(Outcome::Ok.status(), StatusCode::OK);
        assert_eq!(Outcome::OkJson(Bytes::from_static(b"[]")).status(), StatusCode::OK);
        assert_eq!(
            Outcome::BadRequest(String::new()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Outcome::ServerError(String::new()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(Outcome::NotImplemented.status(), StatusCode::NOT_IMPLEMENTED);
    }

    #[test]
    fn test_bad_request_carries_reason_verbatim() {
        let response = Outcome::BadRequest("Account doesn't exist".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
    }

    #[test]
    fn test_json_body_content_type() {
        let response = Outcome::OkJson(Bytes::from_static(b"{\"id\":1}")).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    }
}
