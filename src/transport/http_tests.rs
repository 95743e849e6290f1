//! Tests for HTTP transport types.

use super::*;
use ::http::{HeaderName, HeaderValue, Method, StatusCode};
use url::Url;

fn test_url() -> Url {
    Url::parse("https://example.com/api").unwrap()
}

mod http_request {
    use super::*;

    #[test]
    fn new_sets_method_and_url() {
        let req = HttpRequest::new(Method::GET, test_url());

        assert_eq!(req.method, Method::GET);
        assert_eq!(req.url.as_str(), "https://example.com/api");
        assert!(req.headers.is_empty());
    }

    #[test]
    fn get_creates_get_request() {
        let req = HttpRequest::get(test_url());
        assert_eq!(req.method, Method::GET);
    }

    #[test]
    fn with_header_adds_header() {
        let req = HttpRequest::get(test_url()).with_header(
            HeaderName::from_static("accept"),
            HeaderValue::from_static("application/json"),
        );

        assert_eq!(req.headers.get("accept").unwrap(), "application/json");
    }

    #[test]
    fn with_header_appends_duplicate_names() {
        let req = HttpRequest::get(test_url())
            .with_header(
                HeaderName::from_static("x-tag"),
                HeaderValue::from_static("a"),
            )
            .with_header(
                HeaderName::from_static("x-tag"),
                HeaderValue::from_static("b"),
            );

        let values: Vec<_> = req.headers.get_all("x-tag").iter().collect();
        assert_eq!(values.len(), 2);
    }
}

mod http_response {
    use super::*;

    #[test]
    fn is_success_for_2xx() {
        let resp = HttpResponse::new(StatusCode::OK, ::http::HeaderMap::new(), vec![]);
        assert!(resp.is_success());
    }

    #[test]
    fn is_success_false_for_4xx() {
        let resp = HttpResponse::new(StatusCode::NOT_FOUND, ::http::HeaderMap::new(), vec![]);
        assert!(!resp.is_success());
    }
}

mod http_error {
    use super::*;

    #[test]
    fn timeout_displays_message() {
        assert_eq!(HttpError::Timeout.to_string(), "Request timed out");
    }

    #[test]
    fn connection_refused_detected_from_source() {
        let source: Box<dyn std::error::Error + Send + Sync> =
            "tcp connect error: connection refused".into();
        let error = HttpError::Connection(source);

        assert!(error.is_connection_refused());
    }

    #[test]
    fn timeout_is_not_connection_refused() {
        assert!(!HttpError::Timeout.is_connection_refused());
    }

    #[test]
    fn other_connection_errors_are_not_refused() {
        let source: Box<dyn std::error::Error + Send + Sync> = "dns error".into();
        let error = HttpError::Connection(source);

        assert!(!error.is_connection_refused());
    }
}
