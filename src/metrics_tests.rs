//! Tests for metrics error classification.

use super::*;
use http::StatusCode;

mod error_class {
    use super::*;

    #[test]
    fn success_status_is_none() {
        assert_eq!(ErrorClass::from_status(StatusCode::OK), ErrorClass::None);
        assert_eq!(
            ErrorClass::from_status(StatusCode::NO_CONTENT),
            ErrorClass::None
        );
    }

    #[test]
    fn client_errors_are_4xx() {
        assert_eq!(
            ErrorClass::from_status(StatusCode::NOT_FOUND),
            ErrorClass::Status4xx
        );
        assert_eq!(
            ErrorClass::from_status(StatusCode::TOO_MANY_REQUESTS),
            ErrorClass::Status4xx
        );
    }

    #[test]
    fn server_errors_are_5xx() {
        assert_eq!(
            ErrorClass::from_status(StatusCode::BAD_GATEWAY),
            ErrorClass::Status5xx
        );
    }

    #[test]
    fn redirects_are_unknown() {
        assert_eq!(
            ErrorClass::from_status(StatusCode::FOUND),
            ErrorClass::Unknown
        );
    }

    #[test]
    fn timeout_maps_to_timeout() {
        assert_eq!(
            ErrorClass::from_transport(&HttpError::Timeout),
            ErrorClass::Timeout
        );
    }

    #[test]
    fn refused_connection_maps_to_connection_refused() {
        let error = HttpError::Connection("connect: connection refused".into());
        assert_eq!(
            ErrorClass::from_transport(&error),
            ErrorClass::ConnectionRefused
        );
    }

    #[test]
    fn other_connection_failures_are_unknown() {
        let error = HttpError::Connection("dns lookup failed".into());
        assert_eq!(ErrorClass::from_transport(&error), ErrorClass::Unknown);
    }

    #[test]
    fn label_values_match_exposition_names() {
        assert_eq!(ErrorClass::None.as_str(), "none");
        assert_eq!(ErrorClass::Timeout.as_str(), "timeout");
        assert_eq!(ErrorClass::ConnectionRefused.as_str(), "connection_refused");
        assert_eq!(ErrorClass::Status4xx.as_str(), "status_4xx");
        assert_eq!(ErrorClass::Status5xx.as_str(), "status_5xx");
        assert_eq!(ErrorClass::Decode.as_str(), "decode_error");
        assert_eq!(ErrorClass::Unknown.as_str(), "unknown");
    }

    #[test]
    fn recording_without_recorder_is_a_noop() {
        // No recorder installed in unit tests; these must not panic.
        record_request(
            HOST_DZSA,
            Some(StatusCode::OK),
            ErrorClass::None,
            Duration::from_millis(12),
        );
        record_request(HOST_IFCONFIG, None, ErrorClass::Timeout, Duration::ZERO);
        record_player_count("chernarus-1", 42);
    }
}
