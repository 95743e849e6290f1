//! Tests for the launcher directory client.

use super::*;
use crate::transport::mock::MockHttpClient;
use crate::transport::HttpError;

const LISTING: &str = r#"{
    "result": {
        "battlEye": true,
        "endpoint": {"ip": "203.0.113.7", "port": 2302},
        "environment": "w",
        "firstPersonOnly": false,
        "folder": "dayz",
        "game": "dayz",
        "gamePort": 2300,
        "map": "chernarusplus",
        "maxPlayers": 60,
        "mission": "dayzOffline.chernarusplus",
        "mods": [{"name": "CF", "steamWorkshopId": 1559212036}],
        "name": "Chernarus Weekly",
        "nameOverride": false,
        "password": false,
        "players": 42,
        "profile": false,
        "shard": "123abc",
        "sponsor": false,
        "time": "08:42",
        "timeAcceleration": 4,
        "vac": true,
        "version": "1.26.158551"
    },
    "status": 200
}"#;

fn client(http: MockHttpClient) -> DzsaLauncherClient<MockHttpClient> {
    DzsaLauncherClient::new(http)
}

mod query {
    use super::*;

    #[tokio::test]
    async fn decodes_full_listing() {
        let http = MockHttpClient::new();
        http.push_body(200, LISTING);

        let response = client(http).query("203.0.113.7", 2302).await.unwrap();

        let result = response.result;
        assert_eq!(result.name, "Chernarus Weekly");
        assert_eq!(result.endpoint.to_string(), "203.0.113.7:2302");
        assert_eq!(result.players, 42);
        assert_eq!(result.max_players, 60);
        assert_eq!(result.map, "chernarusplus");
        assert_eq!(result.mods.len(), 1);
        assert_eq!(result.mods[0].steam_workshop_id, 1_559_212_036);
        assert!(result.battl_eye);
        assert_eq!(result.time_acceleration, 4);
    }

    #[tokio::test]
    async fn builds_endpoint_from_address_and_port() {
        let http = MockHttpClient::new();
        http.push_body(200, LISTING);
        let launcher = client(http);

        launcher.query("203.0.113.7", 2302).await.unwrap();

        let requests = launcher.http().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].url.as_str(),
            "https://dayzsalauncher.com/api/v1/query/203.0.113.7:2302"
        );
        assert_eq!(requests[0].headers.get("accept").unwrap(), "application/json");
        assert!(
            requests[0]
                .headers
                .get("user-agent")
                .unwrap()
                .to_str()
                .unwrap()
                .starts_with("dzsa-sync/")
        );
    }

    #[tokio::test]
    async fn with_base_url_overrides_endpoint() {
        let http = MockHttpClient::new();
        http.push_body(200, LISTING);
        let launcher = client(http).with_base_url("http://localhost:9000/query/");

        launcher.query("10.0.0.1", 1000).await.unwrap();

        let requests = launcher.http().requests();
        assert_eq!(
            requests[0].url.as_str(),
            "http://localhost:9000/query/10.0.0.1:1000"
        );
    }

    #[tokio::test]
    async fn non_200_status_is_an_error() {
        let http = MockHttpClient::new();
        http.push_body(502, "bad gateway");

        let error = client(http).query("203.0.113.7", 2302).await.unwrap_err();

        assert!(matches!(
            error,
            QueryError::Status(status) if status.as_u16() == 502
        ));
    }

    #[tokio::test]
    async fn error_key_in_body_is_an_api_error() {
        let http = MockHttpClient::new();
        http.push_body(200, r#"{"status": 404, "error": "server not found"}"#);

        let error = client(http).query("203.0.113.7", 2302).await.unwrap_err();

        match error {
            QueryError::Api(message) => assert_eq!(message, "server not found"),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_json_is_a_decode_error() {
        let http = MockHttpClient::new();
        http.push_body(200, "not json");

        let error = client(http).query("203.0.113.7", 2302).await.unwrap_err();

        assert!(matches!(error, QueryError::Decode(_)));
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let http = MockHttpClient::new();
        http.push_error(HttpError::Timeout);

        let error = client(http).query("203.0.113.7", 2302).await.unwrap_err();

        assert!(matches!(error, QueryError::Transport(HttpError::Timeout)));
    }

    #[tokio::test]
    async fn missing_fields_default_instead_of_failing() {
        let http = MockHttpClient::new();
        http.push_body(200, r#"{"result": {"name": "Bare"}, "status": 200}"#);

        let response = client(http).query("203.0.113.7", 2302).await.unwrap();

        assert_eq!(response.result.name, "Bare");
        assert_eq!(response.result.players, 0);
        assert!(response.result.mods.is_empty());
    }
}

mod model {
    use super::*;

    #[test]
    fn listing_round_trips_through_json() {
        let parsed: QueryResponse = serde_json::from_str(LISTING).unwrap();
        let text = serde_json::to_string(&parsed).unwrap();
        let reparsed: QueryResponse = serde_json::from_str(&text).unwrap();

        assert_eq!(parsed, reparsed);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let parsed: QueryResponse = serde_json::from_str(LISTING).unwrap();
        let value = serde_json::to_value(&parsed).unwrap();
        let result = value.get("result").unwrap();

        assert!(result.get("battlEye").is_some());
        assert!(result.get("maxPlayers").is_some());
        assert!(result.get("timeAcceleration").is_some());
        assert!(result.get("battl_eye").is_none());
    }

    #[test]
    fn endpoint_displays_as_host_port() {
        let endpoint = ServerEndpoint {
            ip: "10.0.0.1".to_string(),
            port: 2302,
        };
        assert_eq!(endpoint.to_string(), "10.0.0.1:2302");
    }
}
