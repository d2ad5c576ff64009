//! HTTP client tests against mock Overpass and OSRM servers.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fuel_server::domain::GeoPoint;
use fuel_server::osrm::{OsrmClient, OsrmConfig, RouteError, RoutingProvider};
use fuel_server::overpass::{OverpassClient, OverpassConfig, OverpassError, build_query};

fn origin() -> GeoPoint {
    GeoPoint::new(-7.797, 110.370).unwrap()
}

fn destination() -> GeoPoint {
    GeoPoint::new(-7.783, 110.378).unwrap()
}

// ============================================================================
// Overpass
// ============================================================================

mod overpass_tests {
    use super::*;

    fn client(server: &MockServer) -> OverpassClient {
        let config = OverpassConfig::new()
            .with_base_url(format!("{}/api/interpreter", server.uri()))
            .with_timeout(Duration::from_secs(5));
        OverpassClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn sends_query_and_parses_elements() {
        let server = MockServer::start().await;
        let query = build_query(origin(), 2000, 25);

        Mock::given(method("GET"))
            .and(path("/api/interpreter"))
            .and(query_param("data", query.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "version": 0.6,
                "elements": [
                    {"type": "node", "id": 1, "lat": -7.79, "lon": 110.37,
                     "tags": {"amenity": "fuel", "name": "Pertamina"}},
                    {"type": "way", "id": 2,
                     "center": {"lat": -7.78, "lon": 110.38},
                     "tags": {"amenity": "fuel"}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let elements = client(&server)
            .fetch_fuel_elements(origin(), 2000)
            .await
            .unwrap();

        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].kind, "node");
        assert_eq!(elements[0].tags.get("name").map(String::as_str), Some("Pertamina"));
        assert!(elements[1].center.is_some());
    }

    #[tokio::test]
    async fn too_many_requests_is_rate_limited() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let err = client(&server)
            .fetch_fuel_elements(origin(), 2000)
            .await
            .unwrap_err();

        assert!(matches!(err, OverpassError::RateLimited));
    }

    #[tokio::test]
    async fn server_error_is_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(504).set_body_string("Gateway Timeout"))
            .mount(&server)
            .await;

        let err = client(&server)
            .fetch_fuel_elements(origin(), 2000)
            .await
            .unwrap_err();

        match err {
            OverpassError::Api { status, message } => {
                assert_eq!(status, 504);
                assert_eq!(message, "Gateway Timeout");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_json_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
            .mount(&server)
            .await;

        let err = client(&server)
            .fetch_fuel_elements(origin(), 2000)
            .await
            .unwrap_err();

        assert!(matches!(err, OverpassError::Json { .. }));
    }
}

// ============================================================================
// OSRM
// ============================================================================

mod osrm_tests {
    use super::*;

    fn client(server: &MockServer) -> OsrmClient {
        let config = OsrmConfig::new()
            .with_base_url(server.uri())
            .with_timeout(Duration::from_secs(5));
        OsrmClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn distance_lookup_requests_no_geometry() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/route/v1/driving/110.37,-7.797;110.378,-7.783"))
            .and(query_param("overview", "false"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": "Ok",
                "routes": [{"distance": 1834.0, "duration": 301.5, "legs": [{}]}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let km = client(&server)
            .driving_distance_km(origin(), destination())
            .await;

        assert_eq!(km, Some(1.834));
    }

    #[tokio::test]
    async fn distance_lookup_absorbs_failures() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .mount(&server)
            .await;

        let client = client(&server);
        assert_eq!(client.driving_distance_km(origin(), destination()).await, None);

        let err = client
            .fetch_distance_km(origin(), destination())
            .await
            .unwrap_err();
        assert!(matches!(err, RouteError::ServiceUnavailable { status: 500, .. }));
    }

    #[tokio::test]
    async fn empty_route_list_is_absent() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": "Ok",
                "routes": []
            })))
            .mount(&server)
            .await;

        assert_eq!(
            client(&server)
                .driving_distance_km(origin(), destination())
                .await,
            None
        );
    }

    #[tokio::test]
    async fn no_route_code_is_no_route_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "code": "NoRoute",
                "message": "Impossible route between points"
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .full_route(origin(), destination())
            .await
            .unwrap_err();

        assert!(matches!(err, RouteError::NoRouteFound));
    }

    #[tokio::test]
    async fn full_route_has_geometry_and_steps() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path_regex(r"^/route/v1/driving/"))
            .and(query_param("overview", "full"))
            .and(query_param("geometries", "geojson"))
            .and(query_param("steps", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": "Ok",
                "routes": [{
                    "distance": 2345.0,
                    "duration": 396.0,
                    "geometry": {
                        "type": "LineString",
                        "coordinates": [[110.37, -7.797], [110.375, -7.79], [110.378, -7.783]]
                    },
                    "legs": [{
                        "steps": [
                            {"distance": 400.0, "name": "Jalan Malioboro",
                             "maneuver": {"type": "depart"}},
                            {"distance": 1945.0, "name": "Jalan Mataram",
                             "maneuver": {"type": "turn", "modifier": "left"}},
                            {"distance": 0.0, "name": "",
                             "maneuver": {"type": "arrive"}}
                        ]
                    }]
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let route = client(&server)
            .full_route(origin(), destination())
            .await
            .unwrap();

        assert!((route.distance_km - 2.345).abs() < 1e-9);
        assert!((route.duration_minutes - 6.6).abs() < 1e-9);
        assert_eq!(route.rounded_minutes(), 7);
        assert_eq!(route.geometry.len(), 3);
        assert_eq!(route.geometry[0], origin());
        assert_eq!(route.steps.len(), 3);
        assert_eq!(route.steps[1].instruction, "Turn left onto Jalan Mataram");
        assert_eq!(route.steps[2].instruction, "Arrive at destination");
    }

    #[tokio::test]
    async fn undecodable_full_route_is_invalid_response() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client(&server)
            .full_route(origin(), destination())
            .await
            .unwrap_err();

        assert!(matches!(err, RouteError::InvalidResponse { .. }));
    }
}
