//! Askama templates for the web frontend.

use askama::Template;

use crate::discovery::{SearchStatus, SortOrder};
use crate::location::GeolocationOptions;

use super::dto::{ConfigResponse, ResultsResponse, RouteResponse, StationResult, StepResult};

// ============================================================================
// Page Templates
// ============================================================================

/// Map page with the search controls.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    /// `getCurrentPosition` options, as a JSON object literal
    pub geolocation_options: String,
    pub radius_km: String,
    pub max_stations: usize,
}

impl IndexTemplate {
    pub fn new(options: GeolocationOptions, config: &ConfigResponse) -> Self {
        Self {
            geolocation_options: serde_json::to_string(&options)
                .unwrap_or_else(|_| "{}".to_string()),
            radius_km: format!("{:.1}", config.radius_km),
            max_stations: config.max_stations,
        }
    }
}

// ============================================================================
// Fragment Templates (AJAX responses)
// ============================================================================

/// Station list fragment.
#[derive(Template)]
#[template(path = "station_list.html")]
pub struct StationListTemplate {
    pub message: String,
    /// CSS class for the status line
    pub status_class: &'static str,
    pub updated_at: String,
    /// Label of the sort toggle button, naming the *other* order
    pub sort_toggle_label: &'static str,
    pub stations: Vec<StationResult>,
}

impl StationListTemplate {
    pub fn from_response(response: ResultsResponse) -> Self {
        let status_class = match response.status {
            SearchStatus::WithinRadius => "status-ok",
            SearchStatus::NearestFallback => "status-fallback",
            SearchStatus::NoneFound => "status-empty",
        };
        let sort_toggle_label = match response.sort {
            SortOrder::Distance => "Sort by name",
            SortOrder::Name => "Sort by distance",
        };

        Self {
            message: response.message,
            status_class,
            updated_at: response.updated_at,
            sort_toggle_label,
            stations: response.stations,
        }
    }
}

/// Route summary and turn list fragment.
#[derive(Template)]
#[template(path = "route_panel.html")]
pub struct RoutePanelTemplate {
    pub message: String,
    pub steps: Vec<StepResult>,
}

impl RoutePanelTemplate {
    pub fn from_response(response: RouteResponse) -> Self {
        Self {
            message: response.message,
            steps: response.steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results(status: SearchStatus, sort: SortOrder) -> ResultsResponse {
        ResultsResponse {
            status,
            message: "Showing 1 stations within 2 km (by road).".into(),
            radius_km: 2.0,
            sort,
            updated_at: "10:15:00".into(),
            stations: vec![StationResult {
                id: "node/1".into(),
                number: 1,
                name: "Shell <Kaliurang>".into(),
                brand: "Shell".into(),
                address: "Jl. Kaliurang".into(),
                latitude: -7.75,
                longitude: 110.38,
                distance_km: None,
                distance_text: "N/A".into(),
                distance_source: None,
            }],
        }
    }

    #[test]
    fn station_list_renders_and_escapes() {
        let html = StationListTemplate::from_response(results(
            SearchStatus::WithinRadius,
            SortOrder::Distance,
        ))
        .render()
        .unwrap();

        assert!(html.contains("Shell &lt;Kaliurang&gt;"));
        assert!(html.contains("N/A km"));
        assert!(html.contains("Sort by name"));
        assert!(html.contains("status-ok"));
    }

    #[test]
    fn toggle_label_names_other_order() {
        let template =
            StationListTemplate::from_response(results(SearchStatus::NearestFallback, SortOrder::Name));
        assert_eq!(template.sort_toggle_label, "Sort by distance");
        assert_eq!(template.status_class, "status-fallback");
    }

    #[test]
    fn index_embeds_geolocation_options() {
        let config = ConfigResponse {
            radius_km: 2.0,
            max_stations: 20,
        };
        let html = IndexTemplate::new(GeolocationOptions::default(), &config)
            .render()
            .unwrap();

        assert!(html.contains(r#""enableHighAccuracy":true"#));
        assert!(html.contains(r#"value="2.0""#));
    }
}
