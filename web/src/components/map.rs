//! Situational map with the fixture camera and incident markers.
//!
//! With a maps key the markers are drawn on a static tile image; without
//! one they are plotted on a plain SVG canvas.  Markers are not backend
//! driven.

use leptos::prelude::*;
use reqwest::Url;
use tracing::warn;

use drishti_common::config::Config;
use drishti_common::fixtures::{CAMERAS, INCIDENTS};

use crate::model::{MapView, Marker, MarkerIcon, Table, Widget};

const WIDTH: f64 = 700.0;
const HEIGHT: f64 = 400.0;
const PAD: f64 = 40.0;
const STATIC_MAPS_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/staticmap";

/// Map view model for the current configuration.
pub fn view(config: &Config) -> MapView {
    let cameras = CAMERAS.iter().map(|c| Marker {
        id: c.id.into(),
        label: c.name.into(),
        detail: c.status.to_uppercase(),
        lat: c.lat,
        lng: c.lng,
        color: c.marker_color(),
        icon: MarkerIcon::Camera,
    });
    let incidents = INCIDENTS.iter().map(|i| Marker {
        id: i.id.into(),
        label: format!("{} Incident", i.kind),
        detail: i.priority.into(),
        lat: i.lat,
        lng: i.lng,
        color: i.marker_color(),
        icon: MarkerIcon::Incident,
    });
    let markers: Vec<Marker> = cameras.chain(incidents).collect();

    let static_image_url = config
        .maps_api_key
        .as_deref()
        .and_then(|key| static_map_url(config, &markers, key));

    MapView {
        markers,
        static_image_url,
    }
}

/// Map plus its legend table.
pub fn render(config: &Config) -> Vec<Widget> {
    let map = view(config);
    let legend = Table {
        headers: ["ID", "Name", "Status / Priority", "Marker"]
            .map(String::from)
            .to_vec(),
        rows: map
            .markers
            .iter()
            .map(|m| {
                vec![
                    m.id.clone(),
                    m.label.clone(),
                    m.detail.clone(),
                    m.color.to_string(),
                ]
            })
            .collect(),
    };
    vec![Widget::Map(map), Widget::Table(legend)]
}

fn static_map_url(config: &Config, markers: &[Marker], key: &str) -> Option<String> {
    let mut params = vec![
        (
            "center".to_string(),
            format!("{},{}", config.map_center_lat, config.map_center_lng),
        ),
        ("zoom".to_string(), config.map_zoom.to_string()),
        ("size".to_string(), format!("{WIDTH}x{HEIGHT}")),
    ];
    // one `markers=` group per colour
    let mut colors: Vec<&str> = markers.iter().map(|m| m.color).collect();
    colors.sort_unstable();
    colors.dedup();
    for color in colors {
        let points = markers
            .iter()
            .filter(|m| m.color == color)
            .map(|m| format!("|{},{}", m.lat, m.lng))
            .collect::<String>();
        params.push(("markers".to_string(), format!("color:{color}{points}")));
    }
    params.push(("key".to_string(), key.to_string()));

    match Url::parse_with_params(STATIC_MAPS_ENDPOINT, &params) {
        Ok(url) => Some(url.into()),
        Err(e) => {
            warn!("Cannot build static map URL, falling back to offline plot: {e}");
            None
        }
    }
}

/// Static tile image when a maps key is configured, otherwise an SVG plot.
#[component]
pub fn SituationMap(map: MapView) -> impl IntoView {
    match map.static_image_url {
        Some(url) => view! {
            <img class="map" src=url width=WIDTH.to_string() height=HEIGHT.to_string()
                 alt="Situational map"/>
        }
        .into_any(),
        None => view! { <MarkerPlot markers=map.markers/> }.into_any(),
    }
}

#[component]
fn MarkerPlot(markers: Vec<Marker>) -> impl IntoView {
    let (min_lat, max_lat, min_lng, max_lng) = markers.iter().fold(
        (f64::MAX, f64::MIN, f64::MAX, f64::MIN),
        |(a, b, c, d), m| (a.min(m.lat), b.max(m.lat), c.min(m.lng), d.max(m.lng)),
    );
    let lat_span = (max_lat - min_lat).max(1e-6);
    let lng_span = (max_lng - min_lng).max(1e-6);

    let shapes = markers
        .into_iter()
        .map(|m| {
            let x = PAD + (m.lng - min_lng) / lng_span * (WIDTH - 2.0 * PAD);
            // north is up
            let y = PAD + (max_lat - m.lat) / lat_span * (HEIGHT - 2.0 * PAD);
            let shape = match m.icon {
                MarkerIcon::Camera => view! {
                    <circle cx=format!("{x:.1}") cy=format!("{y:.1}") r="9" fill=m.color/>
                }
                .into_any(),
                MarkerIcon::Incident => {
                    let points = format!(
                        "{:.1},{:.1} {:.1},{:.1} {:.1},{:.1}",
                        x,
                        y - 11.0,
                        x - 10.0,
                        y + 8.0,
                        x + 10.0,
                        y + 8.0
                    );
                    view! { <polygon points=points fill=m.color/> }.into_any()
                }
            };
            let tooltip = format!("{} ({}) – {}", m.label, m.id, m.detail);
            view! {
                <g class="marker">
                    <title>{tooltip}</title>
                    {shape}
                    <text x={format!("{:.1}", x + 13.0)} y=format!("{y:.1}") class="marker-label">{m.label}</text>
                </g>
            }
        })
        .collect_view();

    view! {
        <svg class="map" viewBox=format!("0 0 {WIDTH} {HEIGHT}") role="img">
            <title>"Situational map"</title>
            <rect width=WIDTH.to_string() height=HEIGHT.to_string() class="map-bg"/>
            {shapes}
        </svg>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markup(map: MapView) -> String {
        view! { <SituationMap map=map/> }.to_html()
    }

    #[test]
    fn test_fixture_markers() {
        let map = view(&Config::default());
        assert_eq!(map.markers.len(), 8);
        assert!(map.static_image_url.is_none());

        let west_wing = map.markers.iter().find(|m| m.id == "CAM-004").unwrap();
        assert_eq!(west_wing.color, "orange");
        assert_eq!(west_wing.detail, "MAINTENANCE");

        let fire = map.markers.iter().find(|m| m.id == "INC-002").unwrap();
        assert_eq!(fire.color, "red");
        assert_eq!(fire.label, "FIRE Incident");
    }

    #[test]
    fn test_without_key_renders_svg() {
        let html = markup(view(&Config::default()));
        assert!(html.starts_with("<svg"));
        assert_eq!(html.matches("<circle").count(), 5);
        assert_eq!(html.matches("<polygon").count(), 3);
        assert!(!html.contains("NaN"));
    }

    #[test]
    fn test_with_key_uses_static_tiles() {
        let config = Config {
            maps_api_key: Some("KEY123".into()),
            ..Config::default()
        };
        let map = view(&config);
        let url = Url::parse(map.static_image_url.as_deref().unwrap()).unwrap();
        let params: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        let value = |name: &str| {
            params
                .iter()
                .filter(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
                .collect::<Vec<_>>()
        };

        assert_eq!(value("center"), vec!["37.7749,-122.4194"]);
        assert_eq!(value("zoom"), vec!["13"]);
        assert_eq!(value("key"), vec!["KEY123"]);
        let markers = value("markers");
        assert_eq!(markers.len(), 4);
        assert!(markers.iter().any(|m| m.starts_with("color:red|") && m.contains("|37.7799,-122.4044")));

        let html = markup(map);
        assert!(html.starts_with("<img"));
        assert!(html.contains("&amp;key=KEY123"));
    }

    #[test]
    fn test_key_is_percent_encoded() {
        let config = Config {
            maps_api_key: Some("ab&c#d e".into()),
            ..Config::default()
        };
        let raw = view(&config).static_image_url.unwrap();
        assert!(raw.ends_with("&key=ab%26c%23d+e"));

        let url = Url::parse(&raw).unwrap();
        assert_eq!(url.fragment(), None);
        let key: Vec<_> = url.query_pairs().filter(|(k, _)| k == "key").collect();
        assert_eq!(key.len(), 1);
        assert_eq!(key[0].1, "ab&c#d e");
    }

    #[test]
    fn test_render_includes_legend() {
        let widgets = render(&Config::default());
        match &widgets[1] {
            Widget::Table(t) => assert_eq!(t.rows.len(), 8),
            other => panic!("expected legend table, got {other:?}"),
        }
    }
}
