//! Emergency dispatch tab.

use leptos::prelude::*;
use serde::Deserialize;

use drishti_common::fixtures::{AVAILABLE_UNITS, EMERGENCY_TYPES, PRIORITY_LEVELS, RESPONSE_TIMES};
use drishti_common::protocol::{ApiResult, Coordinates, IncidentRequest, ValidationError};

use crate::components::chart;
use crate::components::widgets::Widgets;
use crate::model::{ChartKind, FormField, Metric, Table, Tone, Widget};
use crate::pages::{failure, form, layout, lenient_number, outcome, Outcome};

pub const DEFAULT_LAT: f64 = 37.7749;
pub const DEFAULT_LNG: f64 = -122.4194;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DispatchForm {
    pub incident_type: String,
    pub location: String,
    pub description: String,
    pub priority: String,
    #[serde(deserialize_with = "lenient_number")]
    pub lat: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub lng: Option<f64>,
}

impl Default for DispatchForm {
    fn default() -> Self {
        Self {
            incident_type: EMERGENCY_TYPES[0].into(),
            location: String::new(),
            description: String::new(),
            priority: PRIORITY_LEVELS[0].into(),
            lat: None,
            lng: None,
        }
    }
}

impl DispatchForm {
    pub fn lat(&self) -> f64 {
        self.lat.unwrap_or(DEFAULT_LAT)
    }

    pub fn lng(&self) -> f64 {
        self.lng.unwrap_or(DEFAULT_LNG)
    }

    pub fn request(&self) -> Result<IncidentRequest, ValidationError> {
        let request = IncidentRequest {
            incident_type: self.incident_type.clone(),
            location: self.location.clone(),
            description: self.description.clone(),
            priority: self.priority.clone(),
            coordinates: Coordinates {
                lat: self.lat(),
                lng: self.lng(),
            },
        };
        request.validate()?;
        Ok(request)
    }
}

pub fn page(input: &DispatchForm, last: Option<&Outcome>) -> Vec<Widget> {
    let mut main = vec![form(
        "/dispatch",
        "🚨 Dispatch Emergency Response",
        vec![
            FormField::select("incident_type", "Emergency Type", &EMERGENCY_TYPES, &input.incident_type),
            FormField::text("location", "Location", &input.location, "e.g., Food Court Section B"),
            FormField::text_area(
                "description",
                "Description",
                &input.description,
                "Describe the emergency situation...",
            ),
            FormField::select("priority", "Priority Level", &PRIORITY_LEVELS, &input.priority),
            FormField::number("lat", "Latitude", input.lat(), Some((-90.0, 90.0)), 0.000001),
            FormField::number("lng", "Longitude", input.lng(), Some((-180.0, 180.0)), 0.000001),
        ],
    )];
    main.extend(outcome(last, render));

    layout(
        "🚨 Intelligent Emergency Dispatch",
        "Smart resource allocation with optimized routing",
        main,
        side_panel(),
    )
}

#[component]
pub fn DispatchPage(input: DispatchForm, last: Option<Outcome>) -> impl IntoView {
    view! { <Widgets items=page(&input, last.as_ref())/> }
}

pub fn render(result: &ApiResult) -> Vec<Widget> {
    if !result.success {
        return failure("Dispatch failed", result);
    }
    let data = result.lookup();
    let incident = data.node("incident");
    let dispatch = data.node("dispatch");
    let protocol = data.node("protocol");

    let mut out = vec![
        Widget::notice(Tone::Success, "✅ Emergency Response Dispatched"),
        Widget::subheader("📋 Incident Summary"),
        Widget::Metrics(vec![
            Metric::new("Incident ID", incident.text("id", "Unknown")),
            Metric::new("Units Dispatched", dispatch.text("unitsDispatched", "0")),
            Metric::new("ETA", format!("{} min", dispatch.text("fastestETA", "0"))),
        ]),
        Widget::subheader("📋 Response Protocol"),
        Widget::field("Priority", protocol.text("priority", "UNKNOWN")),
        Widget::field("Target Response Time", protocol.text("responseTime", "Unknown")),
    ];

    let equipment = protocol.strings("equipment");
    if !equipment.is_empty() {
        out.push(Widget::text("Required Equipment:"));
        out.push(Widget::Bullets(equipment));
    }
    let procedures = protocol.strings("procedures");
    if !procedures.is_empty() {
        out.push(Widget::text("Response Procedures:"));
        out.push(Widget::Numbered(procedures));
    }

    let units: Vec<_> = data.items("units").collect();
    if !units.is_empty() {
        out.push(Widget::subheader("🚗 Dispatched Units"));
        out.extend(units.into_iter().map(|unit| {
            let mut body = vec![
                Widget::field("Type", unit.text("type", "Unknown")),
                Widget::field("ETA", unit.text("eta", "Unknown")),
                Widget::field("Status", unit.text("status", "Unknown")),
            ];
            let route = unit.node("route");
            if route.is_populated() {
                body.push(Widget::field("Distance", route.text("distance", "Unknown")));
                body.push(Widget::field(
                    "Estimated Time",
                    route.text("estimatedTime", "Unknown"),
                ));
            }
            Widget::Expander {
                title: format!("Unit {}", unit.text("unitId", "Unknown")),
                body,
            }
        }));
    }
    out
}

fn side_panel() -> Vec<Widget> {
    vec![
        Widget::subheader("🚗 Available Units"),
        Widget::Table(Table {
            headers: ["ID", "Type", "Status", "Location"].map(String::from).to_vec(),
            rows: AVAILABLE_UNITS
                .iter()
                .map(|u| [u.id, u.kind, u.status, u.location].map(String::from).to_vec())
                .collect(),
        }),
        Widget::subheader("📊 Response Times"),
        Widget::Chart(chart::single(
            "Average Response Times by Unit Type",
            ChartKind::Bar,
            "Avg Response Time (min)",
            RESPONSE_TIMES.iter().map(|(kind, mins)| (kind.to_string(), *mins)),
        )),
    ]
}
