//! Multimodal anomaly detection tab.

use leptos::prelude::*;
use serde::Deserialize;

use drishti_common::fixtures::{ANALYSIS_TYPES, ANOMALY_HISTORY, ANOMALY_TYPES};
use drishti_common::protocol::{AnomalyRequest, ApiResult, CameraMetadata, MockMedia};

use crate::components::chart;
use crate::components::widgets::Widgets;
use crate::model::{Chart, ChartKind, FormField, Metric, Series, Tone, Widget};
use crate::pages::{
    camera_location, camera_select, failure, form, layout, lenient_number, outcome, percent,
    Outcome,
};

pub const SENSITIVITY_RANGE: (f64, f64) = (0.1, 1.0);
pub const DEFAULT_SENSITIVITY: f64 = 0.7;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnomalyForm {
    pub camera: String,
    pub analysis_type: String,
    /// Shown on the form only; the backend takes no sensitivity.
    #[serde(deserialize_with = "lenient_number")]
    pub sensitivity: Option<f64>,
}

impl Default for AnomalyForm {
    fn default() -> Self {
        Self {
            camera: "CAM-001".into(),
            analysis_type: ANALYSIS_TYPES[0].into(),
            sensitivity: None,
        }
    }
}

impl AnomalyForm {
    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
            .unwrap_or(DEFAULT_SENSITIVITY)
            .clamp(SENSITIVITY_RANGE.0, SENSITIVITY_RANGE.1)
    }

    pub fn request(&self) -> AnomalyRequest {
        AnomalyRequest {
            video_frame: MockMedia::default(),
            camera_metadata: CameraMetadata::new(&self.camera, camera_location(&self.camera)),
            analysis_type: self.analysis_type.clone(),
        }
    }
}

pub fn page(input: &AnomalyForm, last: Option<&Outcome>) -> Vec<Widget> {
    let mut main = vec![form(
        "/anomaly",
        "🔍 Run Anomaly Detection",
        vec![
            camera_select("Select Camera for Analysis", &input.camera),
            FormField::select("analysis_type", "Analysis Type", &ANALYSIS_TYPES, &input.analysis_type),
            FormField::number(
                "sensitivity",
                "Detection Sensitivity",
                input.sensitivity(),
                Some(SENSITIVITY_RANGE),
                0.1,
            ),
        ],
    )];
    main.extend(outcome(last, render));

    layout(
        "👁️ Multimodal Anomaly Detection",
        "Advanced AI-powered threat detection across multiple data sources",
        main,
        side_panel(),
    )
}

#[component]
pub fn AnomalyPage(input: AnomalyForm, last: Option<Outcome>) -> impl IntoView {
    view! { <Widgets items=page(&input, last.as_ref())/> }
}

pub fn render(result: &ApiResult) -> Vec<Widget> {
    if !result.success {
        return failure("Anomaly detection failed", result);
    }
    let data = result.lookup();
    let detection = data.node("detection");
    let summary = data.node("summary");

    let mut out = vec![
        Widget::notice(Tone::Success, "✅ Anomaly Detection Complete"),
        Widget::Metrics(vec![
            Metric::new("Anomalies Found", detection.text("anomaliesDetected", "0")),
            Metric::new("Critical Threats", detection.text("criticalThreats", "0")),
            Metric::new("Overall Threat", summary.text("overallThreatLevel", "NONE")),
            Metric::new(
                "Confidence",
                format!("{}%", summary.text("averageConfidence", "0")),
            ),
        ]),
    ];

    let anomalies: Vec<_> = data.items("anomalies").collect();
    if !anomalies.is_empty() {
        out.push(Widget::subheader("🚨 Detected Anomalies"));
    }
    for (i, anomaly) in anomalies.into_iter().enumerate() {
        let level = anomaly.text("threatLevel", "LOW");
        let level_notice = match level.as_str() {
            "CRITICAL" => Widget::notice(Tone::Error, format!("🔴 {level}")),
            "HIGH" => Widget::notice(Tone::Warning, format!("🟡 {level}")),
            _ => Widget::notice(Tone::Info, format!("🔵 {level}")),
        };
        let mut body = vec![
            Widget::Columns(vec![
                vec![level_notice],
                vec![Widget::Metrics(vec![Metric::new(
                    "Confidence",
                    percent(anomaly.float("confidence", 0.0)),
                )])],
                vec![Widget::Metrics(vec![Metric::new(
                    "Severity",
                    format!("{:.2}", anomaly.float("severity", 0.0)),
                )])],
            ]),
            Widget::field("Description", anomaly.text("description", "No description")),
            Widget::field("Location", anomaly.text("location", "Unknown")),
            Widget::field("Timestamp", anomaly.text("timestamp", "Unknown")),
        ];
        let actions = anomaly.strings("recommendedActions");
        if !actions.is_empty() {
            body.push(Widget::text("Recommended Actions:"));
            body.push(Widget::Bullets(actions));
        }
        out.push(Widget::Expander {
            title: format!("Anomaly {}: {}", i + 1, anomaly.text("type", "Unknown")),
            body,
        });
    }

    let next = data.strings("nextActions");
    if !next.is_empty() {
        out.push(Widget::subheader("🎯 Next Steps"));
        out.extend(next.into_iter().map(|a| Widget::notice(Tone::Info, format!("• {a}"))));
    }

    if summary.flag("recommendsAlert", false) {
        out.push(Widget::notice(
            Tone::Error,
            "🚨 ALERT RECOMMENDED - Immediate attention required",
        ));
    }
    out
}

fn side_panel() -> Vec<Widget> {
    let hours: Vec<String> = (0..ANOMALY_HISTORY.len()).map(|h| h.to_string()).collect();
    vec![
        Widget::subheader("📊 Detection Statistics"),
        Widget::Chart(Chart {
            title: "24-Hour Anomaly Detection Trends".into(),
            kind: ChartKind::Line,
            labels: hours,
            series: vec![
                Series {
                    name: "Anomalies".into(),
                    values: ANOMALY_HISTORY.iter().map(|(all, _)| *all as f64).collect(),
                },
                Series {
                    name: "Critical".into(),
                    values: ANOMALY_HISTORY.iter().map(|(_, c)| *c as f64).collect(),
                },
            ],
        }),
        Widget::Chart(chart::single(
            "Anomaly Types Distribution",
            ChartKind::Bar,
            "Count",
            ANOMALY_TYPES.iter().map(|(t, n)| (t.to_string(), *n)),
        )),
    ]
}
