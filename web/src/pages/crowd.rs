//! Predictive crowd analysis tab.

use leptos::prelude::*;
use serde::Deserialize;

use drishti_common::fixtures::crowd_history;
use drishti_common::protocol::{ApiResult, CameraMetadata, CrowdAnalysisRequest, MockMedia};

use crate::components::chart;
use crate::components::widgets::Widgets;
use crate::model::{ChartKind, FormField, Metric, Tone, Widget};
use crate::pages::{
    camera_location, camera_select, failure, form, layout, lenient_number, outcome, percent,
    Outcome,
};

pub const COVERAGE_RANGE: (u32, u32) = (500, 2000);
pub const DEFAULT_COVERAGE: u32 = 1000;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrowdForm {
    pub camera: String,
    #[serde(deserialize_with = "lenient_number")]
    pub coverage: Option<u32>,
}

impl Default for CrowdForm {
    fn default() -> Self {
        Self {
            camera: "CAM-001".into(),
            coverage: None,
        }
    }
}

impl CrowdForm {
    /// Coverage in square meters, defaulted and clamped to the slider range.
    pub fn coverage(&self) -> u32 {
        self.coverage
            .unwrap_or(DEFAULT_COVERAGE)
            .clamp(COVERAGE_RANGE.0, COVERAGE_RANGE.1)
    }

    pub fn request(&self) -> CrowdAnalysisRequest {
        let mut meta = CameraMetadata::new(&self.camera, camera_location(&self.camera));
        meta.coverage_area_sq_meters = Some(self.coverage());
        CrowdAnalysisRequest {
            video_feed: MockMedia::default(),
            camera_metadata: meta,
        }
    }
}

pub fn page(input: &CrowdForm, last: Option<&Outcome>) -> Vec<Widget> {
    let mut main = vec![form(
        "/crowd",
        "🔍 Analyze Crowd Dynamics",
        vec![
            camera_select("Select Camera", &input.camera),
            FormField::number(
                "coverage",
                "Coverage Area (sq meters)",
                input.coverage() as f64,
                Some((COVERAGE_RANGE.0 as f64, COVERAGE_RANGE.1 as f64)),
                1.0,
            ),
        ],
    )];
    main.extend(outcome(last, render));

    layout(
        "🔮 Predictive Crowd Analysis",
        "AI-powered crowd dynamics analysis with 15-20 minute predictions",
        main,
        side_panel(),
    )
}

#[component]
pub fn CrowdPage(input: CrowdForm, last: Option<Outcome>) -> impl IntoView {
    view! { <Widgets items=page(&input, last.as_ref())/> }
}

pub fn render(result: &ApiResult) -> Vec<Widget> {
    if !result.success {
        return failure("Analysis failed", result);
    }
    let analysis = result.lookup().node("analysis");
    let current = analysis.node("currentMetrics");
    let predictions = analysis.node("predictions");

    let mut out = vec![
        Widget::notice(Tone::Success, "✅ Analysis Complete"),
        Widget::Metrics(vec![
            Metric::new("People Count", current.text("peopleCount", "0")),
            Metric::new("Density", percent(current.float("density", 0.0))),
            Metric::new("Alert Level", analysis.text("alertLevel", "LOW")),
            Metric::new("Confidence", percent(predictions.float("confidence", 0.0))),
        ]),
        Widget::subheader("🔮 Predictions"),
    ];

    if predictions.truthy("timeToBottleneck") {
        out.push(Widget::notice(
            Tone::Warning,
            format!(
                "⚠️ Bottleneck predicted in {} minutes",
                predictions.text("timeToBottleneck", "")
            ),
        ));
    } else {
        out.push(Widget::notice(
            Tone::Success,
            "✅ No immediate bottleneck risk detected",
        ));
    }

    let actions: Vec<_> = analysis.items("proactiveActions.actions").collect();
    if !actions.is_empty() {
        out.push(Widget::subheader("🎯 Recommended Actions"));
        out.extend(actions.into_iter().map(|action| {
            let priority = action.text("priority", "LOW");
            let text = action.text("action", "No action specified");
            match priority.as_str() {
                "CRITICAL" => Widget::notice(Tone::Error, format!("🚨 {priority}: {text}")),
                "HIGH" => Widget::notice(Tone::Warning, format!("⚠️ {priority}: {text}")),
                _ => Widget::notice(Tone::Info, format!("ℹ️ {priority}: {text}")),
            }
        }));
    }
    out
}

fn side_panel() -> Vec<Widget> {
    let history = crowd_history();
    let label = |hours_ago: u32| {
        if hours_ago == 0 {
            "now".to_string()
        } else {
            format!("-{hours_ago}h")
        }
    };

    vec![
        Widget::subheader("📊 Historical Data"),
        Widget::Chart(chart::single(
            "24-Hour Crowd Trends",
            ChartKind::Line,
            "People Count",
            history.iter().map(|s| (label(s.hours_ago), s.people as f64)),
        )),
        Widget::Chart(chart::single(
            "Crowd Density Over Time",
            ChartKind::Line,
            "Density",
            history.iter().map(|s| (label(s.hours_ago), s.density)),
        )),
    ]
}
