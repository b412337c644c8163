//! Real-time dashboard tab, with the offline sample fallback.

use std::sync::Arc;

use leptos::prelude::*;

use drishti_common::config::Config;
use drishti_common::fixtures::{OFFLINE_DENSITY, OFFLINE_METRICS};
use drishti_common::lookup::Lookup;
use drishti_common::protocol::ApiResult;

use crate::components::widgets::Widgets;
use crate::components::{alerts, chart, map, metrics};
use crate::model::{ChartKind, Metric, Tone, Widget};
use crate::pages::percent;

#[component]
pub fn DashboardPage(result: ApiResult, config: Arc<Config>) -> impl IntoView {
    view! { <Widgets items=render(&result, &config)/> }
}

pub fn render(result: &ApiResult, config: &Config) -> Vec<Widget> {
    let mut out = vec![Widget::header("📊 Real-Time Dashboard")];
    if result.success {
        out.extend(live(result.lookup(), config));
    } else {
        out.push(Widget::notice(Tone::Error, "❌ Failed to load dashboard data"));
        if let Some(error) = &result.error {
            out.push(Widget::notice(Tone::Error, format!("Error: {error}")));
        }
        out.push(Widget::notice(Tone::Info, "📱 Running in offline mode with sample data"));
        out.extend(offline());
    }
    out
}

fn live(data: Lookup<'_>, config: &Config) -> Vec<Widget> {
    let summary = data.node("summary");
    let system = data.node("metrics");

    let headline = Widget::Metrics(vec![
        Metric::new(
            "Active Cameras",
            summary.first_int(&["activeCameras", "totalCameras"], 0),
        ),
        Metric::new(
            "Avg Crowd Density",
            percent(summary.float("avgCrowdDensity", 0.0)),
        ),
        Metric::new("Active Emergencies", summary.text("activeEmergencies", "0")),
        Metric::new(
            "Response Time",
            format!("{} min", system.text("operations.emergencyResponseTime", "5")),
        ),
    ]);

    let mut map_col = vec![Widget::subheader("🗺️ Situational Map")];
    map_col.extend(map::render(config));
    let mut alert_col = vec![Widget::subheader("🚨 Live Alerts")];
    alert_col.extend(alerts::render(data.list("alerts")));

    let mut out = vec![
        headline,
        Widget::Divider,
        Widget::Columns(vec![map_col, alert_col]),
        Widget::subheader("📈 System Metrics"),
    ];
    out.extend(metrics::render(system));
    out.push(Widget::subheader("🕒 Recent Activity"));
    out.push(recent_activity(data.node("recentActivity")));
    out
}

fn recent_activity(activity: Lookup<'_>) -> Widget {
    // (key, tone when present, label, tone when absent, text when absent)
    let entries = [
        ("lastAnalysis", Tone::Info, "🔍 Last Analysis", Tone::Info, "🔍 No recent analysis"),
        ("lastEmergency", Tone::Warning, "🚨 Last Emergency", Tone::Success, "🚨 No recent emergencies"),
        ("lastAlert", Tone::Error, "⚠️ Last Alert", Tone::Success, "⚠️ No recent alerts"),
    ];
    Widget::Columns(
        entries
            .into_iter()
            .map(|(key, tone, label, none_tone, none)| {
                if activity.truthy(key) {
                    vec![Widget::notice(tone, format!("{label}: {}", activity.text(key, "")))]
                } else {
                    vec![Widget::notice(none_tone, none)]
                }
            })
            .collect(),
    )
}

fn offline() -> Vec<Widget> {
    vec![
        Widget::Metrics(
            OFFLINE_METRICS
                .iter()
                .map(|(label, value)| Metric::new(*label, value))
                .collect(),
        ),
        Widget::Divider,
        Widget::Chart(chart::single(
            "Sample Crowd Density Over Time",
            ChartKind::Line,
            "Crowd Density",
            OFFLINE_DENSITY
                .iter()
                .enumerate()
                .map(|(hour, d)| (format!("{hour:02}:00"), *d)),
        )),
        Widget::notice(
            Tone::Info,
            "💡 This is sample data. Start the backend server to see live data.",
        ),
    ]
}
