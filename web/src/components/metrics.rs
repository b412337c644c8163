//! System performance metrics block of the dashboard.

use leptos::prelude::*;

use drishti_common::lookup::Lookup;

use crate::model::{Metric, Tone, Widget};

/// Three metric groups (crowd, security, operations) from the dashboard's
/// `metrics` object.
pub fn render(metrics: Lookup<'_>) -> Vec<Widget> {
    if !metrics.is_populated() {
        return vec![Widget::notice(Tone::Info, "No metrics data available")];
    }

    let crowd = metrics.node("crowdAnalysis");
    let security = metrics.node("security");
    let ops = metrics.node("operations");

    vec![Widget::Columns(vec![
        vec![
            Widget::subheader("👥 Crowd Analysis"),
            Widget::Metrics(vec![
                Metric::new("People Detected", crowd.text("totalPeopleDetected", "0")),
                Metric::new(
                    "Average Density",
                    format!("{}%", crowd.text("averageDensity", "0")),
                ),
                Metric::new("Flow Rate", crowd.text("flowRate", "NORMAL")),
            ]),
        ],
        vec![
            Widget::subheader("🔒 Security"),
            Widget::Metrics(vec![
                Metric::new("Anomalies Detected", security.text("anomaliesDetected", "0")),
                Metric::new("Threat Level", security.text("threatLevel", "LOW")),
                Metric::new(
                    "Response Time",
                    format!("{} min", security.text("responseTime", "0")),
                ),
            ]),
        ],
        vec![
            Widget::subheader("🚨 Operations"),
            Widget::Metrics(vec![
                Metric::new("Active Incidents", ops.text("activeIncidents", "0")),
                Metric::new("Units Available", ops.text("unitsAvailable", "0")),
                Metric::new("System Uptime", ops.text("systemUptime", "99.9%")),
            ]),
        ],
    ])]
}

/// A row of headline number cards.
#[component]
pub fn MetricRow(metrics: Vec<Metric>) -> impl IntoView {
    let cards = metrics
        .into_iter()
        .map(|m| {
            view! {
                <div class="metric-card">
                    <span class="metric-label">{m.label}</span>
                    <span class="metric-value">{m.value}</span>
                </div>
            }
        })
        .collect_view();
    view! { <div class="metric-row">{cards}</div> }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::inspect;
    use serde_json::json;

    #[test]
    fn test_empty_metrics() {
        let v = json!({});
        let widgets = render(Lookup::new(&v));
        assert!(inspect::has_notice(&widgets, Tone::Info, "No metrics data available"));
    }

    #[test]
    fn test_partial_metrics_use_defaults() {
        let v = json!({
            "crowdAnalysis": { "totalPeopleDetected": 1520, "averageDensity": 38 },
            "security": { "threatLevel": "ELEVATED" },
        });
        let widgets = render(Lookup::new(&v));
        assert_eq!(inspect::metric(&widgets, "People Detected").as_deref(), Some("1520"));
        assert_eq!(inspect::metric(&widgets, "Average Density").as_deref(), Some("38%"));
        assert_eq!(inspect::metric(&widgets, "Flow Rate").as_deref(), Some("NORMAL"));
        assert_eq!(inspect::metric(&widgets, "Threat Level").as_deref(), Some("ELEVATED"));
        assert_eq!(inspect::metric(&widgets, "Response Time").as_deref(), Some("0 min"));
        assert_eq!(inspect::metric(&widgets, "System Uptime").as_deref(), Some("99.9%"));
        assert_eq!(inspect::metrics(&widgets).len(), 9);
    }

    #[test]
    fn test_metric_row_markup() {
        let html = view! {
            <MetricRow metrics={vec![Metric::new("Incident ID", "<INC-9>"), Metric::new("ETA", "3 min")]}/>
        }
        .to_html();
        assert!(html.starts_with(r#"<div class="metric-row">"#));
        assert_eq!(html.matches(r#"<div class="metric-card">"#).count(), 2);
        assert!(html.contains(r#"<span class="metric-value">&lt;INC-9&gt;</span>"#));
        assert!(html.contains(r#"<span class="metric-label">ETA</span>"#));
    }
}
