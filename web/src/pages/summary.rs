//! AI situational intelligence tab.

use leptos::prelude::*;
use serde::Deserialize;

use drishti_common::fixtures::{TIME_WINDOWS, ZONES};
use drishti_common::protocol::{ApiResult, SummaryRequest, ValidationError};

use crate::components::widgets::Widgets;
use crate::model::{FormField, Metric, Tone, Widget};
use crate::pages::{failure, form, outcome, Outcome};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SummaryForm {
    pub query: String,
    pub zone: String,
    pub time_window: String,
    pub special_events: String,
}

impl Default for SummaryForm {
    fn default() -> Self {
        Self {
            query: String::new(),
            zone: ZONES[0].into(),
            time_window: TIME_WINDOWS[0].into(),
            special_events: String::new(),
        }
    }
}

impl SummaryForm {
    pub fn request(&self) -> Result<SummaryRequest, ValidationError> {
        let special_events = self.special_events.trim();
        let request = SummaryRequest {
            query: self.query.clone(),
            zone: self.zone.clone(),
            time_window: self.time_window.clone(),
            special_events: (!special_events.is_empty()).then(|| special_events.to_string()),
        };
        request.validate()?;
        Ok(request)
    }
}

pub fn page(input: &SummaryForm, last: Option<&Outcome>) -> Vec<Widget> {
    let mut out = vec![
        Widget::header("🧠 AI Situational Intelligence"),
        Widget::text("Generate comprehensive situational summaries using advanced AI"),
        form(
            "/summary",
            "🧠 Generate AI Summary",
            vec![
                FormField::text_area(
                    "query",
                    "Enter your situational query:",
                    &input.query,
                    "Example: Summarize security concerns in West Zone for the last hour",
                ),
                FormField::select("zone", "Zone", &ZONES, &input.zone),
                FormField::select("time_window", "Time Window", &TIME_WINDOWS, &input.time_window),
                FormField::text(
                    "special_events",
                    "Special Events (optional)",
                    &input.special_events,
                    "e.g., Concert, Sports event, Conference",
                ),
            ],
        ),
    ];
    out.extend(outcome(last, render));
    out
}

#[component]
pub fn SummaryPage(input: SummaryForm, last: Option<Outcome>) -> impl IntoView {
    view! { <Widgets items=page(&input, last.as_ref())/> }
}

pub fn render(result: &ApiResult) -> Vec<Widget> {
    if !result.success {
        return failure("Failed to generate summary", result);
    }
    let data = result.lookup();
    let briefing = data.node("briefing");
    let threat = briefing.node("threatAssessment");
    let intelligence = data.node("intelligence");
    let action_items = data.node("actionItems");

    let level = threat.text("level", "UNKNOWN");
    let level_notice = match level.as_str() {
        "RED" => Widget::notice(Tone::Error, format!("🔴 Threat Level: {level}")),
        "YELLOW" => Widget::notice(Tone::Warning, format!("🟡 Threat Level: {level}")),
        _ => Widget::notice(Tone::Success, format!("🟢 Threat Level: {level}")),
    };

    let mut out = vec![
        Widget::notice(Tone::Success, "✅ Summary Generated"),
        Widget::subheader("📋 Executive Summary"),
        Widget::text(briefing.text("executiveSummary", "No summary available")),
        Widget::subheader("🔍 Threat Assessment"),
        Widget::Columns(vec![
            vec![level_notice],
            vec![Widget::Metrics(vec![Metric::new(
                "Confidence",
                format!("{}%", intelligence.text("confidence", "0")),
            )])],
            vec![Widget::Metrics(vec![Metric::new(
                "Crowd Sentiment",
                intelligence.text("sentiment", "NEUTRAL"),
            )])],
        ]),
    ];

    let threats = threat.strings("immediateThreats");
    if !threats.is_empty() {
        out.push(Widget::subheader("⚠️ Immediate Threats"));
        out.extend(
            threats
                .into_iter()
                .map(|t| Widget::notice(Tone::Warning, format!("• {t}"))),
        );
    }

    out.push(Widget::subheader("🎯 Recommended Actions"));
    let groups = [
        ("immediate", "Immediate Actions", Tone::Error, "🚨"),
        ("planned", "Planned Actions", Tone::Warning, "⚠️"),
        ("monitoring", "Monitoring Actions", Tone::Info, "ℹ️"),
    ];
    for (key, title, tone, icon) in groups {
        let actions: Vec<_> = action_items.items(key).collect();
        if actions.is_empty() {
            continue;
        }
        out.push(Widget::text(format!("{title}:")));
        out.extend(actions.into_iter().map(|a| {
            Widget::notice(tone, format!("{icon} {}", a.text("action", "No action specified")))
        }));
    }

    out.push(Widget::subheader("📊 Data Sources"));
    out.push(Widget::text(data.strings("dataSourcesUsed").join(", ")));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::inspect;
    use serde_json::json;

    #[test]
    fn test_blank_query_rejected() {
        let input = SummaryForm {
            query: "   ".into(),
            ..SummaryForm::default()
        };
        assert_eq!(input.request().unwrap_err(), ValidationError::EmptyQuery);
    }

    #[test]
    fn test_request_payload() {
        let input = SummaryForm {
            query: "Summarize West Zone".into(),
            ..SummaryForm::default()
        };
        let body = serde_json::to_value(input.request().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({
                "query": "Summarize West Zone",
                "zone": "West Zone",
                "timeWindow": "last 15 minutes",
                "specialEvents": null,
            })
        );

        let input = SummaryForm {
            query: "q".into(),
            special_events: "Concert".into(),
            ..SummaryForm::default()
        };
        assert_eq!(
            input.request().unwrap().special_events.as_deref(),
            Some("Concert")
        );
    }

    #[test]
    fn test_success() {
        let result = ApiResult::from_body(json!({
            "success": true,
            "briefing": {
                "executiveSummary": "Crowd stable.",
                "threatAssessment": { "level": "YELLOW", "immediateThreats": ["Gate 3 congestion"] },
            },
            "intelligence": { "confidence": 82, "sentiment": "CALM" },
            "actionItems": {
                "immediate": [{ "action": "Deploy stewards" }],
                "monitoring": [{}],
            },
            "dataSourcesUsed": ["cctv", "social"],
        }))
        .unwrap();
        let widgets = render(&result);

        assert!(widgets.contains(&Widget::text("Crowd stable.")));
        assert!(inspect::has_notice(&widgets, Tone::Warning, "Threat Level: YELLOW"));
        assert_eq!(inspect::metric(&widgets, "Confidence").as_deref(), Some("82%"));
        assert_eq!(inspect::metric(&widgets, "Crowd Sentiment").as_deref(), Some("CALM"));
        assert!(inspect::has_notice(&widgets, Tone::Warning, "• Gate 3 congestion"));
        assert!(inspect::has_notice(&widgets, Tone::Error, "🚨 Deploy stewards"));
        assert!(inspect::has_notice(&widgets, Tone::Info, "No action specified"));
        assert!(!widgets.contains(&Widget::text("Planned Actions:")));
        assert!(widgets.contains(&Widget::text("cctv, social")));
    }

    #[test]
    fn test_defaults() {
        let result = ApiResult::from_body(json!({ "success": true })).unwrap();
        let widgets = render(&result);
        assert!(widgets.contains(&Widget::text("No summary available")));
        assert!(inspect::has_notice(&widgets, Tone::Success, "Threat Level: UNKNOWN"));
        assert_eq!(inspect::metric(&widgets, "Confidence").as_deref(), Some("0%"));
        assert_eq!(inspect::metric(&widgets, "Crowd Sentiment").as_deref(), Some("NEUTRAL"));
    }

    #[test]
    fn test_red_threat_and_failure() {
        let result = ApiResult::from_body(json!({
            "success": true,
            "briefing": { "threatAssessment": { "level": "RED" } },
        }))
        .unwrap();
        assert!(inspect::has_notice(&render(&result), Tone::Error, "Threat Level: RED"));

        let widgets = render(&ApiResult::failure("quota exceeded"));
        assert!(inspect::has_notice(&widgets, Tone::Error, "Failed to generate summary"));
        assert!(inspect::has_notice(&widgets, Tone::Error, "quota exceeded"));
    }
}
