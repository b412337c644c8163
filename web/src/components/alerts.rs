//! Live alert feed.

use chrono::{DateTime, NaiveDateTime, Utc};
use leptos::prelude::*;
use serde_json::Value;

use drishti_common::lookup::Lookup;

use crate::model::{AlertCard, Tone, Widget};

/// One card per alert, or a "no active alerts" state for an empty list.
pub fn render(alerts: &[Value]) -> Vec<Widget> {
    if alerts.is_empty() {
        return vec![Widget::notice(Tone::Success, "✅ No active alerts")];
    }
    alerts
        .iter()
        .map(|alert| Widget::Alert(card(Lookup::new(alert))))
        .collect()
}

fn card(alert: Lookup<'_>) -> AlertCard {
    let priority = alert.text("priority", "LOW");
    let class = match priority.as_str() {
        "HIGH" => "alert-high",
        "MEDIUM" => "alert-medium",
        _ => "alert-low",
    };
    // only an absent key means "now"; an explicit null is unreadable
    let time = if alert.has_key("timestamp") {
        alert
            .get("timestamp")
            .and_then(Value::as_str)
            .and_then(clock_time)
            .unwrap_or_else(|| "Unknown".to_string())
    } else {
        Utc::now().format("%H:%M:%S").to_string()
    };

    AlertCard {
        class,
        priority,
        message: alert.text("message", "No message"),
        time,
        acknowledged: alert.flag("acknowledged", false),
    }
}

/// One alert card, styled by priority.
#[component]
pub fn AlertItem(card: AlertCard) -> impl IntoView {
    let state = if card.acknowledged {
        "✅ Acknowledged"
    } else {
        "⚠️ Pending"
    };
    view! {
        <div class=card.class>
            <strong>{format!("{} PRIORITY", card.priority)}</strong>
            <br/>
            {card.message}
            <br/>
            <small>{format!("{} {state}", card.time)}</small>
        </div>
    }
}

/// `HH:MM:SS` of an ISO-8601 timestamp, with or without an offset.
fn clock_time(timestamp: &str) -> Option<String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(dt.format("%H:%M:%S").to_string());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(timestamp, fmt).ok())
        .map(|dt| dt.format("%H:%M:%S").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cards(alerts: Value) -> Vec<AlertCard> {
        let list = alerts.as_array().cloned().unwrap_or_default();
        render(&list)
            .into_iter()
            .filter_map(|w| match w {
                Widget::Alert(card) => Some(card),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_empty_list_shows_no_active_alerts() {
        assert_eq!(
            render(&[]),
            vec![Widget::notice(Tone::Success, "✅ No active alerts")]
        );
    }

    #[test]
    fn test_high_priority_class() {
        let cards = cards(json!([{
            "priority": "HIGH",
            "message": "Crowd surge at Gate 2",
            "timestamp": "2024-05-01T14:03:09Z",
            "acknowledged": true,
        }]));
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].class, "alert-high");
        assert_eq!(cards[0].message, "Crowd surge at Gate 2");
        assert_eq!(cards[0].time, "14:03:09");
        assert!(cards[0].acknowledged);
    }

    #[test]
    fn test_defaults_and_classes() {
        let cards = cards(json!([
            { "priority": "MEDIUM", "timestamp": "yesterday" },
            { "timestamp": "2024-05-01T08:15:00.123" },
            { "priority": "CRITICAL", "timestamp": 12 },
            { "priority": "HIGH", "timestamp": null },
        ]));
        assert_eq!(cards[0].class, "alert-medium");
        assert_eq!(cards[0].time, "Unknown");
        assert_eq!(cards[0].message, "No message");
        assert!(!cards[0].acknowledged);

        assert_eq!(cards[1].priority, "LOW");
        assert_eq!(cards[1].class, "alert-low");
        assert_eq!(cards[1].time, "08:15:00");

        assert_eq!(cards[2].class, "alert-low");
        assert_eq!(cards[2].time, "Unknown");

        assert_eq!(cards[3].class, "alert-high");
        assert_eq!(cards[3].time, "Unknown");
    }

    #[test]
    fn test_missing_timestamp_uses_now() {
        let cards = cards(json!([{ "priority": "HIGH" }]));
        assert_eq!(cards[0].time.len(), 8);
        assert_ne!(cards[0].time, "Unknown");
    }

    #[test]
    fn test_clock_time_with_offset() {
        assert_eq!(clock_time("2024-05-01T23:59:58+05:30").as_deref(), Some("23:59:58"));
        assert_eq!(clock_time("not a time"), None);
    }

    #[test]
    fn test_card_markup() {
        let card = AlertCard {
            class: "alert-high",
            priority: "HIGH".into(),
            message: "Gate <2> congestion".into(),
            time: "10:00:00".into(),
            acknowledged: false,
        };
        let html = view! { <AlertItem card=card/> }.to_html();
        assert!(html.starts_with(r#"<div class="alert-high"><strong>HIGH PRIORITY</strong>"#));
        assert!(html.contains("Gate &lt;2&gt; congestion"));
        assert!(html.contains("<small>10:00:00 ⚠️ Pending</small>"));
    }
}
