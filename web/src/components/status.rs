//! Sidebar control panel: backend health, refresh controls, quick actions.

use leptos::prelude::*;

use drishti_common::protocol::{ApiResult, HealthStatus};

use crate::components::widgets::Widgets;
use crate::model::{Form, Tone, Widget};

/// Backend status from a fresh health call.
pub fn health(result: &ApiResult, api_base_url: &str) -> Vec<Widget> {
    let mut out = vec![Widget::subheader("System Status")];

    let Some(status) = HealthStatus::from_result(result) else {
        out.push(Widget::notice(Tone::Error, "❌ Backend Offline"));
        if let Some(error) = &result.error {
            out.push(Widget::notice(Tone::Error, format!("Error: {error}")));
        }
        out.push(Widget::notice(
            Tone::Info,
            format!("💡 Make sure the backend server is running on {api_base_url}"),
        ));
        return out;
    };

    if status.is_healthy() {
        out.push(Widget::notice(Tone::Success, "✅ System Healthy"));
    } else {
        out.push(Widget::notice(Tone::Warning, "⚠️ Configuration Needed"));
    }
    out.extend(status.configuration.iter().map(|(service, ok)| {
        if *ok {
            Widget::notice(Tone::Success, format!("✅ {service}"))
        } else {
            Widget::notice(Tone::Error, format!("❌ {service}"))
        }
    }));
    out
}

/// Auto-refresh toggle and manual refresh for the page at `path`.
///
/// Auto refresh is a browser-side reload, so it only runs while the page
/// is open.
pub fn refresh_controls(path: &str, auto_refresh: bool, interval_secs: u64) -> Vec<Widget> {
    let toggle = if auto_refresh {
        Widget::Link {
            href: path.to_string(),
            text: format!("☑ 🔄 Auto Refresh ({interval_secs}s)"),
        }
    } else {
        Widget::Link {
            href: format!("{path}?auto=1"),
            text: format!("☐ 🔄 Auto Refresh ({interval_secs}s)"),
        }
    };
    let current = if auto_refresh {
        format!("{path}?auto=1")
    } else {
        path.to_string()
    };
    vec![
        Widget::Divider,
        toggle,
        Widget::Link {
            href: current,
            text: "🔄 Refresh Now".into(),
        },
        Widget::Divider,
    ]
}

/// Operator shortcuts.  They only acknowledge locally; nothing is sent to
/// the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    EmergencyAlert,
    ExportData,
    Diagnostics,
}

impl QuickAction {
    pub const ALL: [QuickAction; 3] = [Self::EmergencyAlert, Self::ExportData, Self::Diagnostics];

    pub fn slug(&self) -> &'static str {
        match self {
            Self::EmergencyAlert => "emergency-alert",
            Self::ExportData => "export-data",
            Self::Diagnostics => "diagnostics",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.slug() == slug)
    }

    fn button(&self) -> &'static str {
        match self {
            Self::EmergencyAlert => "🚨 Emergency Alert",
            Self::ExportData => "📊 Export Data",
            Self::Diagnostics => "🔧 System Diagnostics",
        }
    }

    /// Acknowledgement shown after the button is pressed.
    pub fn acknowledgement(&self) -> Widget {
        match self {
            Self::EmergencyAlert => Widget::notice(Tone::Error, "🚨 Emergency alert activated!"),
            Self::ExportData => Widget::notice(Tone::Success, "📊 Data export initiated"),
            Self::Diagnostics => Widget::notice(Tone::Info, "🔧 Running diagnostics..."),
        }
    }
}

pub fn quick_actions() -> Vec<Widget> {
    let mut out = vec![Widget::subheader("⚡ Quick Actions")];
    out.extend(QuickAction::ALL.iter().map(|action| {
        Widget::Form(Form {
            action: format!("/quick/{}", action.slug()),
            submit: action.button().into(),
            fields: vec![],
        })
    }));
    out
}

/// The whole sidebar: health, refresh controls, quick actions and the
/// acknowledgement of the last quick action, if any.
#[component]
pub fn ControlPanel(
    health_result: ApiResult,
    api_base_url: String,
    /// Path of the page the panel sits on.
    path: &'static str,
    auto_refresh: bool,
    interval_secs: u64,
    acknowledgement: Option<Widget>,
) -> impl IntoView {
    let mut items = health(&health_result, &api_base_url);
    items.extend(refresh_controls(path, auto_refresh, interval_secs));
    items.extend(quick_actions());
    items.extend(acknowledgement);

    view! {
        <h1 class="sidebar-title">"🎛️ Control Panel"</h1>
        <Widgets items=items/>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::inspect;
    use serde_json::json;

    #[test]
    fn test_one_indicator_per_service() {
        let result = ApiResult::from_health_body(json!({
            "status": "healthy",
            "configuration": { "gemini": true, "maps": false },
        }))
        .unwrap();
        let widgets = health(&result, "http://localhost:3001");
        let notices = inspect::notices(&widgets);
        let services: Vec<_> = notices.iter().skip(1).cloned().collect();
        assert_eq!(
            services,
            vec![
                (Tone::Success, "✅ gemini".to_string()),
                (Tone::Error, "❌ maps".to_string()),
            ]
        );
        assert_eq!(notices[0], (Tone::Success, "✅ System Healthy".to_string()));
    }

    #[test]
    fn test_unhealthy_status() {
        let result = ApiResult::from_health_body(json!({ "status": "degraded" })).unwrap();
        let widgets = health(&result, "http://localhost:3001");
        assert!(inspect::has_notice(&widgets, Tone::Warning, "Configuration Needed"));
        assert_eq!(inspect::notices(&widgets).len(), 1);
    }

    #[test]
    fn test_offline() {
        let result = ApiResult::failure("GET /api/health failed: connection refused");
        let widgets = health(&result, "http://localhost:3001");
        assert!(inspect::has_notice(&widgets, Tone::Error, "Backend Offline"));
        assert!(inspect::has_notice(&widgets, Tone::Error, "connection refused"));
        assert!(inspect::has_notice(&widgets, Tone::Info, "http://localhost:3001"));
    }

    #[test]
    fn test_refresh_controls() {
        let off = refresh_controls("/crowd", false, 30);
        assert!(off.contains(&Widget::Link {
            href: "/crowd?auto=1".into(),
            text: "☐ 🔄 Auto Refresh (30s)".into(),
        }));
        let on = refresh_controls("/crowd", true, 30);
        assert!(on.contains(&Widget::Link {
            href: "/crowd".into(),
            text: "☑ 🔄 Auto Refresh (30s)".into(),
        }));
    }

    #[test]
    fn test_quick_action_slugs() {
        for action in QuickAction::ALL {
            assert_eq!(QuickAction::from_slug(action.slug()), Some(action));
        }
        assert_eq!(QuickAction::from_slug("self-destruct"), None);
    }

    #[test]
    fn test_control_panel() {
        let html = view! {
            <ControlPanel
                health_result=ApiResult::failure("connection refused")
                api_base_url="http://localhost:3001".to_string()
                path="/summary"
                auto_refresh=false
                interval_secs=30
                acknowledgement={Some(QuickAction::Diagnostics.acknowledgement())}
            />
        }
        .to_html();
        assert!(html.starts_with(r#"<h1 class="sidebar-title">"#));
        assert!(html.contains("❌ Backend Offline"));
        assert!(html.contains(r#"href="/summary?auto=1""#));
        assert_eq!(html.matches(r#"action="/quick/"#).count(), 3);
        assert!(html.contains("🔧 Running diagnostics..."));
    }
}
