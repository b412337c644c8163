//! Top tab bar.

use leptos::prelude::*;

/// The six feature tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    CrowdAnalysis,
    AiSummary,
    EmergencyDispatch,
    AnomalyDetection,
    MissingPerson,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Self::Dashboard,
        Self::CrowdAnalysis,
        Self::AiSummary,
        Self::EmergencyDispatch,
        Self::AnomalyDetection,
        Self::MissingPerson,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::CrowdAnalysis => "/crowd",
            Self::AiSummary => "/summary",
            Self::EmergencyDispatch => "/dispatch",
            Self::AnomalyDetection => "/anomaly",
            Self::MissingPerson => "/missing-person",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "📊 Dashboard",
            Self::CrowdAnalysis => "🔮 Crowd Analysis",
            Self::AiSummary => "🧠 AI Summary",
            Self::EmergencyDispatch => "🚨 Emergency Dispatch",
            Self::AnomalyDetection => "👁️ Anomaly Detection",
            Self::MissingPerson => "🔍 Missing Person",
        }
    }
}

/// Tab bar with `active` highlighted.
#[component]
pub fn Nav(active: Tab) -> impl IntoView {
    let links = Tab::ALL
        .into_iter()
        .map(|tab| {
            let class = if tab == active { "tab active" } else { "tab" };
            view! { <a href=tab.path() class=class>{tab.label()}</a> }
        })
        .collect_view();

    view! { <nav class="tabs">{links}</nav> }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_tab_highlighted() {
        let html = view! { <Nav active=Tab::AnomalyDetection/> }.to_html();
        assert!(html.contains(r#"<a href="/anomaly" class="tab active">"#));
        assert!(html.contains(r#"<a href="/" class="tab">"#));
        assert_eq!(html.matches("<a ").count(), 6);
    }
}
