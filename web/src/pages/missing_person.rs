//! Missing person search tab.

use leptos::prelude::*;
use serde::Deserialize;

use drishti_common::fixtures::{AGE_RANGES, PRIORITY_LEVELS, RECENT_SEARCHES, SEARCH_CASES, SEARCH_SUCCESS};
use drishti_common::protocol::{
    AdditionalDetails, ApiResult, ContactInfo, MissingPersonRequest, ValidationError,
};

use crate::components::chart;
use crate::components::widgets::Widgets;
use crate::model::{ChartKind, FormField, Metric, Table, Tone, Widget};
use crate::pages::{failure, form, layout, outcome, Outcome};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MissingPersonForm {
    pub description: String,
    pub last_location: String,
    pub urgency: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub photo_data: bool,
    pub age_range: String,
    pub clothing: String,
    pub features: String,
    pub medical: String,
}

impl Default for MissingPersonForm {
    fn default() -> Self {
        Self {
            description: String::new(),
            last_location: String::new(),
            urgency: PRIORITY_LEVELS[0].into(),
            contact_name: String::new(),
            contact_phone: String::new(),
            photo_data: false,
            age_range: AGE_RANGES[0].into(),
            clothing: String::new(),
            features: String::new(),
            medical: String::new(),
        }
    }
}

impl MissingPersonForm {
    pub fn request(&self) -> Result<MissingPersonRequest, ValidationError> {
        let request = MissingPersonRequest {
            description: self.description.clone(),
            last_known_location: self.last_location.clone(),
            urgency_level: self.urgency.clone(),
            contact_info: ContactInfo {
                name: self.contact_name.clone(),
                phone: self.contact_phone.clone(),
            },
            photo_data: self.photo_data,
            additional_details: AdditionalDetails {
                age_range: self.age_range.clone(),
                clothing_details: self.clothing.clone(),
                distinguishing_features: self.features.clone(),
                medical_conditions: self.medical.clone(),
            },
        };
        request.validate()?;
        Ok(request)
    }
}

pub fn page(input: &MissingPersonForm, last: Option<&Outcome>) -> Vec<Widget> {
    let mut main = vec![
        Widget::subheader("👤 Person Details"),
        form(
            "/missing-person",
            "🔍 Initiate Missing Person Search",
            vec![
                FormField::text_area(
                    "description",
                    "Physical Description",
                    &input.description,
                    "e.g., Adult male, approximately 30 years old, wearing red shirt and blue jeans, brown hair",
                ),
                FormField::text(
                    "last_location",
                    "Last Known Location",
                    &input.last_location,
                    "e.g., Near main entrance",
                ),
                FormField::select("urgency", "Urgency Level", &PRIORITY_LEVELS, &input.urgency),
                FormField::text(
                    "contact_name",
                    "Contact Person",
                    &input.contact_name,
                    "Name of person reporting",
                ),
                FormField::text("contact_phone", "Contact Phone", &input.contact_phone, "+1234567890"),
                FormField::checkbox("photo_data", "📷 Photo of the person on file", input.photo_data),
                FormField::select("age_range", "Age Range", &AGE_RANGES, &input.age_range),
                FormField::text(
                    "clothing",
                    "Clothing Details",
                    &input.clothing,
                    "Detailed clothing description",
                ),
                FormField::text(
                    "features",
                    "Distinguishing Features",
                    &input.features,
                    "Scars, tattoos, accessories, etc.",
                ),
                FormField::text(
                    "medical",
                    "Medical Conditions (if relevant)",
                    &input.medical,
                    "Any medical conditions that might affect behavior",
                ),
            ],
        ),
    ];
    main.extend(outcome(last, render));

    layout(
        "🔍 AI-Powered Missing Person Search",
        "Advanced facial recognition and behavioral analysis across camera network",
        main,
        side_panel(),
    )
}

#[component]
pub fn MissingPersonPage(input: MissingPersonForm, last: Option<Outcome>) -> impl IntoView {
    view! { <Widgets items=page(&input, last.as_ref())/> }
}

pub fn render(result: &ApiResult) -> Vec<Widget> {
    if !result.success {
        return failure("Search initiation failed", result);
    }
    let data = result.lookup();
    let search = data.node("search");
    let results = data.node("results");
    let status = data.node("searchStatus");

    let state = status.text("status", "unknown");
    let state_notice = if state == "active" {
        Widget::notice(Tone::Success, format!("🟢 Search Status: {}", state.to_uppercase()))
    } else {
        Widget::notice(Tone::Info, format!("🔵 Search Status: {}", state.to_uppercase()))
    };

    let mut out = vec![
        Widget::notice(Tone::Success, "✅ Search Initiated Successfully"),
        Widget::subheader("📋 Search Summary"),
        Widget::Metrics(vec![
            Metric::new("Person ID", search.text("personId", "Unknown")),
            Metric::new("Potential Matches", results.text("potentialMatches", "0")),
            Metric::new("High Confidence", results.text("highConfidenceMatches", "0")),
            Metric::new("Cameras Searched", results.text("camerasSearched", "0")),
        ]),
        Widget::subheader("📊 Search Status"),
        state_notice,
        Widget::field(
            "Estimated Completion",
            status.text("estimatedCompletion", "Unknown"),
        ),
        Widget::field("Search Coverage", results.text("searchCoverage", "Unknown")),
    ];

    let matches: Vec<_> = data.items("matches").collect();
    if matches.is_empty() {
        out.push(Widget::notice(Tone::Info, "No matches found in initial search"));
    } else {
        out.push(Widget::subheader("🎯 Potential Matches Found"));
    }
    for (i, found) in matches.into_iter().enumerate() {
        let confidence = found.float("confidence", 0.0);
        let shown = found.text("confidence", "0");
        let confidence_notice = if confidence >= 80.0 {
            Widget::notice(Tone::Success, format!("🟢 Confidence: {shown}%"))
        } else if confidence >= 60.0 {
            Widget::notice(Tone::Warning, format!("🟡 Confidence: {shown}%"))
        } else {
            Widget::notice(Tone::Info, format!("🔵 Confidence: {shown}%"))
        };

        let mut body = vec![
            Widget::Columns(vec![
                vec![confidence_notice],
                vec![Widget::field("Camera", found.text("cameraId", "Unknown"))],
                vec![Widget::field("Time", found.text("timestamp", "Unknown"))],
            ]),
            Widget::field("Location", found.text("location", "Unknown")),
            Widget::field("Description", found.text("description", "No description")),
        ];
        if found.flag("requiresVerification", true) {
            body.push(Widget::notice(Tone::Warning, "⚠️ Manual verification required"));
        }
        if found.flag("imageAvailable", false) {
            body.push(Widget::notice(Tone::Info, "📷 Camera image available for review"));
        }
        out.push(Widget::Expander {
            title: format!(
                "Match {} - {}",
                i + 1,
                found.text("location", "Unknown Location")
            ),
            body,
        });
    }

    let steps = data.strings("nextSteps");
    if !steps.is_empty() {
        out.push(Widget::subheader("🎯 Next Steps"));
        out.extend(steps.into_iter().map(|s| Widget::notice(Tone::Info, format!("• {s}"))));
    }

    if status.flag("alertsActivated", false) {
        out.push(Widget::notice(Tone::Success, "✅ Security alerts have been activated"));
    }
    if status.flag("publicAlertRecommended", false) {
        out.push(Widget::notice(
            Tone::Warning,
            "⚠️ Public alert system activation recommended",
        ));
    }
    out
}

fn side_panel() -> Vec<Widget> {
    vec![
        Widget::subheader("📊 Search Statistics"),
        Widget::Chart(chart::single(
            "Missing Person Cases - Last 30 Days",
            ChartKind::Bar,
            "Count",
            SEARCH_CASES.iter().map(|(s, n)| (s.to_string(), *n)),
        )),
        Widget::Chart(chart::single(
            "Search Success Rate by Urgency Level",
            ChartKind::Bar,
            "Success Rate %",
            SEARCH_SUCCESS.iter().map(|(u, pct)| (u.to_string(), *pct)),
        )),
        Widget::subheader("🕒 Recent Searches"),
        Widget::Table(Table {
            headers: ["Time", "Status", "Location"].map(String::from).to_vec(),
            rows: RECENT_SEARCHES
                .iter()
                .map(|(when, state, place)| [*when, *state, *place].map(String::from).to_vec())
                .collect(),
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::inspect;
    use serde_json::json;

    #[test]
    fn test_empty_description_rejected() {
        let input = MissingPersonForm::default();
        assert_eq!(input.request().unwrap_err(), ValidationError::EmptyDescription);
    }

    #[test]
    fn test_request_payload() {
        let input = MissingPersonForm {
            description: "Child, red jacket".into(),
            last_location: "Food Court".into(),
            urgency: "critical".into(),
            contact_name: "Dana".into(),
            contact_phone: "+15550100".into(),
            photo_data: true,
            clothing: "Red jacket".into(),
            ..MissingPersonForm::default()
        };
        let body = serde_json::to_value(input.request().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({
                "description": "Child, red jacket",
                "lastKnownLocation": "Food Court",
                "urgencyLevel": "critical",
                "contactInfo": { "name": "Dana", "phone": "+15550100" },
                "photoData": true,
                "additionalDetails": {
                    "ageRange": "Child (0-12)",
                    "clothingDetails": "Red jacket",
                    "distinguishingFeatures": "",
                    "medicalConditions": "",
                },
            })
        );
    }

    #[test]
    fn test_no_matches() {
        let result = ApiResult::from_body(json!({
            "success": true,
            "search": { "personId": "MP-7" },
            "matches": [],
        }))
        .unwrap();
        let widgets = render(&result);
        assert!(inspect::has_notice(&widgets, Tone::Info, "No matches found in initial search"));
        assert_eq!(inspect::metric(&widgets, "Person ID").as_deref(), Some("MP-7"));
        assert!(inspect::has_notice(&widgets, Tone::Info, "Search Status: UNKNOWN"));
        assert!(inspect::expander_titles(&widgets).is_empty());
    }

    #[test]
    fn test_matches() {
        let result = ApiResult::from_body(json!({
            "success": true,
            "results": { "potentialMatches": 3, "highConfidenceMatches": 1, "camerasSearched": 5, "searchCoverage": "85%" },
            "searchStatus": { "status": "active", "alertsActivated": true, "publicAlertRecommended": true },
            "matches": [
                { "confidence": 91, "cameraId": "CAM-002", "location": "Food Court", "requiresVerification": false, "imageAvailable": true },
                { "confidence": 64, "location": "Gate 2" },
                { "confidence": 40 },
            ],
            "nextSteps": ["Broadcast description"],
        }))
        .unwrap();
        let widgets = render(&result);

        assert!(inspect::has_notice(&widgets, Tone::Success, "Search Status: ACTIVE"));
        assert_eq!(
            inspect::expander_titles(&widgets),
            vec!["Match 1 - Food Court", "Match 2 - Gate 2", "Match 3 - Unknown Location"]
        );
        assert!(inspect::has_notice(&widgets, Tone::Success, "Confidence: 91%"));
        assert!(inspect::has_notice(&widgets, Tone::Warning, "Confidence: 64%"));
        assert!(inspect::has_notice(&widgets, Tone::Info, "Confidence: 40%"));
        // only the first match waives verification
        let verification = inspect::notices(&widgets)
            .into_iter()
            .filter(|(_, t)| t.contains("Manual verification required"))
            .count();
        assert_eq!(verification, 2);
        assert!(inspect::has_notice(&widgets, Tone::Info, "Camera image available"));
        assert!(inspect::has_notice(&widgets, Tone::Success, "Security alerts have been activated"));
        assert!(inspect::has_notice(&widgets, Tone::Warning, "Public alert system"));
        assert!(inspect::fields(&widgets).contains(&("Search Coverage".into(), "85%".into())));
    }

    #[test]
    fn test_failure() {
        let widgets = render(&ApiResult::failure("timed out after 20s"));
        assert!(inspect::has_notice(&widgets, Tone::Error, "Search initiation failed"));
        assert!(inspect::has_notice(&widgets, Tone::Error, "timed out after 20s"));
    }
}
