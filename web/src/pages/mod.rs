//! One module per dashboard tab.
//!
//! Feature tabs share the same shape: a form, the outcome of the last
//! submission, and a side panel of fixture statistics.

pub mod anomaly;
pub mod crowd;
pub mod dashboard;
pub mod dispatch;
pub mod missing_person;
pub mod summary;

use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use drishti_common::fixtures::CAMERAS;
use drishti_common::protocol::{ApiResult, ValidationError};

use crate::model::{Form, FormField, Tone, Widget};

/// What happened to a submitted form.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Rejected locally; the backend was not called.
    Invalid(ValidationError),
    Response(ApiResult),
}

/// Widgets for a submission outcome; nothing before the first submit.
pub(crate) fn outcome(
    outcome: Option<&Outcome>,
    render: impl Fn(&ApiResult) -> Vec<Widget>,
) -> Vec<Widget> {
    match outcome {
        None => vec![],
        Some(Outcome::Invalid(e)) => vec![Widget::notice(Tone::Error, e.to_string())],
        Some(Outcome::Response(result)) => render(result),
    }
}

/// Standard failure display: headline plus the error when there is one.
pub(crate) fn failure(headline: &str, result: &ApiResult) -> Vec<Widget> {
    let mut out = vec![Widget::notice(Tone::Error, format!("❌ {headline}"))];
    if let Some(error) = &result.error {
        out.push(Widget::notice(Tone::Error, format!("Error: {error}")));
    }
    out
}

/// Two-thirds form and results, one-third statistics.
pub(crate) fn layout(
    header: &str,
    intro: &str,
    main: Vec<Widget>,
    side: Vec<Widget>,
) -> Vec<Widget> {
    vec![
        Widget::header(header),
        Widget::text(intro),
        Widget::Columns(vec![main, side]),
    ]
}

pub(crate) fn form(action: &str, submit: &str, fields: Vec<FormField>) -> Widget {
    Widget::Form(Form {
        action: action.into(),
        submit: submit.into(),
        fields,
    })
}

/// Number inputs post an empty string when cleared; that, or anything
/// unparsable, reads as absent so the field falls back to its default.
pub(crate) fn lenient_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse().ok()))
}

/// Camera picker showing `id - name`.
pub(crate) fn camera_select(label: &str, selected: &str) -> FormField {
    FormField::select_labelled(
        "camera",
        label,
        CAMERAS
            .iter()
            .map(|c| (c.id.to_string(), format!("{} - {}", c.id, c.name)))
            .collect(),
        selected,
    )
}

/// Display name of a camera, or the id itself when unknown.
pub(crate) fn camera_location(id: &str) -> String {
    drishti_common::fixtures::camera(id)
        .map(|c| c.name.to_string())
        .unwrap_or_else(|| id.to_string())
}

/// `int(fraction * 100)%`
pub(crate) fn percent(fraction: f64) -> String {
    format!("{}%", (fraction * 100.0).trunc() as i64)
}
