//! View model shared by every renderer.
//!
//! Renderers are pure functions that turn a backend result into a list of
//! [`Widget`]s; the `Widgets` component turns them into markup.  Renderer
//! tests assert on widgets, never on HTML strings.

// ─── Basic widgets ───────────────────────────────────────────────────────────

/// Colour of a notice box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Info,
    Warning,
    Error,
}

impl Tone {
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Success => "notice notice-success",
            Self::Info => "notice notice-info",
            Self::Warning => "notice notice-warning",
            Self::Error => "notice notice-error",
        }
    }
}

/// A labelled headline number.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

impl Metric {
    pub fn new(label: impl Into<String>, value: impl ToString) -> Self {
        Self {
            label: label.into(),
            value: value.to_string(),
        }
    }
}

/// One entry of the live alert feed.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertCard {
    /// `alert-high`, `alert-medium` or `alert-low`.
    pub class: &'static str,
    pub priority: String,
    pub message: String,
    /// `HH:MM:SS` or `Unknown`.
    pub time: String,
    pub acknowledged: bool,
}

// ─── Charts / tables / map ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub kind: ChartKind,
    /// X-axis labels, one per value in every series.
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: String,
    pub label: String,
    pub detail: String,
    pub lat: f64,
    pub lng: f64,
    pub color: &'static str,
    pub icon: MarkerIcon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerIcon {
    Camera,
    Incident,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub markers: Vec<Marker>,
    /// Tile-service image, present only when a maps key is configured.
    pub static_image_url: Option<String>,
}

// ─── Forms ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Text {
        value: String,
        placeholder: String,
    },
    TextArea {
        value: String,
        placeholder: String,
    },
    Number {
        value: f64,
        min: Option<f64>,
        max: Option<f64>,
        step: f64,
    },
    Select {
        /// (value, label)
        options: Vec<(String, String)>,
        selected: String,
    },
    Checkbox {
        checked: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: &'static str,
    pub label: String,
    pub input: Input,
}

impl FormField {
    pub fn text(name: &'static str, label: &str, value: &str, placeholder: &str) -> Self {
        Self {
            name,
            label: label.into(),
            input: Input::Text {
                value: value.into(),
                placeholder: placeholder.into(),
            },
        }
    }

    pub fn text_area(name: &'static str, label: &str, value: &str, placeholder: &str) -> Self {
        Self {
            name,
            label: label.into(),
            input: Input::TextArea {
                value: value.into(),
                placeholder: placeholder.into(),
            },
        }
    }

    /// Select whose values double as labels.
    pub fn select(name: &'static str, label: &str, options: &[&str], selected: &str) -> Self {
        Self::select_labelled(
            name,
            label,
            options.iter().map(|o| (o.to_string(), o.to_string())).collect(),
            selected,
        )
    }

    pub fn select_labelled(
        name: &'static str,
        label: &str,
        options: Vec<(String, String)>,
        selected: &str,
    ) -> Self {
        Self {
            name,
            label: label.into(),
            input: Input::Select {
                options,
                selected: selected.into(),
            },
        }
    }

    pub fn number(
        name: &'static str,
        label: &str,
        value: f64,
        range: Option<(f64, f64)>,
        step: f64,
    ) -> Self {
        Self {
            name,
            label: label.into(),
            input: Input::Number {
                value,
                min: range.map(|r| r.0),
                max: range.map(|r| r.1),
                step,
            },
        }
    }

    pub fn checkbox(name: &'static str, label: &str, checked: bool) -> Self {
        Self {
            name,
            label: label.into(),
            input: Input::Checkbox { checked },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    pub action: String,
    pub submit: String,
    pub fields: Vec<FormField>,
}

// ─── Widget tree ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Header(String),
    Subheader(String),
    Text(String),
    /// `**label:** value`
    Field {
        label: String,
        value: String,
    },
    Notice {
        tone: Tone,
        text: String,
    },
    Metrics(Vec<Metric>),
    Bullets(Vec<String>),
    Numbered(Vec<String>),
    Alert(AlertCard),
    Expander {
        title: String,
        body: Vec<Widget>,
    },
    Columns(Vec<Vec<Widget>>),
    Chart(Chart),
    Table(Table),
    Map(MapView),
    Form(Form),
    Link {
        href: String,
        text: String,
    },
    Divider,
}

impl Widget {
    pub fn notice(tone: Tone, text: impl Into<String>) -> Self {
        Self::Notice {
            tone,
            text: text.into(),
        }
    }

    pub fn field(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Field {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn header(text: impl Into<String>) -> Self {
        Self::Header(text.into())
    }

    pub fn subheader(text: impl Into<String>) -> Self {
        Self::Subheader(text.into())
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

/// Depth-first iteration helpers used by the renderer tests.
#[cfg(test)]
pub(crate) mod inspect {
    use super::*;

    pub fn flatten(widgets: &[Widget]) -> Vec<&Widget> {
        let mut out = Vec::new();
        for w in widgets {
            out.push(w);
            match w {
                Widget::Expander { body, .. } => out.extend(flatten(body)),
                Widget::Columns(cols) => {
                    for col in cols {
                        out.extend(flatten(col));
                    }
                }
                _ => {}
            }
        }
        out
    }

    pub fn notices(widgets: &[Widget]) -> Vec<(Tone, String)> {
        flatten(widgets)
            .into_iter()
            .filter_map(|w| match w {
                Widget::Notice { tone, text } => Some((*tone, text.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn metrics(widgets: &[Widget]) -> Vec<(String, String)> {
        flatten(widgets)
            .into_iter()
            .filter_map(|w| match w {
                Widget::Metrics(m) => Some(m),
                _ => None,
            })
            .flatten()
            .map(|m| (m.label.clone(), m.value.clone()))
            .collect()
    }

    pub fn metric(widgets: &[Widget], label: &str) -> Option<String> {
        metrics(widgets)
            .into_iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v)
    }

    pub fn has_notice(widgets: &[Widget], tone: Tone, needle: &str) -> bool {
        notices(widgets)
            .iter()
            .any(|(t, text)| *t == tone && text.contains(needle))
    }

    pub fn fields(widgets: &[Widget]) -> Vec<(String, String)> {
        flatten(widgets)
            .into_iter()
            .filter_map(|w| match w {
                Widget::Field { label, value } => Some((label.clone(), value.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn expander_titles(widgets: &[Widget]) -> Vec<String> {
        flatten(widgets)
            .into_iter()
            .filter_map(|w| match w {
                Widget::Expander { title, .. } => Some(title.clone()),
                _ => None,
            })
            .collect()
    }
}
