//! Renders the view model.
//!
//! Every page body and the sidebar are `Vec<Widget>`; this is the one place
//! that turns widgets into elements.

use leptos::prelude::*;

use crate::components::alerts::AlertItem;
use crate::components::chart::ChartView;
use crate::components::map::SituationMap;
use crate::components::metrics::MetricRow;
use crate::model::{Form, FormField, Input, Table, Widget};

/// A widget list, in order.
#[component]
pub fn Widgets(items: Vec<Widget>) -> impl IntoView {
    items.into_iter().map(widget).collect_view()
}

fn widget(w: Widget) -> AnyView {
    match w {
        Widget::Header(text) => view! { <h2>{text}</h2> }.into_any(),
        Widget::Subheader(text) => view! { <h3>{text}</h3> }.into_any(),
        Widget::Text(text) => view! { <p>{text}</p> }.into_any(),
        Widget::Field { label, value } => view! {
            <p><strong>{format!("{label}:")}</strong>{format!(" {value}")}</p>
        }
        .into_any(),
        Widget::Notice { tone, text } => view! { <div class=tone.css_class()>{text}</div> }.into_any(),
        Widget::Metrics(metrics) => view! { <MetricRow metrics=metrics/> }.into_any(),
        Widget::Bullets(items) => view! { <ul>{list_items(items)}</ul> }.into_any(),
        Widget::Numbered(items) => view! { <ol>{list_items(items)}</ol> }.into_any(),
        Widget::Alert(card) => view! { <AlertItem card=card/> }.into_any(),
        Widget::Expander { title, body } => view! {
            <details class="expander">
                <summary>{title}</summary>
                {body.into_iter().map(widget).collect_view()}
            </details>
        }
        .into_any(),
        Widget::Columns(cols) => {
            let class = format!("columns cols-{}", cols.len());
            let cols = cols
                .into_iter()
                .map(|col| view! { <div class="column">{col.into_iter().map(widget).collect_view()}</div> })
                .collect_view();
            view! { <div class=class>{cols}</div> }.into_any()
        }
        Widget::Chart(chart) => view! { <ChartView chart=chart/> }.into_any(),
        Widget::Table(table) => view! { <DataTable table=table/> }.into_any(),
        Widget::Map(map) => view! { <SituationMap map=map/> }.into_any(),
        Widget::Form(form) => view! { <FormView form=form/> }.into_any(),
        Widget::Link { href, text } => view! { <a class="button-link" href=href>{text}</a> }.into_any(),
        Widget::Divider => view! { <hr/> }.into_any(),
    }
}

fn list_items(items: Vec<String>) -> impl IntoView {
    items
        .into_iter()
        .map(|item| view! { <li>{item}</li> })
        .collect_view()
}

#[component]
fn DataTable(table: Table) -> impl IntoView {
    let headers = table
        .headers
        .into_iter()
        .map(|h| view! { <th>{h}</th> })
        .collect_view();
    let rows = table
        .rows
        .into_iter()
        .map(|row| {
            let cells = row.into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view();
            view! { <tr>{cells}</tr> }
        })
        .collect_view();

    view! {
        <table class="data-table">
            <thead><tr>{headers}</tr></thead>
            <tbody>{rows}</tbody>
        </table>
    }
}

/// A POST form; an empty field list gives a lone button.
#[component]
fn FormView(form: Form) -> impl IntoView {
    let fields = form.fields.into_iter().map(form_field).collect_view();
    view! {
        <form method="post" action=form.action class="form">
            {fields}
            <button type="submit" class="btn btn-primary">{form.submit}</button>
        </form>
    }
}

fn form_field(field: FormField) -> AnyView {
    let FormField { name, label, input } = field;
    match input {
        Input::Text { value, placeholder } => view! {
            <label>
                {label}
                <input type="text" name=name value=value placeholder=placeholder/>
            </label>
        }
        .into_any(),
        Input::TextArea { value, placeholder } => view! {
            <label>
                {label}
                <textarea name=name rows="4" placeholder=placeholder>{value}</textarea>
            </label>
        }
        .into_any(),
        Input::Number {
            value,
            min,
            max,
            step,
        } => view! {
            <label>
                {label}
                <input
                    type="number"
                    name=name
                    value=value.to_string()
                    step=step.to_string()
                    min={min.map(|v| v.to_string())}
                    max={max.map(|v| v.to_string())}
                />
            </label>
        }
        .into_any(),
        Input::Select { options, selected } => {
            let options = options
                .into_iter()
                .map(|(value, text)| {
                    let is_selected = value == selected;
                    view! { <option value=value selected=is_selected>{text}</option> }
                })
                .collect_view();
            view! {
                <label>
                    {label}
                    <select name=name>{options}</select>
                </label>
            }
            .into_any()
        }
        Input::Checkbox { checked } => view! {
            <label class="checkbox">
                <input type="checkbox" name=name value="true" checked=checked/>
                {format!(" {label}")}
            </label>
        }
        .into_any(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Metric, Tone};

    fn render(items: Vec<Widget>) -> String {
        view! { <Widgets items=items/> }.to_html()
    }

    #[test]
    fn test_backend_text_is_escaped() {
        let html = render(vec![
            Widget::notice(Tone::Error, "Error: <b>boom</b> & more"),
            Widget::Metrics(vec![Metric::new("Incident ID", "<INC-9>")]),
            Widget::Bullets(vec!["<script>".into()]),
        ]);
        assert!(html.contains(
            r#"<div class="notice notice-error">Error: &lt;b&gt;boom&lt;/b&gt; &amp; more</div>"#
        ));
        assert!(html.contains("&lt;INC-9&gt;"));
        assert!(html.contains("<li>&lt;script&gt;</li>"));
        assert!(!html.contains("<b>boom"));
    }

    #[test]
    fn test_nested_layout() {
        let html = render(vec![Widget::Columns(vec![
            vec![Widget::header("Left")],
            vec![Widget::Expander {
                title: "Unit SEC-001".into(),
                body: vec![Widget::field("ETA", "3 min")],
            }],
        ])]);
        assert!(html.starts_with(r#"<div class="columns cols-2">"#));
        assert_eq!(html.matches(r#"<div class="column">"#).count(), 2);
        assert!(html.contains(r#"<details class="expander"><summary>Unit SEC-001</summary>"#));
        assert!(html.contains("<strong>ETA:</strong>"));
        assert!(html.contains(" 3 min</p>"));
    }

    #[test]
    fn test_table_markup() {
        let html = render(vec![Widget::Table(Table {
            headers: vec!["ID".into(), "Type".into()],
            rows: vec![vec!["SEC-001".into(), "Security".into()]],
        })]);
        assert!(html.starts_with(r#"<table class="data-table"><thead><tr><th>ID</th><th>Type</th>"#));
        assert!(html.contains("<td>SEC-001</td><td>Security</td>"));
    }

    #[test]
    fn test_form_markup() {
        let html = render(vec![Widget::Form(Form {
            action: "/dispatch".into(),
            submit: "Dispatch".into(),
            fields: vec![
                FormField::select("priority", "Priority Level", &["low", "high"], "high"),
                FormField::number("lat", "Latitude", 37.7749, Some((-90.0, 90.0)), 0.000001),
                FormField::number("coverage", "Coverage", 1000.0, None, 1.0),
                FormField::checkbox("photo_data", "Photo on file", true),
                FormField::checkbox("other", "Other", false),
            ],
        })]);
        assert!(html.starts_with(r#"<form method="post" action="/dispatch" class="form">"#));
        assert!(html.contains(r#"<option value="high" selected"#));
        assert!(html.contains(r#"<option value="low">low</option>"#));
        assert!(html.contains(r#"name="lat" value="37.7749""#));
        assert!(html.contains(r#"min="-90""#));
        assert_eq!(html.matches("min=").count(), 1);
        assert_eq!(html.matches(" checked").count(), 1);
        assert!(html.contains(r#"<button type="submit" class="btn btn-primary">Dispatch</button>"#));
    }
}
