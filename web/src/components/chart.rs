//! Minimal inline-SVG charts for the sample and historical series.

use leptos::prelude::*;

use crate::model::{Chart, ChartKind, Series};

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 260.0;
const MARGIN_LEFT: f64 = 48.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 36.0;
const MARGIN_BOTTOM: f64 = 40.0;
const PALETTE: [&str; 4] = ["#1a73e8", "#f44336", "#ff9800", "#4caf50"];

/// Single-series chart.
pub fn single(
    title: &str,
    kind: ChartKind,
    name: &str,
    points: impl IntoIterator<Item = (String, f64)>,
) -> Chart {
    let (labels, values): (Vec<String>, Vec<f64>) = points.into_iter().unzip();
    Chart {
        title: title.into(),
        kind,
        labels,
        series: vec![Series {
            name: name.into(),
            values,
        }],
    }
}

/// A chart as inline `<svg>`.
#[component]
pub fn ChartView(chart: Chart) -> impl IntoView {
    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let baseline = MARGIN_TOP + plot_h;
    let slots = chart.labels.len().max(1);
    let max = chart
        .series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .fold(0.0_f64, f64::max);
    let max = if max > 0.0 { max } else { 1.0 };

    let y_of = move |v: f64| baseline - (v.max(0.0) / max) * plot_h;
    let slot_w = plot_w / slots as f64;
    let x_of = move |i: usize| MARGIN_LEFT + slot_w * (i as f64 + 0.5);

    // x labels, thinned to at most ~12
    let every = slots.div_ceil(12).max(1);
    let x_labels = chart
        .labels
        .iter()
        .enumerate()
        .step_by(every)
        .map(|(i, label)| {
            view! {
                <text x=coord(x_of(i)) y={coord(HEIGHT - MARGIN_BOTTOM + 16.0)}
                      class="axis-label" text-anchor="middle">{label.clone()}</text>
            }
        })
        .collect_view();

    let n_series = chart.series.len().max(1);
    let series = chart
        .series
        .iter()
        .enumerate()
        .map(|(si, series)| {
            let color = PALETTE[si % PALETTE.len()];
            match chart.kind {
                ChartKind::Line => {
                    let points = series
                        .values
                        .iter()
                        .enumerate()
                        .map(|(i, v)| format!("{},{}", coord(x_of(i)), coord(y_of(*v))))
                        .collect::<Vec<_>>()
                        .join(" ");
                    view! {
                        <polyline fill="none" stroke=color stroke-width="2" points=points/>
                    }
                    .into_any()
                }
                ChartKind::Bar => {
                    let bar_w = slot_w * 0.7 / n_series as f64;
                    series
                        .values
                        .iter()
                        .enumerate()
                        .map(|(i, v)| {
                            let x = MARGIN_LEFT + slot_w * i as f64 + slot_w * 0.15 + bar_w * si as f64;
                            let y = y_of(*v);
                            view! {
                                <rect x=coord(x) y=coord(y) width=coord(bar_w)
                                      height={coord(baseline - y)} fill=color>
                                    <title>{format_value(*v)}</title>
                                </rect>
                            }
                        })
                        .collect_view()
                        .into_any()
                }
            }
        })
        .collect_view();

    let legend = (chart.series.len() > 1).then(|| {
        chart
            .series
            .iter()
            .enumerate()
            .map(|(si, series)| {
                view! {
                    <text x={coord(MARGIN_LEFT + 8.0 + si as f64 * 110.0)} y={coord(MARGIN_TOP - 4.0)}
                          fill={PALETTE[si % PALETTE.len()]} class="legend">{series.name.clone()}</text>
                }
            })
            .collect_view()
    });

    view! {
        <svg class="chart" viewBox=format!("0 0 {WIDTH} {HEIGHT}") role="img">
            <title>{chart.title.clone()}</title>
            <text x={coord(WIDTH / 2.0)} y="20" class="chart-title">{chart.title.clone()}</text>
            <line x1=coord(MARGIN_LEFT) y1=coord(baseline) x2={coord(MARGIN_LEFT + plot_w)} y2=coord(baseline) class="axis"/>
            <line x1=coord(MARGIN_LEFT) y1=coord(MARGIN_TOP) x2=coord(MARGIN_LEFT) y2=coord(baseline) class="axis"/>
            <text x={coord(MARGIN_LEFT - 6.0)} y={coord(MARGIN_TOP + 4.0)} class="axis-label" text-anchor="end">{format_value(max)}</text>
            <text x={coord(MARGIN_LEFT - 6.0)} y=coord(baseline) class="axis-label" text-anchor="end">"0"</text>
            {x_labels}
            {series}
            {legend}
        </svg>
    }
}

/// SVG coordinate with one decimal.
fn coord(v: f64) -> String {
    format!("{v:.1}")
}

fn format_value(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}
