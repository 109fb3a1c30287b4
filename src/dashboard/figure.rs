//! Plotly figure encoding
//!
//! Converts a [`ChartSpec`] into the `{data, layout}` JSON that Plotly.js
//! renders directly. Box plots and histograms are sent pre-aggregated; box
//! outliers travel as a separate marker trace per color group.

use serde_json::{json, Value};

use super::charts::{Axis, BoxGroup, ChartBody, ChartSpec, DatedPoint, PointSeries};
use super::stats::BoxSummary;

/// Legend name of the fitted trend trace
pub const TRENDLINE_NAME: &str = "OLS trendline";

/// Encode a chart specification as a Plotly figure
pub fn to_plotly(spec: &ChartSpec) -> Value {
    let data = match &spec.body {
        ChartBody::Scatter { series, trendline } => {
            let mut traces: Vec<Value> = series.iter().map(|s| series_trace(s, "markers")).collect();
            if let Some(trend) = trendline {
                traces.push(points_trace(TRENDLINE_NAME, &[trend.start, trend.end], "lines"));
            }
            traces
        }
        ChartBody::Line { series } => series.iter().map(|s| series_trace(s, "lines")).collect(),
        ChartBody::Box { groups } => {
            let mut traces: Vec<Value> = groups.iter().map(box_trace).collect();
            traces.extend(groups.iter().filter_map(outlier_trace));
            traces
        }
        ChartBody::Histogram { bins, .. } => vec![json!({
            "type": "bar",
            "x": bins.iter().map(|b| b.center()).collect::<Vec<_>>(),
            "y": bins.iter().map(|b| b.count).collect::<Vec<_>>(),
            "width": bins.iter().map(|b| b.end - b.start).collect::<Vec<_>>(),
        })],
    };

    json!({
        "data": data,
        "layout": {
            "title": { "text": spec.title },
            "xaxis": axis_layout(&spec.x_axis),
            "yaxis": axis_layout(&spec.y_axis),
            "showlegend": spec.show_legend,
            "bargap": 0,
            "boxmode": "group",
        },
    })
}

fn box_trace(group: &BoxGroup) -> Value {
    let column = |f: fn(&BoxSummary) -> f64| -> Vec<f64> {
        group.boxes.iter().map(|b| f(&b.summary)).collect()
    };
    json!({
        "type": "box",
        "name": group.name,
        "x": group.boxes.iter().map(|b| b.location.as_str()).collect::<Vec<_>>(),
        "q1": column(|s| s.q1),
        "median": column(|s| s.median),
        "q3": column(|s| s.q3),
        "lowerfence": column(|s| s.lower_fence),
        "upperfence": column(|s| s.upper_fence),
        "mean": column(|s| s.mean),
    })
}

/// Points beyond the fences, which precomputed box traces cannot carry
fn outlier_trace(group: &BoxGroup) -> Option<Value> {
    let (x, y): (Vec<&str>, Vec<f64>) = group
        .boxes
        .iter()
        .flat_map(|b| b.outliers.iter().map(move |v| (b.location.as_str(), *v)))
        .unzip();
    if y.is_empty() {
        return None;
    }

    Some(json!({
        "type": "scatter",
        "mode": "markers",
        "name": group.name,
        "showlegend": false,
        "x": x,
        "y": y,
    }))
}

fn axis_layout(axis: &Axis) -> Value {
    json!({
        "title": { "text": axis.title },
        "type": axis.kind,
    })
}

fn series_trace(series: &PointSeries, mode: &str) -> Value {
    points_trace(&series.name, &series.points, mode)
}

fn points_trace(name: &str, points: &[DatedPoint], mode: &str) -> Value {
    json!({
        "type": "scatter",
        "mode": mode,
        "name": name,
        "x": points.iter().map(|p| p.date.format("%Y-%m-%d").to_string()).collect::<Vec<_>>(),
        "y": points.iter().map(|p| p.value).collect::<Vec<_>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::charts::{box_chart, histogram_chart, line_chart, scatter_chart};
    use crate::dashboard::filter::{filter, FilterState};
    use crate::data::load_str;

    const CSV: &str = "sample.loc,sample.date,wildtype,LDL
Holt,2023-01-01,100,10
Mason,2023-01-02,200,10
Holt,2023-01-03,300,10";

    #[test]
    fn test_scatter_figure_has_trend_trace() {
        let ds = load_str(CSV).unwrap();
        let bounds = ds.date_bounds();
        let rows = filter(&ds, &FilterState::new("all", bounds.min, bounds.max));
        let fig = to_plotly(&scatter_chart(&rows, true));

        let data = fig["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["mode"], "markers");
        assert_eq!(data[0]["x"][0], "2023-01-01");
        assert_eq!(data[1]["name"], TRENDLINE_NAME);
        assert_eq!(fig["layout"]["yaxis"]["type"], "log");
        assert_eq!(fig["layout"]["xaxis"]["type"], "date");
        assert_eq!(fig["layout"]["title"]["text"], "SARS COV2 vs Sample Date");
    }

    #[test]
    fn test_line_and_box_figures() {
        let ds = load_str(CSV).unwrap();
        let bounds = ds.date_bounds();
        let rows = filter(&ds, &FilterState::new("all", bounds.min, bounds.max));

        let line = to_plotly(&line_chart(&rows, false));
        assert_eq!(line["data"].as_array().unwrap().len(), 2);
        assert_eq!(line["layout"]["showlegend"], true);

        let boxes = to_plotly(&box_chart(&rows, false));
        assert_eq!(boxes["data"][0]["type"], "box");
        assert_eq!(boxes["data"][0]["x"][0], "Holt");
        assert_eq!(boxes["data"][0]["median"][0], 200.0);
        assert_eq!(boxes["data"].as_array().unwrap().len(), 1);
        assert_eq!(boxes["layout"]["boxmode"], "group");
    }

    #[test]
    fn test_box_figure_draws_outliers() {
        let ds = load_str(
            "sample.loc,sample.date,wildtype,LDL
A,2023-01-01,10,1
A,2023-01-02,11,1
A,2023-01-03,12,1
A,2023-01-04,13,1
A,2023-01-05,5000,1",
        )
        .unwrap();
        let bounds = ds.date_bounds();
        let rows = filter(&ds, &FilterState::new("all", bounds.min, bounds.max));
        let fig = to_plotly(&box_chart(&rows, false));

        let data = fig["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["upperfence"][0], 13.0);
        assert_eq!(data[1]["mode"], "markers");
        assert_eq!(data[1]["x"][0], "A");
        assert_eq!(data[1]["y"][0], 5000.0);
    }

    #[test]
    fn test_histogram_figure_is_binned_bar() {
        let fig = to_plotly(&histogram_chart(&[], false));
        let trace = &fig["data"][0];

        assert_eq!(trace["type"], "bar");
        assert_eq!(trace["x"].as_array().unwrap().len(), 20);
        assert_eq!(fig["layout"]["yaxis"]["type"], "linear");
    }
}
