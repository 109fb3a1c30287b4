//! Chart Builders
//!
//! Four independent pure functions turning filtered rows into chart
//! specifications. A spec describes what to draw (series, axes, titles);
//! rendering is left to the browser.
//!
//! The log toggle only switches the y axis to log-10 scaling. Values are never
//! clamped, so non-positive values follow the renderer's log-axis policy.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::filter::AdjustedSample;
use super::stats::{histogram, ols_fit, BoxSummary, HistogramBin, LinearFit};

pub const SCATTER_TITLE: &str = "SARS COV2 vs Sample Date";
pub const BOX_TITLE: &str = "SARS COV2 Distribution by Location";
pub const LINE_TITLE: &str = "SARS COV2 Concentration Trend over Time";
pub const HISTOGRAM_TITLE: &str = "SARS COV2 Distribution Frequency";

pub const SAMPLE_DATE_LABEL: &str = "Sample Date";
pub const LOCATION_LABEL: &str = "Location";
pub const CONCENTRATION_LABEL: &str = "SARS COV2 Concentration (GC/100ml)";
pub const FREQUENCY_LABEL: &str = "Frequency";

/// Fixed number of histogram bins
pub const HISTOGRAM_BINS: usize = 20;

/// Days from 0001-01-01 to 1970-01-01
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Axis scaling / value type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    Linear,
    Log,
    Date,
    Category,
}

impl AxisKind {
    fn value_axis(log_scale: bool) -> Self {
        if log_scale {
            AxisKind::Log
        } else {
            AxisKind::Linear
        }
    }
}

/// One chart axis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Axis {
    pub title: String,
    pub kind: AxisKind,
}

impl Axis {
    fn new(title: &str, kind: AxisKind) -> Self {
        Self {
            title: title.to_string(),
            kind,
        }
    }
}

/// A dated measurement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DatedPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// A named sequence of dated points
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointSeries {
    pub name: String,
    pub points: Vec<DatedPoint>,
}

/// Least-squares trendline drawn across the scatter plot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Trendline {
    /// Fit over x = days since 1970-01-01
    pub fit: LinearFit,
    /// Fitted value at the earliest plotted date
    pub start: DatedPoint,
    /// Fitted value at the latest plotted date
    pub end: DatedPoint,
}

/// Box summary for a single location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationBox {
    pub location: String,
    pub summary: BoxSummary,
    /// Values beyond the fences, in row order
    pub outliers: Vec<f64>,
}

/// Boxes sharing one color (one `above_ldl` value)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoxGroup {
    pub name: String,
    pub boxes: Vec<LocationBox>,
}

/// Chart-type specific content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartBody {
    Scatter {
        series: Vec<PointSeries>,
        trendline: Option<Trendline>,
    },
    Box {
        groups: Vec<BoxGroup>,
    },
    Line {
        series: Vec<PointSeries>,
    },
    Histogram {
        bin_count: usize,
        bins: Vec<HistogramBin>,
    },
}

/// A complete chart specification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub show_legend: bool,
    pub body: ChartBody,
}

impl ChartSpec {
    /// Number of plotted observations
    pub fn point_count(&self) -> usize {
        match &self.body {
            ChartBody::Scatter { series, .. } | ChartBody::Line { series } => {
                series.iter().map(|s| s.points.len()).sum()
            }
            ChartBody::Box { groups } => groups
                .iter()
                .flat_map(|g| g.boxes.iter())
                .map(|b| b.summary.count)
                .sum(),
            ChartBody::Histogram { bins, .. } => bins.iter().map(|b| b.count).sum(),
        }
    }

    /// Check if the y axis uses log scaling
    pub fn is_log_scale(&self) -> bool {
        self.y_axis.kind == AxisKind::Log
    }
}

/// Legend name for an `above_ldl` color group
pub fn flag_label(above_ldl: bool) -> &'static str {
    if above_ldl {
        "Above LDL"
    } else {
        "At or below LDL"
    }
}

/// Days since the Unix epoch, the x coordinate used for trend fitting
pub fn epoch_days(date: NaiveDate) -> f64 {
    (date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE) as f64
}

/// Distinct keys in first-seen order
fn ordered_keys<'a, K, F>(rows: &[AdjustedSample<'a>], key: F) -> Vec<K>
where
    K: PartialEq,
    F: Fn(&AdjustedSample<'a>) -> K,
{
    let mut keys: Vec<K> = Vec::new();
    for row in rows {
        let k = key(row);
        if !keys.contains(&k) {
            keys.push(k);
        }
    }
    keys
}

fn dated(row: &AdjustedSample<'_>) -> DatedPoint {
    DatedPoint {
        date: row.record.sample_date,
        value: row.wildtype_adjusted,
    }
}

/// Scatter of concentration against date with an OLS trendline
pub fn scatter_chart(rows: &[AdjustedSample<'_>], log_scale: bool) -> ChartSpec {
    let series = ordered_keys(rows, |r| r.above_ldl)
        .into_iter()
        .map(|flag| PointSeries {
            name: flag_label(flag).to_string(),
            points: rows.iter().filter(|r| r.above_ldl == flag).map(dated).collect(),
        })
        .collect();

    ChartSpec {
        title: SCATTER_TITLE.to_string(),
        x_axis: Axis::new(SAMPLE_DATE_LABEL, AxisKind::Date),
        y_axis: Axis::new(CONCENTRATION_LABEL, AxisKind::value_axis(log_scale)),
        show_legend: false,
        body: ChartBody::Scatter {
            series,
            trendline: trendline(rows),
        },
    }
}

fn trendline(rows: &[AdjustedSample<'_>]) -> Option<Trendline> {
    let points: Vec<(f64, f64)> = rows
        .iter()
        .map(|r| (epoch_days(r.record.sample_date), r.wildtype_adjusted))
        .collect();
    let fit = ols_fit(&points)?;

    let first = rows.iter().map(|r| r.record.sample_date).min()?;
    let last = rows.iter().map(|r| r.record.sample_date).max()?;

    Some(Trendline {
        fit,
        start: DatedPoint {
            date: first,
            value: fit.predict(epoch_days(first)),
        },
        end: DatedPoint {
            date: last,
            value: fit.predict(epoch_days(last)),
        },
    })
}

/// Concentration distribution per location, split by `above_ldl`
pub fn box_chart(rows: &[AdjustedSample<'_>], log_scale: bool) -> ChartSpec {
    let locations = ordered_keys(rows, |r| r.record.location.clone());

    let groups = ordered_keys(rows, |r| r.above_ldl)
        .into_iter()
        .map(|flag| {
            let boxes = locations
                .iter()
                .filter_map(|location| {
                    let values: Vec<f64> = rows
                        .iter()
                        .filter(|r| r.above_ldl == flag && r.record.location == *location)
                        .map(|r| r.wildtype_adjusted)
                        .collect();
                    BoxSummary::from_values(&values).map(|summary| LocationBox {
                        location: location.clone(),
                        outliers: values.iter().copied().filter(|v| summary.is_outlier(*v)).collect(),
                        summary,
                    })
                })
                .collect();

            BoxGroup {
                name: flag_label(flag).to_string(),
                boxes,
            }
        })
        .collect();

    ChartSpec {
        title: BOX_TITLE.to_string(),
        x_axis: Axis::new(LOCATION_LABEL, AxisKind::Category),
        y_axis: Axis::new(CONCENTRATION_LABEL, AxisKind::value_axis(log_scale)),
        show_legend: false,
        body: ChartBody::Box { groups },
    }
}

/// One concentration line per location
pub fn line_chart(rows: &[AdjustedSample<'_>], log_scale: bool) -> ChartSpec {
    let series = ordered_keys(rows, |r| r.record.location.clone())
        .into_iter()
        .map(|location| {
            let points = rows
                .iter()
                .filter(|r| r.record.location == location)
                .map(dated)
                .collect();
            PointSeries {
                name: location,
                points,
            }
        })
        .collect();

    ChartSpec {
        title: LINE_TITLE.to_string(),
        x_axis: Axis::new(SAMPLE_DATE_LABEL, AxisKind::Date),
        y_axis: Axis::new(CONCENTRATION_LABEL, AxisKind::value_axis(log_scale)),
        show_legend: true,
        body: ChartBody::Line { series },
    }
}

/// Frequency of concentration values in 20 equal-width bins
pub fn histogram_chart(rows: &[AdjustedSample<'_>], log_scale: bool) -> ChartSpec {
    let values: Vec<f64> = rows.iter().map(|r| r.wildtype_adjusted).collect();

    ChartSpec {
        title: HISTOGRAM_TITLE.to_string(),
        x_axis: Axis::new(CONCENTRATION_LABEL, AxisKind::Linear),
        y_axis: Axis::new(FREQUENCY_LABEL, AxisKind::value_axis(log_scale)),
        show_legend: false,
        body: ChartBody::Histogram {
            bin_count: HISTOGRAM_BINS,
            bins: histogram(&values, HISTOGRAM_BINS),
        },
    }
}
