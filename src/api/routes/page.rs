//! Dashboard Page
//!
//! - GET / - The single-page dashboard
//!
//! The page is static: it reads its control options from
//! `/api/v1/controls` and redraws all four panels from `/api/v1/figures`
//! whenever a control changes. Plotly.js does the rendering.

use axum::{
    http::header,
    response::{Html, IntoResponse},
};

/// GET /
pub async fn dashboard() -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, "public, max-age=60")],
        Html(DASHBOARD_HTML),
    )
}

const DASHBOARD_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Wastewater Dashboard</title>
    <script src="https://cdn.plot.ly/plotly-2.27.0.min.js" charset="utf-8"></script>
    <style>
        body { font-family: system-ui, -apple-system, sans-serif; margin: 0; background: #f8fafc; color: #1e293b; }
        .container { max-width: 1200px; margin: 0 auto; padding: 1.5rem; }
        h1 { font-size: 1.75rem; margin-bottom: 1rem; }
        .controls { display: flex; flex-wrap: wrap; gap: 1.5rem; align-items: flex-end; margin-bottom: 1rem; }
        .control label { display: block; font-size: 0.875rem; margin-bottom: 0.25rem; }
        select, input[type=date] { padding: 0.375rem 0.5rem; border: 1px solid #e2e8f0; border-radius: 0.375rem; }
        .log-toggle { font-size: 18px; }
        .panel { background: #fff; border: 1px solid #e2e8f0; border-radius: 0.5rem; margin-bottom: 1rem; min-height: 450px; }
        .status { font-size: 0.875rem; color: #64748b; }
    </style>
</head>
<body>
<div class="container">
    <h1 id="title">Wastewater Dashboard</h1>

    <div class="controls">
        <div class="control">
            <label for="location">Choose a location:</label>
            <select id="location"></select>
        </div>
        <div class="control">
            <label>Choose a date range:</label>
            <input type="date" id="start-date"> &ndash; <input type="date" id="end-date">
        </div>
        <div class="control log-toggle">
            <label><input type="checkbox" id="log-scale"> <span id="log-label">Log scale</span></label>
        </div>
        <div class="control">
            <a id="export" href="/api/v1/export">Download CSV</a>
            <div class="status" id="status"></div>
        </div>
    </div>

    <div class="panel" id="time-series-plot"></div>
    <div class="panel" id="box-plot"></div>
    <div class="panel" id="line-plot"></div>
    <div class="panel" id="histogram"></div>
</div>

<script>
const PANELS = {
    "time-series-plot": "time_series",
    "box-plot": "box_plot",
    "line-plot": "line",
    "histogram": "histogram",
};

const $ = (id) => document.getElementById(id);

function currentQuery() {
    const params = new URLSearchParams();
    params.set("location", $("location").value);
    if ($("start-date").value) params.set("start_date", $("start-date").value);
    if ($("end-date").value) params.set("end_date", $("end-date").value);
    params.set("log", $("log-scale").checked ? "true" : "false");
    return params;
}

async function refresh() {
    const params = currentQuery();
    const resp = await fetch("/api/v1/figures?" + params.toString());
    if (!resp.ok) {
        $("status").textContent = "Update failed (" + resp.status + ")";
        return;
    }
    const figures = await resp.json();
    for (const [elementId, key] of Object.entries(PANELS)) {
        const fig = figures[key];
        Plotly.react(elementId, fig.data, fig.layout, { responsive: true });
    }
    params.delete("log");
    $("export").href = "/api/v1/export?" + params.toString();
    $("status").textContent = figures.row_count + " samples";
}

async function init() {
    const controls = await (await fetch("/api/v1/controls")).json();

    document.title = controls.title;
    $("title").textContent = controls.title;
    $("log-label").textContent = controls.log_scale_label;

    const select = $("location");
    for (const opt of controls.locations) {
        const el = document.createElement("option");
        el.value = opt.value;
        el.textContent = opt.label;
        select.appendChild(el);
    }
    select.value = "all";

    const range = controls.date_range;
    for (const id of ["start-date", "end-date"]) {
        $(id).min = range.min_date_allowed;
        $(id).max = range.max_date_allowed;
    }
    $("start-date").value = range.start_date;
    $("end-date").value = range.end_date;

    for (const id of ["location", "start-date", "end-date", "log-scale"]) {
        $(id).addEventListener("change", refresh);
    }

    await refresh();
}

init();
</script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_has_four_panels() {
        for id in ["time-series-plot", "box-plot", "line-plot", "histogram"] {
            assert!(DASHBOARD_HTML.contains(&format!("id=\"{}\"", id)));
        }
    }
}
