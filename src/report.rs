//! Plain-text and JSON rendering of a `DashboardView` for `lsg_report`

use {
    crate::{
        dashboard::DashboardView,
        inventory::{
            metrics::{BenchCount, GenotypeCount, MonthlyPlanting, StatusCount, TABLE_COLUMNS},
            InventoryRow, SummaryMetrics,
        },
        source::SourceNotice,
    },
    serde::Serialize,
    std::fmt::Write,
};

#[derive(Debug, Serialize)]
pub struct FilterSummary {
    pub genotype: String,
    pub status: String,
    pub bench: String,
}

/// JSON document emitted by `lsg_report --json`
#[derive(Debug, Serialize)]
pub struct ReportJson<'a> {
    pub source: &'static str,
    pub loaded_at: Option<String>,
    pub filters: FilterSummary,
    pub notices: &'a [SourceNotice],
    pub total_loaded: usize,
    pub metrics: &'a SummaryMetrics,
    pub redundant_kill_markers: usize,
    pub genotypes: &'a [GenotypeCount],
    pub statuses: &'a [StatusCount],
    pub benches: &'a [BenchCount],
    pub timeline: &'a [MonthlyPlanting],
    pub rows: &'a [InventoryRow],
}

impl<'a> ReportJson<'a> {
    pub fn from_view(view: &'a DashboardView) -> Self {
        Self {
            source: view.source.label(),
            loaded_at: view.loaded_at.map(|t| t.to_rfc3339()),
            filters: FilterSummary {
                genotype: view.filters.genotype.to_string(),
                status: view.filters.status.to_string(),
                bench: view.filters.bench.to_string(),
            },
            notices: &view.notices,
            total_loaded: view.total_loaded,
            metrics: &view.metrics,
            redundant_kill_markers: view.redundant_kill_markers,
            genotypes: &view.genotypes,
            statuses: &view.statuses,
            benches: &view.benches,
            timeline: &view.timeline,
            rows: &view.rows,
        }
    }
}

pub fn render_json(view: &DashboardView) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ReportJson::from_view(view))
}

/// Human-readable report; `row_limit` caps the detail table
pub fn render_text(view: &DashboardView, row_limit: Option<usize>) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "LSG Project Plant Inventory Report");
    let _ = writeln!(out, "Data Source: {}", view.source);
    for notice in &view.notices {
        let _ = writeln!(out, "  [{:?}] {}", notice.level, notice.message);
    }
    let _ = writeln!(
        out,
        "Filters: Genotype={} | Status={} | Bench={}",
        view.filters.genotype, view.filters.status, view.filters.bench
    );
    let _ = writeln!(out);

    if !view.has_data() {
        let _ = writeln!(out, "No data available. Please check your data source.");
        return out;
    }

    let m = &view.metrics;
    let _ = writeln!(out, "Total LSG Plants: {}", m.total_plants);
    let _ = writeln!(out, "Unique Genotypes: {}", m.unique_genotypes);
    let _ = writeln!(out, "Active Plants:    {}", m.active_plants);
    let _ = writeln!(out, "Killed Plants:    {}", m.killed_plants);
    let _ = writeln!(out, "Cut Back Plants:  {}", m.cut_back_plants);
    let _ = writeln!(out, "Needs Attention:  {}", m.attention_plants);
    if view.redundant_kill_markers > 0 {
        let _ = writeln!(
            out,
            "Note: {} plant(s) have both a killing-bench date and a termination entry",
            view.redundant_kill_markers
        );
    }
    let _ = writeln!(out);

    if view.nothing_matches() {
        let _ = writeln!(
            out,
            "No data matches the selected filters. Please adjust your filter criteria."
        );
        return out;
    }

    let _ = writeln!(out, "Top Genotypes:");
    for g in &view.genotypes {
        let _ = writeln!(out, "  {:<32} {:>5}", g.name, g.count);
    }
    let _ = writeln!(out, "Status:");
    for s in &view.statuses {
        let _ = writeln!(out, "  {:<32} {:>5}", s.status, s.count);
    }
    let _ = writeln!(out, "Benches:");
    for b in &view.benches {
        let _ = writeln!(out, "  {:<32} {:>5}", b.bench, b.count);
    }
    let _ = writeln!(out, "Planting Timeline:");
    for t in &view.timeline {
        let _ = writeln!(out, "  {:<32} {:>5}", t.month, t.count);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", TABLE_COLUMNS.join("\t"));
    let limit = row_limit.unwrap_or(view.rows.len());
    for row in view.rows.iter().take(limit) {
        let _ = writeln!(out, "{}", row.cells().join("\t"));
    }
    if view.rows.len() > limit {
        let _ = writeln!(out, "... {} more rows", view.rows.len() - limit);
    }

    out
}
