//! Dashboard state: cached inventory, active filters, per-interaction view
//!
//! Fetching is the only slow step, so normalized rows are cached for the
//! configured TTL. Everything after that (status, age, attention, filters,
//! aggregates) is recomputed against the current clock on every `view()`.

use {
    crate::{
        cache::TtlCache,
        config::Config,
        inventory::{
            apply_filters, evaluate, kill_evidence,
            metrics::{
                bench_distribution, genotype_distribution, planting_timeline, status_distribution, table_rows,
                BenchCount, GenotypeCount, MonthlyPlanting, StatusCount,
            },
            normalize, AttentionPolicy, FilterOptions, FilterSelection, InventoryRow, KillEvidence, PlantRecord,
            SummaryMetrics,
        },
        source::{DataSource, SourceChain, SourceNotice},
    },
    chrono::{DateTime, Local, NaiveDateTime},
    std::time::{Duration, Instant},
};

/// Normalized rows from one fetch
#[derive(Debug, Clone)]
pub struct LoadedInventory {
    pub plants: Vec<PlantRecord>,
    /// Rows received before the LSG group filter
    pub raw_rows: usize,
    pub source: DataSource,
    pub notices: Vec<SourceNotice>,
    pub loaded_at: DateTime<Local>,
}

/// Everything the presentation layer needs for one frame or report
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub source: DataSource,
    pub notices: Vec<SourceNotice>,
    pub loaded_at: Option<DateTime<Local>>,
    pub filters: FilterSelection,
    pub options: FilterOptions,
    /// LSG plants before filtering
    pub total_loaded: usize,
    pub metrics: SummaryMetrics,
    pub genotypes: Vec<GenotypeCount>,
    pub statuses: Vec<StatusCount>,
    pub benches: Vec<BenchCount>,
    pub timeline: Vec<MonthlyPlanting>,
    pub rows: Vec<InventoryRow>,
    /// Filtered plants carrying both kill markers
    pub redundant_kill_markers: usize,
}

impl DashboardView {
    fn empty(filters: &FilterSelection) -> Self {
        Self {
            source: DataSource::None,
            notices: Vec::new(),
            loaded_at: None,
            filters: filters.clone(),
            options: FilterOptions::default(),
            total_loaded: 0,
            metrics: SummaryMetrics::default(),
            genotypes: Vec::new(),
            statuses: Vec::new(),
            benches: Vec::new(),
            timeline: Vec::new(),
            rows: Vec::new(),
            redundant_kill_markers: 0,
        }
    }

    /// No LSG plants were loaded at all
    pub fn has_data(&self) -> bool {
        self.total_loaded > 0
    }

    /// Data loaded, but nothing survives the filters
    pub fn nothing_matches(&self) -> bool {
        self.has_data() && self.rows.is_empty()
    }
}

pub fn build_view(
    inventory: &LoadedInventory,
    filters: &FilterSelection,
    policy: &AttentionPolicy,
    now: NaiveDateTime,
) -> DashboardView {
    let evaluated = evaluate(&inventory.plants, now, policy);
    let options = FilterOptions::from_plants(&evaluated);
    let filtered = apply_filters(&evaluated, filters);

    DashboardView {
        source: inventory.source,
        notices: inventory.notices.clone(),
        loaded_at: Some(inventory.loaded_at),
        filters: filters.clone(),
        options,
        total_loaded: evaluated.len(),
        metrics: SummaryMetrics::from_plants(&filtered),
        genotypes: genotype_distribution(&filtered),
        statuses: status_distribution(&filtered),
        benches: bench_distribution(&filtered),
        timeline: planting_timeline(&filtered),
        rows: table_rows(&filtered),
        redundant_kill_markers: filtered
            .iter()
            .filter(|p| kill_evidence(&p.record) == Some(KillEvidence::Both))
            .count(),
    }
}

pub struct Dashboard {
    chain: SourceChain,
    table: String,
    cache: TtlCache<LoadedInventory>,
    policy: AttentionPolicy,
    pub filters: FilterSelection,
}

impl Dashboard {
    pub fn new(chain: SourceChain, table: impl Into<String>, ttl: Duration, policy: AttentionPolicy) -> Self {
        Self {
            chain,
            table: table.into(),
            cache: TtlCache::new(ttl),
            policy,
            filters: FilterSelection::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            SourceChain::from_config(config),
            config.table.clone(),
            config.cache_ttl,
            config.attention,
        )
    }

    /// Fetch and normalize unless the cached copy is still fresh.
    /// Returns true when a fetch happened.
    pub async fn ensure_fresh(&mut self, now: Instant) -> bool {
        if self.cache.is_fresh(now) {
            return false;
        }

        let outcome = self.chain.fetch_raw_records(&self.table).await;
        let plants = normalize(&outcome.records);
        log::info!(
            "Loaded {} LSG plants ({} rows) from {}",
            plants.len(),
            outcome.records.len(),
            outcome.source
        );

        self.cache.store(
            LoadedInventory {
                plants,
                raw_rows: outcome.records.len(),
                source: outcome.source,
                notices: outcome.notices,
                loaded_at: Local::now(),
            },
            now,
        );
        true
    }

    /// Drop cached rows; the next `ensure_fresh` refetches
    pub fn invalidate(&mut self) {
        log::info!("🔄 Cache cleared, data will be reloaded");
        self.cache.invalidate();
    }

    pub async fn reload(&mut self, now: Instant) {
        self.invalidate();
        self.ensure_fresh(now).await;
    }

    pub fn inventory(&self) -> Option<&LoadedInventory> {
        self.cache.peek()
    }

    /// Time until the cached rows go stale
    pub fn cache_remaining(&self, now: Instant) -> Option<Duration> {
        self.cache.remaining(now)
    }

    pub fn view(&self, now: NaiveDateTime) -> DashboardView {
        match self.inventory() {
            Some(inventory) => build_view(inventory, &self.filters, &self.policy, now),
            None => DashboardView::empty(&self.filters),
        }
    }

    pub fn cycle_genotype(&mut self, options: &FilterOptions) {
        self.filters.genotype = self.filters.genotype.next_in(&options.genotypes);
    }

    pub fn cycle_status(&mut self, options: &FilterOptions) {
        self.filters.status = self.filters.status.next_in(&options.statuses);
    }

    pub fn cycle_bench(&mut self, options: &FilterOptions) {
        self.filters.bench = self.filters.bench.next_in(&options.benches);
    }

    pub fn clear_filters(&mut self) {
        self.filters = FilterSelection::default();
    }
}
