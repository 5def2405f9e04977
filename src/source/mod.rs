//! Data source adapter
//!
//! Rows are fetched through an ordered list of strategies. The chain stops at
//! the first one that succeeds; when all of them fail the caller gets an empty
//! row set labelled `None` rather than an error, and renders "no data".
//!
//! Which strategy served the data is part of the result (`DataSource`), along
//! with one human-readable notice per attempt.

pub mod snapshot;
pub mod supabase;

use {
    crate::{config::{Config, ConfigError}, inventory::RawRecord},
    async_trait::async_trait,
    serde::Serialize,
    std::fmt,
    thiserror::Error,
};

pub use snapshot::SnapshotSource;
pub use supabase::{DirectClient, DirectClientSource, ManagedConnection, QueryResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DataSource {
    ModernConnection,
    DirectClient,
    LocalSnapshot,
    None,
}

impl DataSource {
    pub fn label(&self) -> &'static str {
        match self {
            DataSource::ModernConnection => "Supabase (Modern Connection)",
            DataSource::DirectClient => "Supabase (Direct Client)",
            DataSource::LocalSnapshot => "Local Snapshot",
            DataSource::None => "None",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Supabase returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("No data returned from Supabase")]
    NoData,
    #[error("Snapshot unreadable: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// Status line describing one fetch attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceNotice {
    pub level: NoticeLevel,
    pub message: String,
}

impl SourceNotice {
    fn new(level: NoticeLevel, message: String) -> Self {
        match level {
            NoticeLevel::Success | NoticeLevel::Info => log::info!("✅ {}", message),
            NoticeLevel::Warning => log::warn!("⚠️  {}", message),
            NoticeLevel::Error => log::error!("❌ {}", message),
        }
        Self { level, message }
    }
}

#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub records: Vec<RawRecord>,
    pub source: DataSource,
    pub notices: Vec<SourceNotice>,
}

impl FetchOutcome {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// One way of obtaining the raw table rows
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Label reported when this strategy serves the data
    fn source(&self) -> DataSource;

    /// Fetch every row of `table`
    async fn fetch(&self, table: &str) -> Result<Vec<RawRecord>, FetchError>;
}

/// Ordered fetch strategies, first success wins
pub struct SourceChain {
    sources: Vec<Box<dyn RecordSource>>,
}

impl SourceChain {
    pub fn new(sources: Vec<Box<dyn RecordSource>>) -> Self {
        Self { sources }
    }

    /// Managed connection, then direct client, then the local snapshot if configured
    pub fn from_config(config: &Config) -> Self {
        let mut sources: Vec<Box<dyn RecordSource>> = vec![
            Box::new(ManagedConnection::new(config.connection.clone(), config.request_timeout)),
            Box::new(DirectClientSource::new(config.secrets.clone(), config.request_timeout)),
        ];
        if let Some(path) = &config.snapshot_path {
            sources.push(Box::new(SnapshotSource::new(path.clone())));
        }
        Self::new(sources)
    }

    /// Strategy order, for display
    pub fn order(&self) -> Vec<DataSource> {
        self.sources.iter().map(|s| s.source()).collect()
    }

    pub async fn fetch_raw_records(&self, table: &str) -> FetchOutcome {
        let mut notices = Vec::new();

        for (index, source) in self.sources.iter().enumerate() {
            let label = source.source();
            log::info!("📡 Fetching '{}' via {}", table, label);

            match source.fetch(table).await {
                Ok(records) => {
                    let (level, message) = if index == 0 {
                        (
                            NoticeLevel::Success,
                            format!("Data loaded from {} ({} rows)", label, records.len()),
                        )
                    } else {
                        (
                            NoticeLevel::Info,
                            format!("Data loaded using fallback {} ({} rows)", label, records.len()),
                        )
                    };
                    notices.push(SourceNotice::new(level, message));
                    return FetchOutcome {
                        records,
                        source: label,
                        notices,
                    };
                }
                Err(e) => {
                    let notice = match self.sources.get(index + 1) {
                        Some(next) => SourceNotice::new(
                            NoticeLevel::Warning,
                            format!("{} failed: {}. Falling back to {}.", label, e, next.source()),
                        ),
                        None => SourceNotice::new(NoticeLevel::Error, format!("Failed to load data: {}", e)),
                    };
                    notices.push(notice);
                }
            }
        }

        if self.sources.is_empty() {
            notices.push(SourceNotice::new(
                NoticeLevel::Error,
                "Failed to load data: no data sources configured".to_string(),
            ));
        }

        FetchOutcome {
            records: Vec::new(),
            source: DataSource::None,
            notices,
        }
    }
}
