//! Local JSON snapshot of the inventory table
//!
//! Used as the last resort when Supabase is unreachable (and for demos).
//! The file holds either a bare JSON array of rows, as exported from the
//! table, or a `{"data": [...]}` envelope.

use {
    super::{DataSource, FetchError, RecordSource},
    crate::inventory::RawRecord,
    async_trait::async_trait,
    serde::Deserialize,
    std::path::PathBuf,
};

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    Rows(Vec<RawRecord>),
    Envelope { data: Option<Vec<RawRecord>> },
}

pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

/// Parse snapshot contents; an envelope without data counts as no data
pub fn parse_snapshot(contents: &[u8]) -> Result<Vec<RawRecord>, FetchError> {
    match serde_json::from_slice::<SnapshotFile>(contents)? {
        SnapshotFile::Rows(rows) => Ok(rows),
        SnapshotFile::Envelope { data } => data.ok_or(FetchError::NoData),
    }
}

#[async_trait]
impl RecordSource for SnapshotSource {
    fn source(&self) -> DataSource {
        DataSource::LocalSnapshot
    }

    async fn fetch(&self, _table: &str) -> Result<Vec<RawRecord>, FetchError> {
        let contents = tokio::fs::read(&self.path).await?;
        let rows = parse_snapshot(&contents)?;
        log::debug!("Read {} rows from {}", rows.len(), self.path.display());
        Ok(rows)
    }
}
