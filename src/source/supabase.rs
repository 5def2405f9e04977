//! Supabase (PostgREST) access
//!
//! Two strategies share the same REST call:
//!
//! - `ManagedConnection` builds one HTTP client up front, with auth headers and
//!   timeout baked in, and reuses it for every query.
//! - `DirectClientSource` builds a fresh `DirectClient` from the `supabase`
//!   secrets each time it is asked, which is what makes it a usable fallback
//!   when the managed connection is misconfigured.
//!
//! ## API Reference
//!
//! Endpoint: `{url}/rest/v1/{table}?select=*`
//! Headers: `apikey: {key}`, `Authorization: Bearer {key}`
//! Returns: JSON array of row objects

use {
    super::{DataSource, FetchError, RecordSource},
    crate::{
        config::{ConfigError, SupabaseSecrets},
        inventory::RawRecord,
    },
    async_trait::async_trait,
    reqwest::{
        header::{HeaderMap, HeaderValue, AUTHORIZATION},
        Client,
    },
    std::time::Duration,
};

/// Query result envelope; `data` is `None` when the body was JSON `null`
#[derive(Debug, Clone, Default)]
pub struct QueryResponse {
    pub data: Option<Vec<RawRecord>>,
    pub count: Option<usize>,
}

impl QueryResponse {
    pub fn from_body(body: &[u8]) -> Result<Self, FetchError> {
        let data: Option<Vec<RawRecord>> = serde_json::from_slice(body)?;
        Ok(Self {
            count: data.as_ref().map(Vec::len),
            data,
        })
    }

    /// Rows, or `NoData` when the response carried none
    pub fn into_rows(self) -> Result<Vec<RawRecord>, FetchError> {
        self.data.ok_or(FetchError::NoData)
    }
}

pub fn rest_url(base_url: &str, table: &str) -> String {
    format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), table)
}

fn auth_headers(key: &str) -> Result<HeaderMap, ConfigError> {
    let invalid = || ConfigError::InvalidValue("Supabase key is not a valid HTTP header value".to_string());

    let mut headers = HeaderMap::new();
    headers.insert("apikey", HeaderValue::from_str(key).map_err(|_| invalid())?);
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", key)).map_err(|_| invalid())?,
    );
    Ok(headers)
}

fn build_client(secrets: &SupabaseSecrets, timeout: Duration) -> Result<Client, FetchError> {
    let client = Client::builder()
        .default_headers(auth_headers(&secrets.key)?)
        .timeout(timeout)
        .build()?;
    Ok(client)
}

async fn select(client: &Client, base_url: &str, table: &str, columns: &str) -> Result<QueryResponse, FetchError> {
    let response = client
        .get(rest_url(base_url, table))
        .query(&[("select", columns)])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(FetchError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let body = response.bytes().await?;
    QueryResponse::from_body(&body)
}

struct ManagedInner {
    client: Client,
    base_url: String,
}

/// Long-lived connection, built once and reused across reloads
pub struct ManagedConnection {
    inner: Result<ManagedInner, ConfigError>,
}

impl ManagedConnection {
    pub fn new(settings: Result<SupabaseSecrets, ConfigError>, timeout: Duration) -> Self {
        let inner = settings.and_then(|settings| {
            let client = build_client(&settings, timeout)
                .map_err(|e| ConfigError::InvalidValue(format!("cannot build HTTP client: {}", e)))?;
            Ok(ManagedInner {
                client,
                base_url: settings.url,
            })
        });

        if let Err(e) = &inner {
            log::warn!("Managed connection unavailable: {}", e);
        }
        Self { inner }
    }

    pub async fn query(&self, columns: &str, table: &str) -> Result<QueryResponse, FetchError> {
        let inner = self.inner.as_ref().map_err(|e| e.clone())?;
        select(&inner.client, &inner.base_url, table, columns).await
    }
}

#[async_trait]
impl RecordSource for ManagedConnection {
    fn source(&self) -> DataSource {
        DataSource::ModernConnection
    }

    async fn fetch(&self, table: &str) -> Result<Vec<RawRecord>, FetchError> {
        self.query("*", table).await?.into_rows()
    }
}

/// Plain client created straight from the URL and key
pub struct DirectClient {
    client: Client,
    base_url: String,
}

impl DirectClient {
    pub fn create(secrets: &SupabaseSecrets, timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client(secrets, timeout)?,
            base_url: secrets.url.clone(),
        })
    }

    /// Unfiltered `select *` on `table`
    pub async fn select_all(&self, table: &str) -> Result<QueryResponse, FetchError> {
        select(&self.client, &self.base_url, table, "*").await
    }
}

/// Fallback strategy: a new `DirectClient` per fetch
pub struct DirectClientSource {
    secrets: Result<SupabaseSecrets, ConfigError>,
    timeout: Duration,
}

impl DirectClientSource {
    pub fn new(secrets: Result<SupabaseSecrets, ConfigError>, timeout: Duration) -> Self {
        Self { secrets, timeout }
    }
}

#[async_trait]
impl RecordSource for DirectClientSource {
    fn source(&self) -> DataSource {
        DataSource::DirectClient
    }

    async fn fetch(&self, table: &str) -> Result<Vec<RawRecord>, FetchError> {
        let secrets = self.secrets.as_ref().map_err(|e| e.clone())?;
        let client = DirectClient::create(secrets, self.timeout)?;
        client.select_all(table).await?.into_rows()
    }
}
