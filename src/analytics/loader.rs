use crate::analytics::cache::{CacheKey, TableCache};
use crate::analytics::Dataset;
use crate::domain::EntityKind;
use crate::errors::custom::LoadError;
use crate::table::{Table, Workbook};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{instrument, warn};

const REMOTE_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the tables live: a local workbook, and optionally a base URL that
/// serves `{base}/{sheet}.json` when the local file is absent.
#[derive(Debug, Clone)]
pub struct DataSource {
    pub path: PathBuf,
    pub remote_base_url: Option<String>,
}

impl DataSource {
    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            remote_base_url: None,
        }
    }

    pub fn with_remote(mut self, base_url: impl Into<String>) -> Self {
        self.remote_base_url = Some(base_url.into());
        self
    }

    fn remote_url(&self, sheet: &str) -> Option<String> {
        self.remote_base_url
            .as_ref()
            .map(|base| format!("{}/{}.json", base.trim_end_matches('/'), sheet))
    }
}

/// Outcome of reading one table. `notice` is set whenever `table` is empty
/// because something went wrong.
#[derive(Debug, Clone)]
pub struct TableLoad {
    pub table: Table,
    pub notice: Option<LoadError>,
}

impl TableLoad {
    fn loaded(table: Table) -> Self {
        Self {
            table,
            notice: None,
        }
    }

    fn failed(notice: LoadError) -> Self {
        warn!(error = %notice, "table load failed, continuing with an empty table");
        Self {
            table: Table::empty(),
            notice: Some(notice),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Loader {
    client: reqwest::Client,
    cache: Option<Arc<TableCache>>,
}

impl Loader {
    /// Pass `None` to read through to storage on every call.
    pub fn new(cache: Option<Arc<TableCache>>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REMOTE_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { client, cache }
    }

    /******************************************/
    // Loading a single table
    /******************************************/
    #[instrument(name = "Load table", skip(self, source), fields(path = %source.path.display()))]
    pub async fn load_table(&self, source: &DataSource, sheet: &str) -> TableLoad {
        if source.path.exists() {
            return match self.local_workbook(&source.path) {
                Ok(workbook) => match workbook.sheet(sheet) {
                    Some(table) => TableLoad::loaded(table),
                    None => TableLoad::failed(LoadError::SheetMissing {
                        sheet: sheet.to_string(),
                        source_name: source.path.display().to_string(),
                    }),
                },
                Err(notice) => TableLoad::failed(notice),
            };
        }

        match source.remote_url(sheet) {
            Some(url) => match self.remote_table(&url, sheet).await {
                Ok(table) => TableLoad::loaded(table),
                Err(notice) => TableLoad::failed(notice),
            },
            None => TableLoad::failed(LoadError::SourceNotFound {
                source_name: source.path.display().to_string(),
            }),
        }
    }

    /******************************************/
    // Loading every table of the dataset
    /******************************************/
    #[instrument(name = "Load dataset", skip(self, source), fields(path = %source.path.display()))]
    pub async fn load_all(&self, source: &DataSource) -> Dataset {
        let mut dataset = Dataset::default();
        for kind in EntityKind::ALL {
            let load = self.load_table(source, kind.sheet_name()).await;
            *dataset.table_mut(kind) = load.table;
            dataset.notices.extend(load.notice);
        }
        dataset
    }

    fn local_workbook(&self, path: &Path) -> Result<Arc<Workbook>, LoadError> {
        let source_name = path.display().to_string();
        let unreadable = |reason: String| LoadError::Unreadable {
            source_name: source_name.clone(),
            reason,
        };

        let modified = std::fs::metadata(path)
            .and_then(|m| m.modified())
            .ok();
        let key = CacheKey::new(source_name.clone(), modified);
        if let Some(hit) = self.cache.as_ref().and_then(|c| c.get(&key)) {
            return Ok(hit);
        }

        let bytes = std::fs::read(path).map_err(|e| unreadable(e.to_string()))?;
        let workbook: Workbook =
            serde_json::from_slice(&bytes).map_err(|e| unreadable(e.to_string()))?;
        let workbook = Arc::new(workbook);
        if let Some(cache) = &self.cache {
            cache.insert(key, Arc::clone(&workbook));
        }
        Ok(workbook)
    }

    async fn remote_table(&self, url: &str, sheet: &str) -> Result<Table, LoadError> {
        let key = CacheKey::new(url, None);
        if let Some(hit) = self.cache.as_ref().and_then(|c| c.get(&key)) {
            if let Some(table) = hit.sheet(sheet) {
                return Ok(table);
            }
        }

        let fetch_error = |reason: String| LoadError::RemoteFetch {
            url: url.to_string(),
            reason,
        };
        let table: Table = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| fetch_error(e.to_string()))?
            .json()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        if let Some(cache) = &self.cache {
            let mut workbook = Workbook::new();
            workbook.push(sheet, table.clone());
            cache.insert(key, Arc::new(workbook));
        }
        Ok(table)
    }
}
