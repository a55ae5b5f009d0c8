use crate::domain::ports::PreferenceStore;
use crate::utils::error::{PortfolioError, Result};
use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Preferences kept in a small JSON object on disk.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load_all(&self) -> Result<BTreeMap<String, String>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            // 檔案不存在視為尚無任何偏好
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.load_all().await?;
        Ok(entries.remove(key))
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        // 無法解析的檔案直接覆寫，與讀取端退回預設值的行為一致
        let mut entries = match self.load_all().await {
            Ok(entries) => entries,
            Err(PortfolioError::SerializationError(e)) => {
                tracing::warn!(
                    error = %e,
                    path = %self.path.display(),
                    "Preferences file unreadable, rewriting it"
                );
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_vec_pretty(&entries)?;
        tokio::fs::write(&self.path, json).await?;
        tracing::debug!(key, path = %self.path.display(), "Preference saved");
        Ok(())
    }
}

/// In-process preferences with no backing file; tests use it in place of
/// [`FilePreferenceStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Arc::new(Mutex::new(entries)),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().await;
        Ok(entries.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
