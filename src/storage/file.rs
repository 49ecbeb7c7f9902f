use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tokio::fs;

use crate::prelude::*;
use crate::storage::Storage;

/// Keeps all the keys in a single JSON object file.
///
/// Writes go through a temporary file, which is then renamed over the target.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[instrument(level = "debug", skip_all, fields(path = ?self.path))]
    async fn read_object(&self) -> Result<Map<String, Value>> {
        match fs::read(&self.path).await {
            Ok(contents) => serde_json::from_slice(&contents)
                .with_context(|| format!("`{}` is not a JSON object", self.path.display())),
            Err(error) if error.kind() == ErrorKind::NotFound => {
                debug!("the file does not exist yet");
                Ok(Map::new())
            }
            Err(error) => {
                Err(error).with_context(|| format!("failed to read `{}`", self.path.display()))
            }
        }
    }

    #[instrument(level = "debug", skip_all, fields(path = ?self.path, n_keys = object.len()))]
    async fn write_object(&self, object: &Map<String, Value>) -> Result {
        let contents = serde_json::to_vec_pretty(object)?;
        let temporary_path = self.temporary_path();
        fs::write(&temporary_path, contents)
            .await
            .with_context(|| format!("failed to write `{}`", temporary_path.display()))?;
        fs::rename(&temporary_path, &self.path)
            .await
            .with_context(|| format!("failed to replace `{}`", self.path.display()))
    }

    fn temporary_path(&self) -> PathBuf {
        let mut path = OsString::from(self.path.as_os_str());
        path.push(".tmp");
        PathBuf::from(path)
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read_object().await?.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result {
        let mut object = self.read_object().await?;
        object.insert(key.to_string(), value);
        self.write_object(&object).await
    }
}
