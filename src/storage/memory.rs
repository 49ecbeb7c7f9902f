use std::sync::Mutex;

use serde_json::Value;

use crate::prelude::*;
use crate::storage::Storage;

/// In-process storage, nothing survives the process.
#[derive(Default)]
pub struct MemoryStorage {
    values: Mutex<AHashMap<String, Value>>,
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let values = self
            .values
            .lock()
            .map_err(|_| anyhow!("the storage lock is poisoned"))?;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result {
        self.values
            .lock()
            .map_err(|_| anyhow!("the storage lock is poisoned"))?
            .insert(key.to_string(), value);
        Ok(())
    }
}
