//! Key-value persistence of the learner state.
//!
//! Every operation is an independent read-modify-write, so concurrent writers
//! of the same key silently lose updates: the last write wins.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::prelude::*;

pub mod file;
pub mod memory;

#[async_trait]
pub trait Storage: Send + Sync {
    /// Returns [`None`] when the key has never been set.
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    async fn set(&self, key: &str, value: Value) -> Result;
}

/// Value stored under its own fixed key.
#[async_trait]
pub trait Record: 'static + Serialize + DeserializeOwned + Default + Send + Sync {
    const KEY: &'static str;

    /// Loads the record, falling back to the default when it is missing.
    #[instrument(level = "debug", skip_all, fields(key = Self::KEY))]
    async fn load<S: Storage + ?Sized>(from: &S) -> Result<Self> {
        match from.get(Self::KEY).await? {
            Some(value) if !value.is_null() => serde_json::from_value(value)
                .with_context(|| format!("failed to deserialize `{}`", Self::KEY)),
            _ => Ok(Self::default()),
        }
    }

    #[instrument(level = "debug", skip_all, fields(key = Self::KEY))]
    async fn save<S: Storage + ?Sized>(&self, to: &S) -> Result {
        let value = serde_json::to_value(self)
            .with_context(|| format!("failed to serialize `{}`", Self::KEY))?;
        to.set(Self::KEY, value)
            .await
            .with_context(|| format!("failed to save `{}`", Self::KEY))
    }
}
