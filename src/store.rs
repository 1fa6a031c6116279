use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{ApiKey, Tweet, User};

/// The persisted aggregate: everything the API knows, in one JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub tweets: Vec<Tweet>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub api_keys: Vec<ApiKey>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to load document store: {0}")]
    Load(String),
    #[error("failed to persist document store: {0}")]
    Persist(String),
}

pub struct DocumentStore {
    path: Option<PathBuf>,
    state: RwLock<Document>,
}

impl DocumentStore {
    /// Opens the store at `path`. A missing file yields empty collections;
    /// an unreadable or malformed file is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let document = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|err| StoreError::Load(format!("{}: {err}", path.display())))?,
            Err(err) if err.kind() == ErrorKind::NotFound => Document::default(),
            Err(err) => return Err(StoreError::Load(format!("{}: {err}", path.display()))),
        };

        Ok(Self {
            path: Some(path),
            state: RwLock::new(document),
        })
    }

    /// Store with no backing file; flushes are no-ops.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            state: RwLock::new(Document::default()),
        }
    }

    /// Snapshot of all tweets in insertion order.
    pub async fn tweets(&self) -> Vec<Tweet> {
        self.state.read().await.tweets.clone()
    }

    pub async fn find_user<P>(&self, predicate: P) -> Option<User>
    where
        P: Fn(&User) -> bool,
    {
        let state = self.state.read().await;
        state.users.iter().find(|user| predicate(user)).cloned()
    }

    pub async fn find_api_key<P>(&self, predicate: P) -> Option<ApiKey>
    where
        P: Fn(&ApiKey) -> bool,
    {
        let state = self.state.read().await;
        state.api_keys.iter().find(|key| predicate(key)).cloned()
    }

    pub async fn append_user(&self, user: User) -> Result<(), StoreError> {
        self.mutate(|document| document.users.push(user)).await
    }

    pub async fn append_tweet(&self, tweet: Tweet) -> Result<(), StoreError> {
        self.mutate(|document| document.tweets.push(tweet)).await
    }

    /// Replaces the key record for the username if one exists, else appends.
    pub async fn upsert_api_key(&self, key: ApiKey) -> Result<(), StoreError> {
        self.mutate(|document| {
            match document
                .api_keys
                .iter_mut()
                .find(|existing| existing.username == key.username)
            {
                Some(existing) => existing.api_key = key.api_key,
                None => document.api_keys.push(key),
            }
        })
        .await
    }

    // The write lock is held across the flush: mutation plus persist act as
    // one unit, and readers never observe state that has not reached disk.
    async fn mutate<F>(&self, operation: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Document),
    {
        let mut state = self.state.write().await;
        operation(&mut state);
        self.flush(&state).await
    }

    async fn flush(&self, document: &Document) -> Result<(), StoreError> {
        let Some(path) = self.path.as_ref() else {
            return Ok(());
        };

        let payload = serde_json::to_vec_pretty(document)
            .map_err(|err| StoreError::Persist(err.to_string()))?;

        // Write a uniquely named sibling and rename over the target, so the
        // file on disk is always either the old or the new document.
        let temp_path = path.with_extension(format!("{}.tmp", Uuid::new_v4().simple()));
        tokio::fs::write(&temp_path, payload)
            .await
            .map_err(|err| StoreError::Persist(err.to_string()))?;
        tokio::fs::rename(&temp_path, path)
            .await
            .map_err(|err| StoreError::Persist(err.to_string()))?;

        Ok(())
    }
}
