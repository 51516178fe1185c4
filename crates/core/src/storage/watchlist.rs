use tracing::{info, warn};

use crate::errors::CoreError;

use super::backend::KeyValueStorage;

/// The single storage key holding the JSON-encoded watchlist.
pub const WATCHLIST_KEY: &str = "crypto-watchlist";

/// The user's set of watched coin ids, backed by durable storage.
///
/// Each view builds its own store with [`WatchlistStore::load`] when it
/// mounts; there is no live subscription between views. Every mutation is
/// written through to storage before the call returns.
pub struct WatchlistStore<'a> {
    storage: &'a dyn KeyValueStorage,
    /// Membership in first-added order, no duplicates.
    ids: Vec<String>,
}

impl std::fmt::Debug for WatchlistStore<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchlistStore")
            .field("ids", &self.ids)
            .finish()
    }
}

impl<'a> WatchlistStore<'a> {
    /// Read the persisted watchlist. Never fails: an absent, unreadable or
    /// corrupt value yields an empty watchlist.
    pub fn load(storage: &'a dyn KeyValueStorage) -> Self {
        let ids = match storage.get(WATCHLIST_KEY) {
            Ok(Some(raw)) => parse_ids(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "corrupt watchlist in storage, starting empty");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "could not read watchlist, starting empty");
                Vec::new()
            }
        };
        Self { storage, ids }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Add `id` if absent, remove it if present, then persist.
    /// Returns whether the coin is watched afterwards. On a failed write the
    /// in-memory set is left as it was.
    pub fn toggle(&mut self, id: &str) -> Result<bool, CoreError> {
        let watched = !self.contains(id);
        let next = if watched {
            let mut next = self.ids.clone();
            next.push(id.to_string());
            next
        } else {
            self.without(id)
        };
        self.commit(next)?;
        info!(id, watched, "watchlist updated");
        Ok(watched)
    }

    /// Remove `id`; a no-op (nothing written) when absent.
    /// Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> Result<bool, CoreError> {
        if !self.contains(id) {
            return Ok(false);
        }
        self.commit(self.without(id))?;
        info!(id, "removed from watchlist");
        Ok(true)
    }

    fn without(&self, id: &str) -> Vec<String> {
        self.ids.iter().filter(|i| *i != id).cloned().collect()
    }

    /// Persist `next`, then adopt it.
    fn commit(&mut self, next: Vec<String>) -> Result<(), CoreError> {
        let json = serde_json::to_string(&next)
            .map_err(|e| CoreError::Serialization(format!("Failed to encode watchlist: {e}")))?;
        self.storage.set(WATCHLIST_KEY, &json)?;
        self.ids = next;
        Ok(())
    }
}

/// Decode the stored JSON array, dropping duplicates and blank ids.
fn parse_ids(raw: &str) -> Result<Vec<String>, CoreError> {
    let decoded: Vec<String> = serde_json::from_str(raw)?;
    let mut ids: Vec<String> = Vec::with_capacity(decoded.len());
    for id in decoded {
        if !id.trim().is_empty() && !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}
