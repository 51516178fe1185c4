use std::future::Future;

use tracing::{debug, warn};

use crate::errors::CoreError;

/// Observable state of a one-shot request.
///
/// `Idle → Loading → {Success | Error}`; the only way out of a terminal
/// state is back into `Loading` for a new key.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState<T> {
    #[default]
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, FetchState::Error(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match self {
            FetchState::Success(data) => Some(data),
            _ => None,
        }
    }
}

/// Handle for one issued request. Only the newest ticket may complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket<K> {
    pub key: K,
    generation: u64,
}

/// A request-response unit keyed by `K` producing `T`.
///
/// No caching and no de-duplication: every `begin` issues a new request.
/// Responses belonging to a superseded ticket are dropped so a slow
/// request for an old key cannot overwrite the current one.
#[derive(Debug, Clone)]
pub struct Fetcher<K, T> {
    key: Option<K>,
    generation: u64,
    state: FetchState<T>,
}

impl<K, T> Default for Fetcher<K, T> {
    fn default() -> Self {
        Self {
            key: None,
            generation: 0,
            state: FetchState::Idle,
        }
    }
}

impl<K: Clone + PartialEq + std::fmt::Debug, T> Fetcher<K, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut FetchState<T> {
        &mut self.state
    }

    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    /// True when `key` differs from the key of the last issued request.
    pub fn needs_fetch(&self, key: &K) -> bool {
        self.key.as_ref() != Some(key)
    }

    /// Enter `Loading` for `key` and return the ticket for the new request.
    pub fn begin(&mut self, key: K) -> FetchTicket<K> {
        self.generation += 1;
        self.key = Some(key.clone());
        self.state = FetchState::Loading;
        debug!(?key, generation = self.generation, "fetch started");
        FetchTicket {
            key,
            generation: self.generation,
        }
    }

    /// Apply a response. Returns `false` (state untouched) for a stale ticket.
    pub fn complete(&mut self, ticket: FetchTicket<K>, result: Result<T, CoreError>) -> bool {
        if ticket.generation != self.generation {
            warn!(
                key = ?ticket.key,
                current = ?self.key,
                "ignoring response for superseded request"
            );
            return false;
        }

        self.state = match result {
            Ok(data) => FetchState::Success(data),
            Err(e) => {
                debug!(key = ?ticket.key, error = %e, "fetch failed");
                FetchState::Error(e.to_string())
            }
        };
        true
    }

    /// Issue and await a single request.
    pub async fn run<F>(&mut self, key: K, request: F) -> &FetchState<T>
    where
        F: Future<Output = Result<T, CoreError>>,
    {
        let ticket = self.begin(key);
        let result = request.await;
        self.complete(ticket, result);
        &self.state
    }
}
