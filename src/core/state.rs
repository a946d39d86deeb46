//! Load lifecycle for the rate snapshot.

use crate::core::error::LoadError;
use crate::core::rates::RateTable;
use tracing::{debug, warn};

/// Status of the startup rate fetch.
///
/// Starts at `Loading` and transitions exactly once to `Ready` or `Failed`
/// when the fetch resolves. Both outcomes are terminal; there is no retry.
#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    Ready(RateTable),
    Failed(String),
}

impl LoadState {
    pub fn new() -> Self {
        LoadState::Loading
    }

    /// Applies the fetch outcome. Resolving a terminal state is ignored.
    pub fn resolve(&mut self, outcome: Result<RateTable, LoadError>) {
        if !self.is_loading() {
            warn!("Ignoring rate fetch outcome: load state already resolved");
            return;
        }
        *self = match outcome {
            Ok(table) => {
                debug!(currencies = table.len(), "Rate snapshot ready");
                LoadState::Ready(table)
            }
            Err(e) => LoadState::Failed(e.to_string()),
        };
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// The rate table, when the fetch succeeded.
    pub fn table(&self) -> Option<&RateTable> {
        match self {
            LoadState::Ready(table) => Some(table),
            _ => None,
        }
    }

    /// The user-visible failure message, when the fetch failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl Default for LoadState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> RateTable {
        RateTable::new("USD", vec![("EUR".to_string(), 0.9)], None).unwrap()
    }

    #[test]
    fn test_starts_loading() {
        let state = LoadState::new();
        assert!(state.is_loading());
        assert!(state.table().is_none());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_resolves_to_ready() {
        let mut state = LoadState::new();
        state.resolve(Ok(sample_table()));
        assert!(!state.is_loading());
        assert_eq!(state.table().unwrap().base(), "USD");
    }

    #[test]
    fn test_resolves_to_failed_with_message() {
        let mut state = LoadState::new();
        state.resolve(Err(LoadError::Provider("invalid-key".to_string())));
        assert_eq!(state.error(), Some("provider error: invalid-key"));
    }

    #[test]
    fn test_terminal_states_ignore_later_outcomes() {
        let mut state = LoadState::new();
        state.resolve(Err(LoadError::Transport("connection refused".to_string())));
        state.resolve(Ok(sample_table()));
        assert!(state.table().is_none());
        assert_eq!(
            state.error(),
            Some("transport error: connection refused")
        );
    }
}
