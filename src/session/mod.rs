//! Bearer token storage.
//!
//! The API client reads the token from a [`TokenStore`] before every request
//! and clears it when the backend answers 401.

mod token_store;

pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};

use crate::config::Config;
use std::sync::Arc;

/// Pick the token store described by the configuration.
///
/// A configured `token_file` gives a file-backed store, otherwise the token
/// lives only in memory.
pub fn token_store_from_config(config: &Config) -> Arc<dyn TokenStore> {
    match &config.token_file {
        Some(path) => Arc::new(FileTokenStore::new(path.clone())),
        None => Arc::new(MemoryTokenStore::new()),
    }
}
