//! Caching utilities for the EduSync client.
//!
//! This module provides the fetch cache that memoizes collection GETs per
//! endpoint key for a fixed window.

pub mod fetch_cache;

pub use fetch_cache::{FetchCache, ResourceSource};
