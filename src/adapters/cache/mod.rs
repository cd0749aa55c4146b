//! Read caching for node data.
//!
//! [`ReadCache`] is the shared, path-keyed table of last-read node data;
//! [`CachedProvider`] wraps any provider with per-operation tracing and the
//! cache maintenance that keeps that table coherent. Wraps the provider trait
//! as a decorator.

pub mod cached_provider;
pub mod read_cache;

pub use cached_provider::CachedProvider;
pub use read_cache::ReadCache;
