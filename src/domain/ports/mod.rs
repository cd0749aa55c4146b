//! Port trait definitions (Hexagonal Architecture)
//!
//! The single port here is [`NodeProvider`], the operation interface of the
//! coordination engine. The caching decorator implements the same trait, so a
//! decorated provider drops in anywhere a bare one is expected.

pub mod provider;

pub use provider::NodeProvider;
