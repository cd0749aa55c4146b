//! Canopy - Coordination Service Dispatch Layer
//!
//! Canopy sits between a protocol front end and the coordination engine that
//! owns a tree-structured node namespace. Every operation is traced and
//! delegated to the engine; successful node reads are retained in a concurrent
//! read cache that deletes invalidate and writes refresh in place, so repeated
//! reads of an unchanged node skip the engine round trip entirely.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): protocol models, the provider port, and the
//!   engine's error taxonomy
//! - **Adapters Layer** (`adapters`): the caching decorator, the read cache it
//!   maintains, and a mock provider for tests
//! - **Infrastructure Layer** (`infrastructure`): configuration loading and
//!   logging initialization
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use canopy::{CachedProvider, ReadCache};
//!
//! let engine = Arc::new(my_engine);
//! let cache = Arc::new(ReadCache::new());
//! let provider = CachedProvider::new(engine, cache);
//! // `provider` now drops in anywhere a bare NodeProvider is expected.
//! ```

pub mod adapters;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use adapters::cache::{CachedProvider, ReadCache};
pub use adapters::mock::MockProvider;
pub use domain::errors::ErrorCode;
pub use domain::models::{
    Acl, CacheConfig, CheckVersionRequest, CloseRequest, Config, CreateMode, CreateRequest,
    DeleteRequest, ExistsRequest, GetAclRequest, GetChildren2Request, GetChildrenRequest,
    GetDataBody, GetDataRequest, LogFormat, LoggingConfig, MultiOp, MultiRequest, MultiResult,
    PingRequest, ReplyHeader, Response, ResponseBody, SetAclRequest, SetAuthRequest,
    SetDataRequest, SetWatchesRequest, SharedData, Stat, SyncRequest, Xid, Zxid,
};
pub use domain::ports::NodeProvider;
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::logging::init_logging;
