//! Error taxonomy of the coordination engine.
//!
//! Every error a reply can carry originates in the engine; the dispatch layer
//! never constructs one itself and only distinguishes success from error when
//! deciding whether to touch the read cache. A cache hit makes no engine call
//! and therefore always returns a success header.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error conditions reported by the coordination engine.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    #[error("node does not exist")]
    NoNode,

    #[error("node already exists")]
    NodeExists,

    #[error("version mismatch")]
    BadVersion,

    #[error("not authenticated")]
    NoAuth,

    #[error("authentication failed")]
    AuthFailed,

    #[error("node has children")]
    NotEmpty,

    #[error("ephemeral nodes may not have children")]
    NoChildrenForEphemerals,

    #[error("invalid ACL")]
    InvalidAcl,

    #[error("bad arguments")]
    BadArguments,

    #[error("session expired")]
    SessionExpired,

    #[error("connection to the engine was lost")]
    ConnectionLoss,

    #[error("malformed request payload")]
    MarshallingError,
}
