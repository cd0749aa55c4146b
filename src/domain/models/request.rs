//! Protocol request payloads.
//!
//! One struct per operation in the provider interface. Node-addressed requests
//! carry the path of the node they operate on; that path is also the read
//! cache's key space.

use serde::{Deserialize, Serialize};

use super::response::Zxid;
use super::znode::Acl;

/// Per-request correlation identifier assigned by the caller. A reply always
/// echoes the xid of the request that produced it.
pub type Xid = i32;

/// Creation disposition for new nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreateMode {
    /// Plain node, outlives the creating session.
    #[default]
    Persistent,
    /// Deleted when the creating session ends.
    Ephemeral,
    /// Persistent with an engine-appended sequence suffix.
    PersistentSequential,
    /// Ephemeral with an engine-appended sequence suffix.
    EphemeralSequential,
}

/// Create a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRequest {
    pub path: String,
    pub data: Vec<u8>,
    pub acl: Vec<Acl>,
    pub mode: CreateMode,
}

/// Delete a node. `version` of `-1` skips the version check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub path: String,
    pub version: i32,
}

/// Check node existence, optionally leaving a watch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistsRequest {
    pub path: String,
    pub watch: bool,
}

/// Read node data, optionally leaving a watch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetDataRequest {
    pub path: String,
    pub watch: bool,
}

/// Write node data. `version` of `-1` skips the version check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetDataRequest {
    pub path: String,
    pub data: Vec<u8>,
    pub version: i32,
}

/// Read a node's ACL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetAclRequest {
    pub path: String,
}

/// Replace a node's ACL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetAclRequest {
    pub path: String,
    pub acl: Vec<Acl>,
    pub version: i32,
}

/// List a node's children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetChildrenRequest {
    pub path: String,
    pub watch: bool,
}

/// List a node's children together with the node's stat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetChildren2Request {
    pub path: String,
    pub watch: bool,
}

/// Flush pending state for a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncRequest {
    pub path: String,
}

/// Session keepalive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingRequest;

/// Version precondition inside a [`MultiRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckVersionRequest {
    pub path: String,
    pub version: i32,
}

/// One arm of a transactional multi request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiOp {
    Create(CreateRequest),
    Delete(DeleteRequest),
    SetData(SetDataRequest),
    CheckVersion(CheckVersionRequest),
}

/// Atomic batch of write operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiRequest {
    pub ops: Vec<MultiOp>,
}

/// Close the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloseRequest;

/// Attach credentials to the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetAuthRequest {
    pub kind: i32,
    pub scheme: String,
    pub auth: Vec<u8>,
}

/// Re-register watches after a reconnect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetWatchesRequest {
    pub relative_zxid: Zxid,
    pub data_watches: Vec<String>,
    pub exist_watches: Vec<String>,
    pub child_watches: Vec<String>,
}
