//! Node metadata shared by requests and replies.

use serde::{Deserialize, Serialize};

/// Permission bits carried by an [`Acl`] entry.
pub mod perms {
    /// Read node data and list children.
    pub const READ: i32 = 1 << 0;
    /// Set node data.
    pub const WRITE: i32 = 1 << 1;
    /// Create children.
    pub const CREATE: i32 = 1 << 2;
    /// Delete children.
    pub const DELETE: i32 = 1 << 3;
    /// Read and set ACLs.
    pub const ADMIN: i32 = 1 << 4;
    /// All of the above.
    pub const ALL: i32 = READ | WRITE | CREATE | DELETE | ADMIN;
}

/// Access control entry attached to a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acl {
    /// Bitwise OR of [`perms`] constants.
    pub perms: i32,
    /// Authentication scheme the entry applies to (e.g. `world`, `digest`).
    pub scheme: String,
    /// Scheme-specific identity.
    pub id: String,
}

impl Acl {
    /// World-anyone entry with full permissions, used when a caller supplies
    /// no ACL of its own.
    pub fn world_anyone() -> Self {
        Self {
            perms: perms::ALL,
            scheme: "world".to_string(),
            id: "anyone".to_string(),
        }
    }
}

/// Node metadata as reported by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    /// Transaction that created the node.
    pub czxid: i64,
    /// Transaction that last modified the node's data.
    pub mzxid: i64,
    /// Creation time, engine clock.
    pub ctime: i64,
    /// Last data modification time, engine clock.
    pub mtime: i64,
    /// Data version, bumped on every set-data.
    pub version: i32,
    /// Child list version.
    pub cversion: i32,
    /// ACL version.
    pub aversion: i32,
    /// Owning session for ephemeral nodes, zero otherwise.
    pub ephemeral_owner: i64,
    /// Length of the node's data in bytes.
    pub data_length: i32,
    /// Number of direct children.
    pub num_children: i32,
    /// Transaction that last modified the child list.
    pub pzxid: i64,
}
