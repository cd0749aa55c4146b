//! Provider port: the operation interface of the coordination engine.

use async_trait::async_trait;

use crate::domain::models::{
    CloseRequest, CreateRequest, DeleteRequest, ExistsRequest, GetAclRequest,
    GetChildren2Request, GetChildrenRequest, GetDataRequest, MultiRequest, PingRequest, Response,
    SetAclRequest, SetAuthRequest, SetDataRequest, SetWatchesRequest, SyncRequest, Xid,
};

/// Operation interface of the tree-structured coordination engine.
///
/// One method per protocol operation. Every method takes the caller's
/// correlation identifier plus a typed request and returns a reply whose
/// header reports success or an engine error condition. Implementations must
/// be safe to invoke concurrently from many sessions.
#[async_trait]
pub trait NodeProvider: Send + Sync {
    /// Create a node.
    async fn create(&self, xid: Xid, req: &CreateRequest) -> Response;

    /// Delete a node.
    async fn delete(&self, xid: Xid, req: &DeleteRequest) -> Response;

    /// Check node existence.
    async fn exists(&self, xid: Xid, req: &ExistsRequest) -> Response;

    /// Read node data.
    async fn get_data(&self, xid: Xid, req: &GetDataRequest) -> Response;

    /// Write node data.
    async fn set_data(&self, xid: Xid, req: &SetDataRequest) -> Response;

    /// Read a node's ACL.
    async fn get_acl(&self, xid: Xid, req: &GetAclRequest) -> Response;

    /// Replace a node's ACL.
    async fn set_acl(&self, xid: Xid, req: &SetAclRequest) -> Response;

    /// List a node's children.
    async fn get_children(&self, xid: Xid, req: &GetChildrenRequest) -> Response;

    /// List a node's children together with the node's stat.
    async fn get_children2(&self, xid: Xid, req: &GetChildren2Request) -> Response;

    /// Flush pending state for a path.
    async fn sync(&self, xid: Xid, req: &SyncRequest) -> Response;

    /// Session keepalive.
    async fn ping(&self, xid: Xid, req: &PingRequest) -> Response;

    /// Atomic batch of write operations.
    async fn multi(&self, xid: Xid, req: &MultiRequest) -> Response;

    /// Close the session.
    async fn close(&self, xid: Xid, req: &CloseRequest) -> Response;

    /// Attach credentials to the session.
    async fn set_auth(&self, xid: Xid, req: &SetAuthRequest) -> Response;

    /// Re-register watches after a reconnect.
    async fn set_watches(&self, xid: Xid, req: &SetWatchesRequest) -> Response;
}
