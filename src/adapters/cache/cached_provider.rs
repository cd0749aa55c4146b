//! Tracing and caching decorator over a [`NodeProvider`].
//!
//! Every operation is traced and delegated to the wrapped provider. Reads of
//! node data are answered from the injected [`ReadCache`] when possible; a hit
//! returns the retained reply with only its correlation identifier rewritten,
//! without consulting the provider at all. A successful delete drops the entry
//! for its path, and a successful set-data rewrites the cached buffer in
//! place, so a hit always reflects the last write that passed through here.
//!
//! # Staleness window
//!
//! A cache-missed `get_data` racing a `delete` or `set_data` on the same path
//! may store its reply after the write completed, leaving an entry one
//! provider round trip behind the latest write. Closing the window would mean
//! holding a per-path lock across the whole round trip; the cache tolerates
//! the stale entry instead.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::trace;

use super::read_cache::ReadCache;
use crate::domain::models::{
    CloseRequest, CreateRequest, DeleteRequest, ExistsRequest, GetAclRequest,
    GetChildren2Request, GetChildrenRequest, GetDataRequest, MultiRequest, PingRequest, Response,
    SetAclRequest, SetAuthRequest, SetDataRequest, SetWatchesRequest, SyncRequest, Xid,
};
use crate::domain::ports::NodeProvider;

/// Same-interface wrapper adding per-operation tracing and read caching.
///
/// The decorator never generates, suppresses, retries, or transforms an engine
/// error; it only decides whether to consult the provider at all and whether
/// to record cache state afterward. Outcomes are classified as success versus
/// error, never by specific error kind.
pub struct CachedProvider<P: NodeProvider> {
    inner: Arc<P>,
    cache: Arc<ReadCache>,
}

impl<P: NodeProvider> CachedProvider<P> {
    /// Wrap `inner`, maintaining read state in the injected `cache`.
    pub fn new(inner: Arc<P>, cache: Arc<ReadCache>) -> Self {
        Self { inner, cache }
    }

    /// The cache this decorator maintains.
    pub fn cache(&self) -> &ReadCache {
        &self.cache
    }
}

#[async_trait]
impl<P: NodeProvider + 'static> NodeProvider for CachedProvider<P> {
    async fn create(&self, xid: Xid, req: &CreateRequest) -> Response {
        trace!(op = "create", xid, ?req);
        self.inner.create(xid, req).await
    }

    async fn delete(&self, xid: Xid, req: &DeleteRequest) -> Response {
        trace!(op = "delete", xid, ?req);
        let resp = self.inner.delete(xid, req).await;
        if resp.is_ok() {
            self.cache.invalidate(&req.path);
        }
        resp
    }

    async fn exists(&self, xid: Xid, req: &ExistsRequest) -> Response {
        trace!(op = "exists", xid, ?req);
        self.inner.exists(xid, req).await
    }

    async fn get_data(&self, xid: Xid, req: &GetDataRequest) -> Response {
        trace!(op = "get_data", xid, ?req);

        if let Some(mut cached) = self.cache.lookup(&req.path) {
            cached.header.xid = xid;
            trace!(op = "get_data", xid, resp = ?cached, "cache hit");
            return cached;
        }

        let resp = self.inner.get_data(xid, req).await;
        if resp.is_ok() {
            trace!(op = "get_data", xid, resp = ?resp, "cache fill");
            self.cache.store(req.path.clone(), resp.clone());
        }
        resp
    }

    async fn set_data(&self, xid: Xid, req: &SetDataRequest) -> Response {
        trace!(op = "set_data", xid, ?req);

        // The write must always reach the engine; only the bookkeeping is ours.
        let resp = self.inner.set_data(xid, req).await;
        if resp.is_ok() && self.cache.update_data(&req.path, &req.data) {
            trace!(op = "set_data", xid, path = %req.path, "cached entry updated in place");
        }
        resp
    }

    async fn get_acl(&self, xid: Xid, req: &GetAclRequest) -> Response {
        trace!(op = "get_acl", xid, ?req);
        self.inner.get_acl(xid, req).await
    }

    async fn set_acl(&self, xid: Xid, req: &SetAclRequest) -> Response {
        trace!(op = "set_acl", xid, ?req);
        self.inner.set_acl(xid, req).await
    }

    async fn get_children(&self, xid: Xid, req: &GetChildrenRequest) -> Response {
        trace!(op = "get_children", xid, ?req);
        self.inner.get_children(xid, req).await
    }

    async fn get_children2(&self, xid: Xid, req: &GetChildren2Request) -> Response {
        trace!(op = "get_children2", xid, ?req);
        self.inner.get_children2(xid, req).await
    }

    async fn sync(&self, xid: Xid, req: &SyncRequest) -> Response {
        trace!(op = "sync", xid, ?req);
        self.inner.sync(xid, req).await
    }

    async fn ping(&self, xid: Xid, req: &PingRequest) -> Response {
        trace!(op = "ping", xid, ?req);
        self.inner.ping(xid, req).await
    }

    async fn multi(&self, xid: Xid, req: &MultiRequest) -> Response {
        trace!(op = "multi", xid, ?req);
        self.inner.multi(xid, req).await
    }

    async fn close(&self, xid: Xid, req: &CloseRequest) -> Response {
        trace!(op = "close", xid, ?req);
        self.inner.close(xid, req).await
    }

    async fn set_auth(&self, xid: Xid, req: &SetAuthRequest) -> Response {
        trace!(op = "set_auth", xid, ?req);
        self.inner.set_auth(xid, req).await
    }

    async fn set_watches(&self, xid: Xid, req: &SetWatchesRequest) -> Response {
        trace!(op = "set_watches", xid, ?req);
        self.inner.set_watches(xid, req).await
    }
}
