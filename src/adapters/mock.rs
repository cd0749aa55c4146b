//! Mock provider for exercising the dispatch layer in tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::errors::ErrorCode;
use crate::domain::models::{
    Acl, CheckVersionRequest, CloseRequest, CreateMode, CreateRequest, DeleteRequest,
    ExistsRequest, GetAclRequest, GetChildren2Request, GetChildrenRequest, GetDataBody,
    GetDataRequest, MultiOp, MultiRequest, MultiResult, PingRequest, Response, ResponseBody,
    SetAclRequest, SetAuthRequest, SetDataRequest, SetWatchesRequest, SharedData, Stat,
    SyncRequest, Xid, Zxid,
};
use crate::domain::ports::NodeProvider;

/// Stored node state inside the mock.
#[derive(Debug, Clone)]
struct MockNode {
    data: Vec<u8>,
    acl: Vec<Acl>,
    stat: Stat,
}

/// Per-operation call counters, observable by tests.
///
/// Load with `Ordering::SeqCst`; tests use these to prove whether an
/// operation reached the engine or was answered upstream.
#[derive(Debug, Default)]
pub struct CallCounts {
    pub create: AtomicUsize,
    pub delete: AtomicUsize,
    pub exists: AtomicUsize,
    pub get_data: AtomicUsize,
    pub set_data: AtomicUsize,
    pub get_acl: AtomicUsize,
    pub set_acl: AtomicUsize,
    pub get_children: AtomicUsize,
    pub get_children2: AtomicUsize,
    pub sync: AtomicUsize,
    pub ping: AtomicUsize,
    pub multi: AtomicUsize,
    pub close: AtomicUsize,
    pub set_auth: AtomicUsize,
    pub set_watches: AtomicUsize,
}

/// In-memory provider standing in for the coordination engine.
///
/// Holds a flat path table rather than a real tree: enough structure to answer
/// every operation, while letting tests observe exactly which calls reached
/// the engine and script failures per path. Multi requests are applied
/// sequentially and stop at the first failing op; transactional rollback is
/// not modeled.
pub struct MockProvider {
    nodes: RwLock<HashMap<String, MockNode>>,
    failures: RwLock<HashMap<String, ErrorCode>>,
    calls: CallCounts,
    zxid: AtomicI64,
    sequence: AtomicI64,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            nodes: RwLock::new(HashMap::new()),
            failures: RwLock::new(HashMap::new()),
            calls: CallCounts::default(),
            zxid: AtomicI64::new(0),
            sequence: AtomicI64::new(0),
        }
    }

    /// Seed a node without going through `create`.
    pub async fn put_node(&self, path: impl Into<String>, data: Vec<u8>) {
        let zxid = self.next_zxid();
        let node = MockNode {
            stat: new_stat(zxid, data.len()),
            data,
            acl: vec![Acl::world_anyone()],
        };
        self.nodes.write().await.insert(path.into(), node);
    }

    /// Script every subsequent operation addressing `path` to fail with `err`
    /// until [`clear_failure`](Self::clear_failure) is called.
    pub async fn fail_path(&self, path: impl Into<String>, err: ErrorCode) {
        self.failures.write().await.insert(path.into(), err);
    }

    /// Remove a scripted failure.
    pub async fn clear_failure(&self, path: &str) {
        self.failures.write().await.remove(path);
    }

    /// Per-operation call counters.
    pub fn calls(&self) -> &CallCounts {
        &self.calls
    }

    /// Current engine transaction stamp.
    pub fn zxid(&self) -> Zxid {
        self.zxid.load(Ordering::SeqCst)
    }

    fn next_zxid(&self) -> Zxid {
        self.zxid.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn scripted_failure(&self, path: &str) -> Option<ErrorCode> {
        self.failures.read().await.get(path).copied()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn new_stat(zxid: Zxid, data_len: usize) -> Stat {
    Stat {
        czxid: zxid,
        mzxid: zxid,
        ctime: zxid,
        mtime: zxid,
        data_length: data_len as i32,
        ..Stat::default()
    }
}

fn version_matches(requested: i32, actual: i32) -> bool {
    requested == -1 || requested == actual
}

#[async_trait]
impl NodeProvider for MockProvider {
    async fn create(&self, xid: Xid, req: &CreateRequest) -> Response {
        self.calls.create.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.scripted_failure(&req.path).await {
            return Response::error(xid, self.zxid(), err);
        }

        let mut nodes = self.nodes.write().await;
        let path = match req.mode {
            CreateMode::PersistentSequential | CreateMode::EphemeralSequential => {
                let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
                format!("{}{:010}", req.path, seq)
            }
            CreateMode::Persistent | CreateMode::Ephemeral => req.path.clone(),
        };
        if nodes.contains_key(&path) {
            return Response::error(xid, self.zxid(), ErrorCode::NodeExists);
        }

        let zxid = self.next_zxid();
        let acl = if req.acl.is_empty() {
            vec![Acl::world_anyone()]
        } else {
            req.acl.clone()
        };
        nodes.insert(
            path.clone(),
            MockNode {
                data: req.data.clone(),
                acl,
                stat: new_stat(zxid, req.data.len()),
            },
        );
        Response::ok(xid, zxid, ResponseBody::Create { path })
    }

    async fn delete(&self, xid: Xid, req: &DeleteRequest) -> Response {
        self.calls.delete.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.scripted_failure(&req.path).await {
            return Response::error(xid, self.zxid(), err);
        }

        let mut nodes = self.nodes.write().await;
        let Some(node) = nodes.get(&req.path) else {
            return Response::error(xid, self.zxid(), ErrorCode::NoNode);
        };
        if !version_matches(req.version, node.stat.version) {
            return Response::error(xid, self.zxid(), ErrorCode::BadVersion);
        }

        nodes.remove(&req.path);
        let zxid = self.next_zxid();
        Response::ok(xid, zxid, ResponseBody::Delete)
    }

    async fn exists(&self, xid: Xid, req: &ExistsRequest) -> Response {
        self.calls.exists.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.scripted_failure(&req.path).await {
            return Response::error(xid, self.zxid(), err);
        }

        match self.nodes.read().await.get(&req.path) {
            Some(node) => Response::ok(xid, self.zxid(), ResponseBody::Exists { stat: node.stat }),
            None => Response::error(xid, self.zxid(), ErrorCode::NoNode),
        }
    }

    async fn get_data(&self, xid: Xid, req: &GetDataRequest) -> Response {
        self.calls.get_data.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.scripted_failure(&req.path).await {
            return Response::error(xid, self.zxid(), err);
        }

        match self.nodes.read().await.get(&req.path) {
            Some(node) => Response::ok(
                xid,
                self.zxid(),
                ResponseBody::GetData(GetDataBody {
                    data: SharedData::new(node.data.clone()),
                    stat: node.stat,
                }),
            ),
            None => Response::error(xid, self.zxid(), ErrorCode::NoNode),
        }
    }

    async fn set_data(&self, xid: Xid, req: &SetDataRequest) -> Response {
        self.calls.set_data.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.scripted_failure(&req.path).await {
            return Response::error(xid, self.zxid(), err);
        }

        let mut nodes = self.nodes.write().await;
        let Some(node) = nodes.get_mut(&req.path) else {
            return Response::error(xid, self.zxid(), ErrorCode::NoNode);
        };
        if !version_matches(req.version, node.stat.version) {
            return Response::error(xid, self.zxid(), ErrorCode::BadVersion);
        }

        let zxid = self.next_zxid();
        node.data.clone_from(&req.data);
        node.stat.version += 1;
        node.stat.mzxid = zxid;
        node.stat.mtime = zxid;
        node.stat.data_length = req.data.len() as i32;
        Response::ok(xid, zxid, ResponseBody::SetData { stat: node.stat })
    }

    async fn get_acl(&self, xid: Xid, req: &GetAclRequest) -> Response {
        self.calls.get_acl.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.scripted_failure(&req.path).await {
            return Response::error(xid, self.zxid(), err);
        }

        match self.nodes.read().await.get(&req.path) {
            Some(node) => Response::ok(
                xid,
                self.zxid(),
                ResponseBody::GetAcl {
                    acl: node.acl.clone(),
                    stat: node.stat,
                },
            ),
            None => Response::error(xid, self.zxid(), ErrorCode::NoNode),
        }
    }

    async fn set_acl(&self, xid: Xid, req: &SetAclRequest) -> Response {
        self.calls.set_acl.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.scripted_failure(&req.path).await {
            return Response::error(xid, self.zxid(), err);
        }

        let mut nodes = self.nodes.write().await;
        let Some(node) = nodes.get_mut(&req.path) else {
            return Response::error(xid, self.zxid(), ErrorCode::NoNode);
        };
        if !version_matches(req.version, node.stat.aversion) {
            return Response::error(xid, self.zxid(), ErrorCode::BadVersion);
        }

        let zxid = self.next_zxid();
        node.acl.clone_from(&req.acl);
        node.stat.aversion += 1;
        Response::ok(xid, zxid, ResponseBody::SetAcl { stat: node.stat })
    }

    async fn get_children(&self, xid: Xid, req: &GetChildrenRequest) -> Response {
        self.calls.get_children.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.scripted_failure(&req.path).await {
            return Response::error(xid, self.zxid(), err);
        }

        let nodes = self.nodes.read().await;
        if !nodes.contains_key(&req.path) {
            return Response::error(xid, self.zxid(), ErrorCode::NoNode);
        }
        let children = direct_children(&nodes, &req.path);
        Response::ok(xid, self.zxid(), ResponseBody::GetChildren { children })
    }

    async fn get_children2(&self, xid: Xid, req: &GetChildren2Request) -> Response {
        self.calls.get_children2.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.scripted_failure(&req.path).await {
            return Response::error(xid, self.zxid(), err);
        }

        let nodes = self.nodes.read().await;
        let Some(node) = nodes.get(&req.path) else {
            return Response::error(xid, self.zxid(), ErrorCode::NoNode);
        };
        let stat = node.stat;
        let children = direct_children(&nodes, &req.path);
        Response::ok(
            xid,
            self.zxid(),
            ResponseBody::GetChildren2 { children, stat },
        )
    }

    async fn sync(&self, xid: Xid, req: &SyncRequest) -> Response {
        self.calls.sync.fetch_add(1, Ordering::SeqCst);
        Response::ok(
            xid,
            self.zxid(),
            ResponseBody::Sync {
                path: req.path.clone(),
            },
        )
    }

    async fn ping(&self, xid: Xid, _req: &PingRequest) -> Response {
        self.calls.ping.fetch_add(1, Ordering::SeqCst);
        Response::ok(xid, self.zxid(), ResponseBody::Ping)
    }

    async fn multi(&self, xid: Xid, req: &MultiRequest) -> Response {
        self.calls.multi.fetch_add(1, Ordering::SeqCst);

        let mut results = Vec::with_capacity(req.ops.len());
        for op in &req.ops {
            let outcome = match op {
                MultiOp::Create(create) => {
                    let resp = self.apply_create(create).await;
                    match resp {
                        Ok(path) => MultiResult::Create { path },
                        Err(err) => MultiResult::Error(err),
                    }
                }
                MultiOp::Delete(delete) => match self.apply_delete(delete).await {
                    Ok(()) => MultiResult::Delete,
                    Err(err) => MultiResult::Error(err),
                },
                MultiOp::SetData(set) => match self.apply_set_data(set).await {
                    Ok(stat) => MultiResult::SetData { stat },
                    Err(err) => MultiResult::Error(err),
                },
                MultiOp::CheckVersion(check) => match self.apply_check(check).await {
                    Ok(()) => MultiResult::Check,
                    Err(err) => MultiResult::Error(err),
                },
            };
            let failed = matches!(outcome, MultiResult::Error(_));
            results.push(outcome);
            if failed {
                break;
            }
        }
        Response::ok(xid, self.zxid(), ResponseBody::Multi { results })
    }

    async fn close(&self, xid: Xid, _req: &CloseRequest) -> Response {
        self.calls.close.fetch_add(1, Ordering::SeqCst);
        Response::ok(xid, self.zxid(), ResponseBody::Close)
    }

    async fn set_auth(&self, xid: Xid, _req: &SetAuthRequest) -> Response {
        self.calls.set_auth.fetch_add(1, Ordering::SeqCst);
        Response::ok(xid, self.zxid(), ResponseBody::SetAuth)
    }

    async fn set_watches(&self, xid: Xid, _req: &SetWatchesRequest) -> Response {
        self.calls.set_watches.fetch_add(1, Ordering::SeqCst);
        Response::ok(xid, self.zxid(), ResponseBody::SetWatches)
    }
}

impl MockProvider {
    async fn apply_create(&self, req: &CreateRequest) -> Result<String, ErrorCode> {
        let mut nodes = self.nodes.write().await;
        if nodes.contains_key(&req.path) {
            return Err(ErrorCode::NodeExists);
        }
        let zxid = self.next_zxid();
        nodes.insert(
            req.path.clone(),
            MockNode {
                data: req.data.clone(),
                acl: req.acl.clone(),
                stat: new_stat(zxid, req.data.len()),
            },
        );
        Ok(req.path.clone())
    }

    async fn apply_delete(&self, req: &DeleteRequest) -> Result<(), ErrorCode> {
        let mut nodes = self.nodes.write().await;
        let Some(node) = nodes.get(&req.path) else {
            return Err(ErrorCode::NoNode);
        };
        if !version_matches(req.version, node.stat.version) {
            return Err(ErrorCode::BadVersion);
        }
        nodes.remove(&req.path);
        self.next_zxid();
        Ok(())
    }

    async fn apply_set_data(&self, req: &SetDataRequest) -> Result<Stat, ErrorCode> {
        let mut nodes = self.nodes.write().await;
        let Some(node) = nodes.get_mut(&req.path) else {
            return Err(ErrorCode::NoNode);
        };
        if !version_matches(req.version, node.stat.version) {
            return Err(ErrorCode::BadVersion);
        }
        let zxid = self.next_zxid();
        node.data.clone_from(&req.data);
        node.stat.version += 1;
        node.stat.mzxid = zxid;
        node.stat.data_length = req.data.len() as i32;
        Ok(node.stat)
    }

    async fn apply_check(&self, req: &CheckVersionRequest) -> Result<(), ErrorCode> {
        let nodes = self.nodes.read().await;
        let Some(node) = nodes.get(&req.path) else {
            return Err(ErrorCode::NoNode);
        };
        if !version_matches(req.version, node.stat.version) {
            return Err(ErrorCode::BadVersion);
        }
        Ok(())
    }
}

/// Direct children of `parent` in a flat path table.
fn direct_children(nodes: &HashMap<String, MockNode>, parent: &str) -> Vec<String> {
    let prefix = if parent == "/" {
        "/".to_string()
    } else {
        format!("{parent}/")
    };
    let mut children: Vec<String> = nodes
        .keys()
        .filter_map(|path| path.strip_prefix(&prefix))
        .filter(|rest| !rest.is_empty() && !rest.contains('/'))
        .map(str::to_string)
        .collect();
    children.sort();
    children
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_req(path: &str) -> GetDataRequest {
        GetDataRequest {
            path: path.to_string(),
            watch: false,
        }
    }

    #[tokio::test]
    async fn create_then_read_round_trips() {
        let mock = MockProvider::new();
        let created = mock
            .create(
                1,
                &CreateRequest {
                    path: "/a".to_string(),
                    data: b"payload".to_vec(),
                    acl: vec![],
                    mode: CreateMode::Persistent,
                },
            )
            .await;
        assert!(created.is_ok());

        let read = mock.get_data(2, &read_req("/a")).await;
        assert!(read.is_ok());
        assert_eq!(read.as_get_data().unwrap().data.to_vec(), b"payload");
        assert_eq!(mock.calls().get_data.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn set_data_enforces_versions() {
        let mock = MockProvider::new();
        mock.put_node("/a", b"v0".to_vec()).await;

        let stale = mock
            .set_data(
                1,
                &SetDataRequest {
                    path: "/a".to_string(),
                    data: b"v1".to_vec(),
                    version: 7,
                },
            )
            .await;
        assert_eq!(stale.header.err, Some(ErrorCode::BadVersion));

        let current = mock
            .set_data(
                2,
                &SetDataRequest {
                    path: "/a".to_string(),
                    data: b"v1".to_vec(),
                    version: -1,
                },
            )
            .await;
        assert!(current.is_ok());
    }

    #[tokio::test]
    async fn scripted_failure_applies_until_cleared() {
        let mock = MockProvider::new();
        mock.put_node("/a", b"v0".to_vec()).await;
        mock.fail_path("/a", ErrorCode::ConnectionLoss).await;

        let failed = mock.get_data(1, &read_req("/a")).await;
        assert_eq!(failed.header.err, Some(ErrorCode::ConnectionLoss));

        mock.clear_failure("/a").await;
        let healthy = mock.get_data(2, &read_req("/a")).await;
        assert!(healthy.is_ok());
    }

    #[tokio::test]
    async fn children_are_direct_descendants_only() {
        let mock = MockProvider::new();
        mock.put_node("/app", b"".to_vec()).await;
        mock.put_node("/app/one", b"".to_vec()).await;
        mock.put_node("/app/two", b"".to_vec()).await;
        mock.put_node("/app/two/deep", b"".to_vec()).await;

        let resp = mock
            .get_children(
                1,
                &GetChildrenRequest {
                    path: "/app".to_string(),
                    watch: false,
                },
            )
            .await;
        match resp.body {
            Some(ResponseBody::GetChildren { children }) => {
                assert_eq!(children, vec!["one".to_string(), "two".to_string()]);
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }
}
