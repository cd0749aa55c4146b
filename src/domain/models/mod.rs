//! Domain models: protocol requests and replies plus crate configuration.

pub mod config;
pub mod request;
pub mod response;
pub mod znode;

pub use config::{CacheConfig, Config, LogFormat, LoggingConfig};
pub use request::{
    CheckVersionRequest, CloseRequest, CreateMode, CreateRequest, DeleteRequest, ExistsRequest,
    GetAclRequest, GetChildren2Request, GetChildrenRequest, GetDataRequest, MultiOp, MultiRequest,
    PingRequest, SetAclRequest, SetAuthRequest, SetDataRequest, SetWatchesRequest, SyncRequest,
    Xid,
};
pub use response::{
    GetDataBody, MultiResult, ReplyHeader, Response, ResponseBody, SharedData, Zxid,
};
pub use znode::{perms, Acl, Stat};
