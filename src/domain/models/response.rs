//! Protocol reply payloads.
//!
//! A reply is a header plus a typed body matching the request kind; error
//! replies carry no body. The get-data body reaches its buffer through
//! [`SharedData`], so an in-place replacement of the bytes is observed by
//! every clone of the same reply. The read cache relies on this to keep a
//! stored entry coherent after a set-data without replacing the map value.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use super::request::Xid;
use super::znode::{Acl, Stat};
use crate::domain::errors::ErrorCode;

/// Engine-wide transaction stamp carried in every reply header.
pub type Zxid = i64;

/// Node data buffer shared between a cached reply and every clone of it.
///
/// Cloning is shallow: all clones reach the same bytes, and [`replace`]
/// swaps them under the lock for every holder at once.
///
/// [`replace`]: SharedData::replace
#[derive(Clone, Default)]
pub struct SharedData(Arc<RwLock<Vec<u8>>>);

impl SharedData {
    pub fn new(data: Vec<u8>) -> Self {
        Self(Arc::new(RwLock::new(data)))
    }

    /// Copy of the current bytes.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.read().clone()
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    /// Swap the buffer in place, visible to every clone of this payload.
    pub fn replace(&self, data: Vec<u8>) {
        *self.0.write() = data;
    }

    /// Whether two handles reach the same underlying buffer.
    pub fn same_buffer(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for SharedData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedData").field(&*self.0.read()).finish()
    }
}

impl PartialEq for SharedData {
    fn eq(&self, other: &Self) -> bool {
        self.same_buffer(other) || *self.0.read() == *other.0.read()
    }
}

impl From<Vec<u8>> for SharedData {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

/// Reply header: correlation identifier, transaction stamp, outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyHeader {
    /// Correlation identifier of the request this reply answers.
    pub xid: Xid,
    /// Engine transaction stamp at reply time.
    pub zxid: Zxid,
    /// `None` on success, the engine's error condition otherwise.
    pub err: Option<ErrorCode>,
}

/// Body of a successful get-data reply. The buffer is shared with every clone.
#[derive(Debug, Clone, PartialEq)]
pub struct GetDataBody {
    pub data: SharedData,
    pub stat: Stat,
}

/// Per-operation outcome inside a multi reply.
#[derive(Debug, Clone, PartialEq)]
pub enum MultiResult {
    Create { path: String },
    Delete,
    SetData { stat: Stat },
    Check,
    Error(ErrorCode),
}

/// Typed reply bodies, one arm per operation kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Create { path: String },
    Delete,
    Exists { stat: Stat },
    GetData(GetDataBody),
    SetData { stat: Stat },
    GetAcl { acl: Vec<Acl>, stat: Stat },
    SetAcl { stat: Stat },
    GetChildren { children: Vec<String> },
    GetChildren2 { children: Vec<String>, stat: Stat },
    Sync { path: String },
    Ping,
    Multi { results: Vec<MultiResult> },
    Close,
    SetAuth,
    SetWatches,
}

/// One reply from the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub header: ReplyHeader,
    pub body: Option<ResponseBody>,
}

impl Response {
    /// Successful reply carrying `body`.
    pub fn ok(xid: Xid, zxid: Zxid, body: ResponseBody) -> Self {
        Self {
            header: ReplyHeader {
                xid,
                zxid,
                err: None,
            },
            body: Some(body),
        }
    }

    /// Error reply; the body is absent.
    pub fn error(xid: Xid, zxid: Zxid, err: ErrorCode) -> Self {
        Self {
            header: ReplyHeader {
                xid,
                zxid,
                err: Some(err),
            },
            body: None,
        }
    }

    /// Whether the engine reported success.
    pub fn is_ok(&self) -> bool {
        self.header.err.is_none()
    }

    /// The get-data body, if this reply carries one.
    pub fn as_get_data(&self) -> Option<&GetDataBody> {
        match &self.body {
            Some(ResponseBody::GetData(body)) => Some(body),
            _ => None,
        }
    }
}
