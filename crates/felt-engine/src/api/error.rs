use thiserror::Error;

use crate::api::types::{BodyHandle, NodeId};

/// Errors surfaced by the table core.
///
/// Everything here is either a broken precondition (bad configuration, a
/// paired object whose halves are not registered) or a fatal startup failure.
/// Nothing is retried.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("invalid table configuration: `{field}` {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },

    #[error("paired object is not registered (node {node:?}, body {body:?})")]
    UnregisteredObject { node: NodeId, body: BodyHandle },

    #[error("render target unavailable: {0}")]
    RenderTargetUnavailable(String),

    #[error("malformed options override: {0}")]
    Options(#[from] serde_json::Error),
}

impl TableError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        TableError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
